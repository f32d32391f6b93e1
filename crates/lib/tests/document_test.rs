//! # Output Document Tests
//!
//! Checks the JSON shape consumed by the display application and the file writer.

use anyhow::Result;
use serde_json::Value;
use std::time::Duration;
use tosdr_patterns::{write_document, Extractor, PipelineConfig};
use tosdr_test_utils::{point, search_body, service_body, MockDirectory};

async fn sample_document() -> tosdr_patterns::PatternsDocument {
    let directory = MockDirectory::new();
    directory.add_search("signal", search_body(1));
    directory.add_service(
        "1",
        service_body(
            "Signal",
            "A",
            vec![
                point(5, "You can delete your data", "", "good", 40),
                point(6, "Uses cookies", "", "neutral", 50),
            ],
        ),
    );
    let config = PipelineConfig {
        service_delay: Duration::ZERO,
        ..PipelineConfig::with_services(["signal"])
    };
    Extractor::new(directory, config).run().await.document
}

#[tokio::test]
async fn test_document_json_shape() -> Result<()> {
    let doc = sample_document().await;
    let value: Value = serde_json::from_str(&doc.to_json_pretty()?)?;

    let top: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    for key in ["metadata", "categories", "patterns", "keywords", "services_reference"] {
        assert!(top.contains(&key), "missing top-level key {key}");
    }

    let metadata = &value["metadata"];
    assert_eq!(metadata["source"], "ToS;DR (Terms of Service; Didn't Read)");
    assert_eq!(metadata["source_url"], "https://tosdr.org");
    assert_eq!(metadata["license"], "CC BY-SA 3.0");
    assert_eq!(metadata["total_services"], 1);
    assert_eq!(metadata["total_points"], 2);
    assert!(metadata["extracted_at"].as_str().unwrap().contains('T'));

    for tier in ["critical", "bad", "warning", "neutral", "good"] {
        assert!(value["patterns"][tier].is_array(), "missing tier {tier}");
    }
    assert_eq!(value["patterns"]["good"][0]["id"], "point-5");
    assert_eq!(value["patterns"]["good"][0]["services"][0], "Signal");

    assert_eq!(value["categories"]["cookies"]["name_ja"], "Cookie・トラッキング");
    assert_eq!(value["categories"]["cookies"]["count"], 1);
    assert_eq!(value["categories"]["other"]["name"], "Other");

    assert!(value["keywords"]["negative"].as_array().unwrap().is_empty());
    assert_eq!(value["keywords"]["positive"][0]["word"], "delete");
    assert_eq!(value["keywords"]["positive"][0]["score"], 10);

    assert_eq!(value["services_reference"]["1"]["name"], "Signal");
    assert_eq!(value["services_reference"]["1"]["rating"], "A");
    Ok(())
}

#[tokio::test]
async fn test_write_document_keeps_non_ascii_text() -> Result<()> {
    let doc = sample_document().await;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("privacy-patterns.json");

    let written = write_document(&doc, &path)?;

    let content = std::fs::read_to_string(&path)?;
    assert_eq!(written as usize, content.len());
    assert!(content.contains("データ収集"));
    assert!(content.contains("\n  \"metadata\""), "output should be indented");
    Ok(())
}

#[tokio::test]
async fn test_write_document_reports_unwritable_path() -> Result<()> {
    let doc = sample_document().await;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("missing").join("out.json");

    let err = write_document(&doc, &path).unwrap_err();
    assert!(err.to_string().contains("Failed to write output file"));
    Ok(())
}
