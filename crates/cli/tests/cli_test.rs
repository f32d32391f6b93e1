//! # CLI Tests
//!
//! Covers argument resolution, a full `run` against a wiremock API, and the
//! compiled `tosdr-extract` binary's exit behaviour.

use anyhow::Result;
use assert_cmd::prelude::*;
use clap::Parser;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::process::Command;
use std::time::Duration;
use tempfile::tempdir;
use tosdr_cli::{run, Cli};
use tosdr_patterns::DedupPolicy;
use tosdr_test_utils::{empty_search_body, mount_search, mount_service, point, search_body, service_body};
use wiremock::MockServer;

#[test]
fn test_defaults_need_no_arguments() {
    let cli = Cli::try_parse_from(["tosdr-extract"]).unwrap();
    let config = cli.pipeline_config();

    assert_eq!(config.services.len(), 34);
    assert_eq!(config.services[0], "duckduckgo");
    assert_eq!(config.service_delay, Duration::from_millis(500));
    assert_eq!(config.dedup, DedupPolicy::FirstTitleWins);
    assert_eq!(config.keyword_limit, 50);
}

#[test]
fn test_service_list_override() {
    let cli = Cli::try_parse_from([
        "tosdr-extract",
        "--services",
        " signal, ,github ",
        "--delay-ms",
        "0",
        "--merge-duplicate-services",
    ])
    .unwrap();
    let config = cli.pipeline_config();

    assert_eq!(config.services, vec!["signal", "github"]);
    assert!(config.service_delay.is_zero());
    assert_eq!(config.dedup, DedupPolicy::MergeServices);
}

#[tokio::test]
async fn test_run_writes_patterns_file() -> Result<()> {
    // --- Arrange ---
    let server = MockServer::start().await;
    mount_search(&server, "testservice", search_body("42")).await;
    mount_search(&server, "nothing", empty_search_body()).await;
    mount_service(
        &server,
        "42",
        service_body(
            "TestService",
            "E",
            vec![point(7, "Data is sold to advertisers", "", "blocker", 90)],
        ),
    )
    .await;
    let dir = tempdir()?;
    let output = dir.path().join("privacy-patterns.json");
    let cli = Cli::try_parse_from([
        "tosdr-extract",
        "--api-base-url",
        server.uri().as_str(),
        "--services",
        "testservice,nothing",
        "--delay-ms",
        "0",
        "--output",
        output.to_str().unwrap(),
    ])?;

    // --- Act ---
    let report = run(cli).await?;

    // --- Assert ---
    assert_eq!(report.document.metadata.total_services, 1);
    let written: Value = serde_json::from_str(&std::fs::read_to_string(&output)?)?;
    assert_eq!(written["services_reference"]["42"]["rating"], "E");
    assert_eq!(written["patterns"]["critical"][0]["id"], "point-7");
    assert_eq!(written["patterns"]["critical"][0]["score"], 90);
    assert_eq!(written["patterns"]["critical"][0]["services"], json!(["TestService"]));
    assert!(written["services_reference"].get("nothing").is_none());
    Ok(())
}

#[tokio::test]
async fn test_run_fails_when_output_cannot_be_written() -> Result<()> {
    let server = MockServer::start().await;
    let dir = tempdir()?;
    let output = dir.path().join("no-such-dir").join("out.json");
    let cli = Cli::try_parse_from([
        "tosdr-extract",
        "--api-base-url",
        server.uri().as_str(),
        "--services",
        "anything",
        "--delay-ms",
        "0",
        "--output",
        output.to_str().unwrap(),
    ])?;

    let err = run(cli).await.unwrap_err();
    assert!(format!("{err:?}").contains("Could not save"));
    Ok(())
}

#[test]
fn test_binary_exits_zero_when_every_service_is_skipped() {
    // Arrange
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("out.json");

    // Act
    let mut cmd = Command::cargo_bin("tosdr-extract").unwrap();
    cmd.arg("--api-base-url")
        .arg("http://127.0.0.1:9")
        .arg("--services")
        .arg("offline")
        .arg("--delay-ms")
        .arg("0")
        .arg("--timeout-secs")
        .arg("2")
        .arg("--output")
        .arg(output.to_str().unwrap());

    // Assert
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("search failed"))
        .stdout(predicate::str::contains("No data could be retrieved"));
    assert!(output.exists());
}

#[test]
fn test_binary_exits_non_zero_on_unwritable_output() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("missing").join("out.json");

    let mut cmd = Command::cargo_bin("tosdr-extract").unwrap();
    cmd.arg("--api-base-url")
        .arg("http://127.0.0.1:9")
        .arg("--services")
        .arg("offline")
        .arg("--delay-ms")
        .arg("0")
        .arg("--output")
        .arg(output.to_str().unwrap());

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Extraction failed"));
}
