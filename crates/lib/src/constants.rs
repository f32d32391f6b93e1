//! # Shared Constants
//!
//! This module provides a centralized location for constants that are shared across
//! the `tosdr` workspace crates: the API location, the default service list, and the
//! fixed attribution strings written into every extracted document.

use std::time::Duration;

/// The base URL of the public ToS;DR API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.tosdr.org";

/// The default path of the generated patterns file.
pub const DEFAULT_OUTPUT_FILE: &str = "./privacy-patterns.json";

/// Attribution written into `metadata.source`.
pub const SOURCE_NAME: &str = "ToS;DR (Terms of Service; Didn't Read)";

/// Attribution written into `metadata.source_url`.
pub const SOURCE_URL: &str = "https://tosdr.org";

/// ToS;DR data is published under this license; the output inherits it.
pub const DATA_LICENSE: &str = "CC BY-SA 3.0";

/// Pause between two services, as a courtesy to the shared API rate budget.
pub const DEFAULT_SERVICE_DELAY: Duration = Duration::from_millis(500);

/// Per-request timeout used by the HTTP client.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Number of ranked tokens kept in each keyword table.
pub const DEFAULT_KEYWORD_LIMIT: usize = 50;

/// Maximum number of characters kept from a case description.
pub const DEFAULT_SUMMARY_MAX_CHARS: usize = 300;

/// Score used when a case carries no weight.
pub const DEFAULT_SCORE: u8 = 50;

/// Category id assigned when no keyword of any category matched.
pub const OTHER_CATEGORY_ID: &str = "other";

/// The built-in list of services, grouped roughly by their public rating.
pub const DEFAULT_SERVICES: &[&str] = &[
    // Usually rated A
    "duckduckgo",
    "signal",
    "protonmail",
    "firefox",
    "wikipedia",
    "nextcloud",
    "bitwarden",
    "tutanota",
    "mastodon",
    // Usually rated B-C
    "github",
    "discord",
    "spotify",
    "netflix",
    "dropbox",
    "slack",
    "zoom",
    "microsoft",
    "apple",
    "reddit",
    "twitter",
    "linkedin",
    "pinterest",
    "twitch",
    "steam",
    // Usually rated D-E
    "google",
    "facebook",
    "instagram",
    "tiktok",
    "amazon",
    "uber",
    "snapchat",
    "whatsapp",
    "youtube",
    "gmail",
];
