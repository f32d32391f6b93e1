//! # Category Taxonomy
//!
//! The static table of topical categories that evaluation points are sorted into.
//! A `Taxonomy` is built once and handed to the extractor; nothing in the crate
//! reads it from global state, so tests can swap in a smaller table.

use crate::constants::OTHER_CATEGORY_ID;

/// One topical bucket and the lower-case keywords that select it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDefinition {
    pub id: String,
    pub name: String,
    /// Japanese display name, read by the display application.
    pub localized_name: String,
    pub description: String,
    /// Matched as plain substrings, in order. Stored lower-case.
    pub keywords: Vec<String>,
}

impl CategoryDefinition {
    pub fn new(
        id: &str,
        name: &str,
        localized_name: &str,
        description: &str,
        keywords: &[&str],
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            localized_name: localized_name.to_string(),
            description: description.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// The catch-all entry for points that matched no keyword.
    pub fn other() -> Self {
        Self::new(
            OTHER_CATEGORY_ID,
            "Other",
            "その他",
            "Uncategorized points",
            &[],
        )
    }
}

/// An ordered, immutable list of category definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    categories: Vec<CategoryDefinition>,
}

impl Taxonomy {
    pub fn new(categories: Vec<CategoryDefinition>) -> Self {
        Self { categories }
    }

    /// The built-in eleven categories, in matching order.
    pub fn standard() -> Self {
        Self::new(vec![
            CategoryDefinition::new(
                "data_collection",
                "Data Collection",
                "データ収集",
                "What personal data is collected",
                &[
                    "collect",
                    "gather",
                    "obtain",
                    "access",
                    "receive",
                    "track",
                    "log",
                    "record",
                    "store",
                    "information you provide",
                ],
            ),
            CategoryDefinition::new(
                "third_party_sharing",
                "Third Party Sharing",
                "第三者共有",
                "How data is shared with others",
                &[
                    "share",
                    "disclose",
                    "third party",
                    "third-party",
                    "partner",
                    "advertiser",
                    "affiliate",
                    "transfer",
                    "sell your",
                    "sold to",
                ],
            ),
            CategoryDefinition::new(
                "data_retention",
                "Data Retention",
                "データ保持",
                "How long data is kept",
                &[
                    "retain",
                    "keep",
                    "store",
                    "delete",
                    "removal",
                    "expire",
                    "lifetime",
                    "permanent",
                    "indefinite",
                ],
            ),
            CategoryDefinition::new(
                "user_rights",
                "User Rights",
                "ユーザー権利",
                "User control over their data",
                &[
                    "opt-out",
                    "opt out",
                    "delete your",
                    "access your",
                    "export",
                    "download your data",
                    "correct",
                    "modify",
                    "rights",
                    "request deletion",
                    "gdpr",
                    "ccpa",
                ],
            ),
            CategoryDefinition::new(
                "security",
                "Security",
                "セキュリティ",
                "How data is protected",
                &[
                    "encrypt",
                    "secure",
                    "protect",
                    "ssl",
                    "https",
                    "password",
                    "breach",
                    "hack",
                    "security measures",
                ],
            ),
            CategoryDefinition::new(
                "policy_changes",
                "Policy Changes",
                "ポリシー変更",
                "How users are notified of changes",
                &[
                    "change",
                    "modify terms",
                    "update",
                    "notify",
                    "notice",
                    "amend",
                    "revise",
                    "without notice",
                ],
            ),
            CategoryDefinition::new(
                "legal",
                "Legal & Jurisdiction",
                "法的事項",
                "Legal terms and jurisdiction",
                &[
                    "jurisdiction",
                    "arbitration",
                    "waive",
                    "lawsuit",
                    "court",
                    "legal",
                    "binding",
                    "class action",
                    "dispute",
                ],
            ),
            CategoryDefinition::new(
                "advertising",
                "Advertising",
                "広告",
                "Targeted advertising practices",
                &[
                    "advertis",
                    "target",
                    "personali",
                    "marketing",
                    "promotional",
                    "behavioral",
                ],
            ),
            CategoryDefinition::new(
                "cookies",
                "Cookies & Tracking",
                "Cookie・トラッキング",
                "Use of cookies and tracking technologies",
                &[
                    "cookie",
                    "tracking",
                    "tracks",
                    "pixel",
                    "beacon",
                    "analytics",
                    "fingerprint",
                ],
            ),
            CategoryDefinition::new(
                "children",
                "Children's Privacy",
                "子どものプライバシー",
                "Handling of data belonging to minors",
                &[
                    "children",
                    "child",
                    "minors",
                    "under 13",
                    "under the age",
                    "parental",
                    "coppa",
                ],
            ),
            CategoryDefinition::new(
                "content_rights",
                "Content & Ownership",
                "コンテンツの権利",
                "Rights the service claims over user content",
                &[
                    "your content",
                    "user content",
                    "copyright",
                    "intellectual property",
                    "royalty",
                    "license to",
                    "ownership",
                ],
            ),
        ])
    }

    /// Definitions in matching order, without the catch-all.
    pub fn categories(&self) -> &[CategoryDefinition] {
        &self.categories
    }

    /// Every category id the output can contain: the table order, then `other`.
    pub fn ids_with_other(&self) -> Vec<&str> {
        self.categories
            .iter()
            .map(|c| c.id.as_str())
            .chain(std::iter::once(OTHER_CATEGORY_ID))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::standard()
    }
}
