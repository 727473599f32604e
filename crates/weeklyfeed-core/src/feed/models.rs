use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One weekly update, normalized from whichever upstream produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRecord {
    pub title: String,
    pub url: String,
    /// Missing or unparsable upstream dates sort last
    pub published_at: Option<DateTime<Utc>>,
    /// Raw body the excerpt is derived from (HTML, text or report)
    pub excerpt_source: String,
}

impl UpdateRecord {
    /// Long-form display date, e.g. "January 5, 2025"
    pub fn display_date(&self) -> String {
        self.published_at
            .map(|dt| dt.format("%B %-d, %Y").to_string())
            .unwrap_or_default()
    }
}

/// Upstream the loader talks to
#[derive(Debug, Clone, PartialEq)]
pub enum SourceKind {
    /// RSS/Atom document over GET
    Rss { url: String },
    /// GraphQL query over POST
    GraphQl {
        endpoint: String,
        query: String,
        variables: serde_json::Value,
    },
    /// JSON array over GET
    Rest { url: String },
}

impl SourceKind {
    pub fn url(&self) -> &str {
        match self {
            SourceKind::Rss { url } | SourceKind::Rest { url } => url,
            SourceKind::GraphQl { endpoint, .. } => endpoint,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::Rss { .. } => "rss",
            SourceKind::GraphQl { .. } => "graphql",
            SourceKind::Rest { .. } => "rest",
        }
    }
}

/// A normalized record plus the category markers upstream attached to it
#[derive(Debug, Clone)]
pub struct ParsedItem {
    pub record: UpdateRecord,
    /// Category slugs and ids (empty for feeds, which carry the category in the link)
    pub categories: Vec<String>,
}
