use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::feed::SourceKind;
use crate::summary::ExcerptStyle;

/// Hard cap on rendered entries
pub const MAX_ITEMS: usize = 5;

pub const DEFAULT_GRAPHQL_QUERY: &str = r#"query($owner: String!, $name: String!, $categoryId: ID, $first: Int!) {
  repository(owner: $owner, name: $name) {
    discussions(first: $first, categoryId: $categoryId, orderBy: {field: CREATED_AT, direction: DESC}) {
      nodes { id title url createdAt bodyText category { id slug } }
    }
  }
}"#;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Page rendered by `weeklyfeed render` when no --page is given
    #[serde(default)]
    pub page_path: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            page_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Upstream kind: "rss", "graphql" or "rest"
    #[serde(default = "default_source_kind")]
    pub kind: String,
    /// Feed URL, GraphQL endpoint or REST collection URL
    #[serde(default = "default_source_url")]
    pub url: String,
    /// GraphQL document (graphql only)
    #[serde(default)]
    pub query: Option<String>,
    /// GraphQL variables (graphql only)
    #[serde(default)]
    pub variables: Option<serde_json::Value>,
    /// Category slug or id the records must belong to
    #[serde(default = "default_category")]
    pub category: String,
    /// How each entry's preview line is produced
    #[serde(default)]
    pub excerpt: ExcerptStyle,
    /// Word limit for the "words" excerpt style
    #[serde(default = "default_max_words")]
    pub max_words: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: default_source_kind(),
            url: default_source_url(),
            query: None,
            variables: None,
            category: default_category(),
            excerpt: ExcerptStyle::default(),
            max_words: default_max_words(),
        }
    }
}

impl SourceConfig {
    /// Resolve the configured upstream into its tagged form
    pub fn source_kind(&self) -> crate::Result<SourceKind> {
        url::Url::parse(&self.url)?;

        match self.kind.as_str() {
            "rss" => Ok(SourceKind::Rss {
                url: self.url.clone(),
            }),
            "graphql" => Ok(SourceKind::GraphQl {
                endpoint: self.url.clone(),
                query: self
                    .query
                    .clone()
                    .unwrap_or_else(|| DEFAULT_GRAPHQL_QUERY.to_string()),
                variables: self.graphql_variables(),
            }),
            "rest" => Ok(SourceKind::Rest {
                url: self.url.clone(),
            }),
            other => Err(crate::Error::Config(format!(
                "Unknown source kind '{}', expected one of: rss, graphql, rest",
                other
            ))),
        }
    }

    /// Variables sent with the GraphQL query.
    ///
    /// The built-in query needs `$owner`, `$name` and `$first`; configured
    /// values override the defaults key by key.
    fn graphql_variables(&self) -> serde_json::Value {
        if self.query.is_some() {
            return self
                .variables
                .clone()
                .unwrap_or_else(|| serde_json::json!({}));
        }

        let mut variables = default_graphql_variables();
        if let (Some(serde_json::Value::Object(custom)), serde_json::Value::Object(merged)) =
            (&self.variables, &mut variables)
        {
            for (key, value) in custom {
                merged.insert(key.clone(), value.clone());
            }
        }
        variables
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Number of entries to keep (clamped to 1..=5)
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
        }
    }
}

impl FeedConfig {
    pub fn item_cap(&self) -> usize {
        self.max_items.clamp(1, MAX_ITEMS)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds (0 = no timeout)
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Id of the element that receives the fragment
    #[serde(default = "default_container_id")]
    pub container_id: String,
    #[serde(default = "default_heading")]
    pub heading: String,
    /// Shown on failure or when there is nothing to list
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
    #[serde(default = "default_view_all_url")]
    pub view_all_url: String,
    #[serde(default = "default_view_all_label")]
    pub view_all_label: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            container_id: default_container_id(),
            heading: default_heading(),
            fallback_message: default_fallback_message(),
            view_all_url: default_view_all_url(),
            view_all_label: default_view_all_label(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_source_kind() -> String {
    "rss".to_string()
}

fn default_source_url() -> String {
    "https://github.com/fvutils/fvutils.github.io/discussions.rss".to_string()
}

fn default_category() -> String {
    "weekly-updates".to_string()
}

/// Same repository as the default RSS feed
fn default_graphql_variables() -> serde_json::Value {
    serde_json::json!({
        "owner": "fvutils",
        "name": "fvutils.github.io",
        "first": 20,
    })
}

fn default_max_words() -> usize {
    crate::summary::DEFAULT_EXCERPT_WORDS
}

fn default_max_items() -> usize {
    MAX_ITEMS
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("weeklyfeed/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_container_id() -> String {
    "weekly-updates-container".to_string()
}

fn default_heading() -> String {
    "Weekly Updates".to_string()
}

fn default_fallback_message() -> String {
    "Check back soon for updates on FVUtils projects!".to_string()
}

fn default_view_all_url() -> String {
    "https://github.com/fvutils/fvutils.github.io/discussions/categories/weekly-updates".to_string()
}

fn default_view_all_label() -> String {
    "View all updates →".to_string()
}

/// Expand tilde (~) in path to user's home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default location or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, falling back to defaults if it does not exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let path = expand_tilde(path);

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Self::from_toml(&content)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/weeklyfeed/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("weeklyfeed")
            .join("config.toml")
    }

    /// Configured page path (with tilde expansion)
    pub fn page_path(&self) -> Option<PathBuf> {
        self.general.page_path.as_deref().map(expand_tilde)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_site() {
        let config = AppConfig::default();
        assert_eq!(config.source.kind, "rss");
        assert_eq!(config.source.category, "weekly-updates");
        assert_eq!(config.source.max_words, 30);
        assert_eq!(config.feed.item_cap(), 5);
        assert_eq!(config.render.container_id, "weekly-updates-container");
        assert_eq!(config.render.heading, "Weekly Updates");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
[source]
kind = "rest"
url = "https://api.github.com/repos/fvutils/fvutils.github.io/discussions"
excerpt = "activity_report"

[feed]
max_items = 12
"#,
        )
        .unwrap();

        assert_eq!(config.source.kind, "rest");
        assert_eq!(config.source.excerpt, ExcerptStyle::ActivityReport);
        assert_eq!(config.source.category, "weekly-updates");
        assert_eq!(config.feed.item_cap(), MAX_ITEMS);
        assert_eq!(config.http.request_timeout_secs, 30);
    }

    #[test]
    fn test_graphql_source_kind_uses_default_query() {
        let config = AppConfig::from_toml(
            r#"
[source]
kind = "graphql"
url = "https://api.github.com/graphql"
category = "DIC_kwDOExample"

[source.variables]
owner = "fvutils"
name = "fvutils.github.io"
first = 20
"#,
        )
        .unwrap();

        match config.source.source_kind().unwrap() {
            SourceKind::GraphQl {
                endpoint,
                query,
                variables,
            } => {
                assert_eq!(endpoint, "https://api.github.com/graphql");
                assert_eq!(query, DEFAULT_GRAPHQL_QUERY);
                assert_eq!(variables["owner"], "fvutils");
                assert_eq!(variables["first"], 20);
            }
            other => panic!("unexpected source kind: {:?}", other),
        }
    }

    #[test]
    fn test_graphql_default_query_gets_its_variables() {
        let mut config = AppConfig::default();
        config.source.kind = "graphql".to_string();
        config.source.url = "https://api.github.com/graphql".to_string();

        let SourceKind::GraphQl { variables, .. } = config.source.source_kind().unwrap() else {
            panic!("expected a graphql source");
        };
        assert_eq!(variables["owner"], "fvutils");
        assert_eq!(variables["name"], "fvutils.github.io");
        assert_eq!(variables["first"], 20);

        // Partial overrides keep the remaining defaults
        config.source.variables = Some(serde_json::json!({ "first": 50, "categoryId": "DIC_1" }));
        let SourceKind::GraphQl { variables, .. } = config.source.source_kind().unwrap() else {
            panic!("expected a graphql source");
        };
        assert_eq!(variables["owner"], "fvutils");
        assert_eq!(variables["first"], 50);
        assert_eq!(variables["categoryId"], "DIC_1");
    }

    #[test]
    fn test_graphql_custom_query_sends_only_configured_variables() {
        let mut config = AppConfig::default();
        config.source.kind = "graphql".to_string();
        config.source.url = "https://api.github.com/graphql".to_string();
        config.source.query = Some("query { viewer { login } }".to_string());

        let SourceKind::GraphQl { variables, .. } = config.source.source_kind().unwrap() else {
            panic!("expected a graphql source");
        };
        assert_eq!(variables, serde_json::json!({}));
    }

    #[test]
    fn test_unknown_source_kind_is_rejected() {
        let mut config = AppConfig::default();
        config.source.kind = "atom".to_string();
        assert!(matches!(
            config.source.source_kind(),
            Err(crate::Error::Config(_))
        ));
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let mut config = AppConfig::default();
        config.source.url = "not a url".to_string();
        assert!(matches!(
            config.source.source_kind(),
            Err(crate::Error::UrlParse(_))
        ));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config =
            AppConfig::load_from(Path::new("/nonexistent/weeklyfeed/config.toml")).unwrap();
        assert_eq!(config.source.url, default_source_url());
    }
}
