use chrono::{DateTime, Utc};
use feed_rs::parser;
use serde::Deserialize;

use super::models::{ParsedItem, SourceKind, UpdateRecord};
use crate::error::FetchError;

type ParseResult = std::result::Result<Vec<ParsedItem>, FetchError>;

/// Normalize a response body according to the upstream it came from
pub fn parse_items(source: &SourceKind, content: &[u8]) -> ParseResult {
    match source {
        SourceKind::Rss { .. } => parse_feed(content),
        SourceKind::GraphQl { .. } => parse_graphql(content),
        SourceKind::Rest { .. } => parse_rest(content),
    }
}

/// Parse RSS/Atom feed content. Entries keep feed order.
pub fn parse_feed(content: &[u8]) -> ParseResult {
    let feed = parser::parse(content).map_err(|e| FetchError::Parse(e.to_string()))?;

    let items = feed
        .entries
        .into_iter()
        .map(|entry| {
            let url = entry
                .links
                .first()
                .map(|l| l.href.clone())
                .unwrap_or_default();

            let title = entry.title.map(|t| t.content).unwrap_or_default();

            let excerpt_source = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body))
                .unwrap_or_default();

            let published_at = entry.published.or(entry.updated);

            ParsedItem {
                record: UpdateRecord {
                    title,
                    url,
                    published_at,
                    excerpt_source,
                },
                categories: Vec::new(),
            }
        })
        .collect();

    Ok(items)
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?;
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            tracing::debug!("Ignoring unparsable timestamp '{}': {}", value, e);
            None
        }
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<GraphQlData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlData {
    repository: Option<Repository>,
}

#[derive(Debug, Deserialize)]
struct Repository {
    discussions: DiscussionConnection,
}

#[derive(Debug, Deserialize)]
struct DiscussionConnection {
    #[serde(default)]
    nodes: Vec<Option<DiscussionNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiscussionNode {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    created_at: Option<String>,
    #[serde(default)]
    body_text: String,
    #[serde(default)]
    category: Option<NodeCategory>,
}

#[derive(Debug, Deserialize)]
struct NodeCategory {
    id: Option<String>,
    slug: Option<String>,
}

/// Parse a GraphQL discussions envelope (`data.repository.discussions.nodes`)
pub fn parse_graphql(content: &[u8]) -> ParseResult {
    let response: GraphQlResponse =
        serde_json::from_slice(content).map_err(|e| FetchError::Parse(e.to_string()))?;

    if !response.errors.is_empty() {
        return Err(FetchError::Application(
            response.errors.into_iter().map(|e| e.message).collect(),
        ));
    }

    let discussions = response
        .data
        .and_then(|d| d.repository)
        .map(|r| r.discussions)
        .ok_or_else(|| {
            FetchError::Parse("missing data.repository.discussions in response".to_string())
        })?;

    let items = discussions
        .nodes
        .into_iter()
        .flatten()
        .map(|node| {
            let categories = node
                .category
                .map(|c| c.id.into_iter().chain(c.slug).collect())
                .unwrap_or_default();

            ParsedItem {
                record: UpdateRecord {
                    published_at: parse_timestamp(node.created_at.as_deref()),
                    title: node.title,
                    url: node.url,
                    excerpt_source: node.body_text,
                },
                categories,
            }
        })
        .collect();

    Ok(items)
}

#[derive(Debug, Deserialize)]
struct RestItem {
    #[serde(default)]
    title: String,
    html_url: Option<String>,
    url: Option<String>,
    created_at: Option<String>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    category: Option<RestCategory>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RestCategory {
    Slug(String),
    Object {
        #[serde(default)]
        slug: Option<String>,
        #[serde(default)]
        id: Option<serde_json::Value>,
    },
}

impl RestCategory {
    fn into_keys(self) -> Vec<String> {
        match self {
            RestCategory::Slug(slug) => vec![slug],
            RestCategory::Object { slug, id } => {
                let id = id.and_then(|v| match v {
                    serde_json::Value::String(s) => Some(s),
                    serde_json::Value::Number(n) => Some(n.to_string()),
                    _ => None,
                });
                slug.into_iter().chain(id).collect()
            }
        }
    }
}

/// Parse a REST collection (top-level JSON array)
pub fn parse_rest(content: &[u8]) -> ParseResult {
    let value: serde_json::Value =
        serde_json::from_slice(content).map_err(|e| FetchError::Parse(e.to_string()))?;

    // Error bodies look like {"message": "..."}
    if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
        return Err(FetchError::Application(vec![message.to_string()]));
    }

    let rest_items: Vec<RestItem> =
        serde_json::from_value(value).map_err(|e| FetchError::Parse(e.to_string()))?;

    let items = rest_items
        .into_iter()
        .map(|item| ParsedItem {
            record: UpdateRecord {
                published_at: parse_timestamp(item.created_at.as_deref()),
                url: item.html_url.or(item.url).unwrap_or_default(),
                title: item.title,
                excerpt_source: item.body.unwrap_or_default(),
            },
            categories: item.category.map(RestCategory::into_keys).unwrap_or_default(),
        })
        .collect();

    Ok(items)
}
