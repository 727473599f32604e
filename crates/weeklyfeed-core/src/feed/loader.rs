use super::fetcher::FeedFetcher;
use super::models::{ParsedItem, SourceKind, UpdateRecord};
use super::parser::parse_items;
use crate::config::AppConfig;
use crate::error::FetchError;
use crate::Result;

/// Fetch, normalize, filter, sort and cap the weekly updates
pub struct Loader {
    fetcher: FeedFetcher,
    source: SourceKind,
    category: String,
    max_items: usize,
}

impl Loader {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            fetcher: FeedFetcher::new(&config.http)?,
            source: config.source.source_kind()?,
            category: config.source.category.clone(),
            max_items: config.feed.item_cap(),
        })
    }

    pub fn source(&self) -> &SourceKind {
        &self.source
    }

    /// Load the current updates.
    ///
    /// A successful request with nothing in the category is `Ok(vec![])`,
    /// never an error.
    pub async fn load(&self) -> std::result::Result<Vec<UpdateRecord>, FetchError> {
        let result = self.try_load().await;

        match &result {
            Ok(records) => tracing::info!(
                "Loaded {} '{}' updates from {}",
                records.len(),
                self.category,
                self.source.url()
            ),
            Err(e) => tracing::error!(
                kind = e.kind(),
                "Failed to load updates from {}: {}",
                self.source.url(),
                e
            ),
        }

        result
    }

    async fn try_load(&self) -> std::result::Result<Vec<UpdateRecord>, FetchError> {
        let content = self.fetcher.fetch(&self.source).await?;
        let items = parse_items(&self.source, &content)?;
        tracing::debug!("Parsed {} upstream items", items.len());
        Ok(select_updates(&self.source, items, &self.category, self.max_items))
    }
}

/// Whether an item belongs to `category`.
///
/// Feeds encode the category in the discussion link; the JSON APIs report it
/// as a slug or id. Matching is exact and case-sensitive.
fn in_category(source: &SourceKind, item: &ParsedItem, category: &str) -> bool {
    match source {
        SourceKind::Rss { .. } => item
            .record
            .url
            .contains(&format!("/categories/{}", category)),
        SourceKind::GraphQl { .. } | SourceKind::Rest { .. } => {
            item.categories.iter().any(|c| c == category)
        }
    }
}

/// Keep the category's items, newest first, at most `max_items`
pub fn select_updates(
    source: &SourceKind,
    items: Vec<ParsedItem>,
    category: &str,
    max_items: usize,
) -> Vec<UpdateRecord> {
    let mut records: Vec<UpdateRecord> = items
        .into_iter()
        .filter(|item| in_category(source, item, category))
        .map(|item| item.record)
        .collect();

    // Stable: equal dates keep upstream order. Undated records go last.
    records.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    records.truncate(max_items);
    records
}
