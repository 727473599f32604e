mod fetcher;
mod loader;
mod models;
mod parser;

pub use fetcher::FeedFetcher;
pub use loader::{select_updates, Loader};
pub use models::{ParsedItem, SourceKind, UpdateRecord};
pub use parser::{parse_feed, parse_graphql, parse_items, parse_rest};
