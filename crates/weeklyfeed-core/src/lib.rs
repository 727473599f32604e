pub mod config;
pub mod error;
pub mod feed;
pub mod pipeline;
pub mod render;
pub mod summary;

pub use config::AppConfig;
pub use error::{Error, FetchError, Result};
pub use pipeline::{run_once, RunReport};
