mod excerpt;
mod report;

use serde::{Deserialize, Serialize};

pub use excerpt::{summarize, DEFAULT_EXCERPT_WORDS};
pub use report::{summarize_report, NO_ACTIVITY_SUMMARY};

/// How the one-line preview of an entry is produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExcerptStyle {
    /// First N words of the body text
    #[default]
    Words,
    /// Commit / pull request counts parsed out of an activity report
    ActivityReport,
}

impl ExcerptStyle {
    pub fn excerpt(&self, source: &str, max_words: usize) -> String {
        match self {
            ExcerptStyle::Words => summarize(source, max_words),
            ExcerptStyle::ActivityReport => summarize_report(source),
        }
    }
}
