mod html;
mod page;

pub use html::{entry_fragment, fallback_fragment, list_fragment};
pub use page::{HtmlPage, Mount};

use crate::config::AppConfig;
use crate::feed::UpdateRecord;
use crate::summary::ExcerptStyle;

/// Turns a load outcome into the container's HTML
#[derive(Debug, Clone)]
pub struct Renderer {
    container_id: String,
    heading: String,
    fallback_message: String,
    view_all_url: String,
    view_all_label: String,
    excerpt: ExcerptStyle,
    max_words: usize,
}

impl Renderer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            container_id: config.render.container_id.clone(),
            heading: config.render.heading.clone(),
            fallback_message: config.render.fallback_message.clone(),
            view_all_url: config.render.view_all_url.clone(),
            view_all_label: config.render.view_all_label.clone(),
            excerpt: config.source.excerpt,
            max_words: config.source.max_words,
        }
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn fallback(&self) -> String {
        fallback_fragment(&self.heading, &self.fallback_message)
    }

    /// Fragment for an outcome. Failures and empty lists look the same.
    pub fn fragment<E>(&self, outcome: &Result<Vec<UpdateRecord>, E>) -> String {
        match outcome {
            Ok(records) if !records.is_empty() => {
                let entries: Vec<String> = records
                    .iter()
                    .map(|record| {
                        let excerpt = self.excerpt.excerpt(&record.excerpt_source, self.max_words);
                        entry_fragment(record, &excerpt)
                    })
                    .collect();
                list_fragment(&self.heading, &entries, &self.view_all_url, &self.view_all_label)
            }
            _ => self.fallback(),
        }
    }

    /// Write the outcome into the container, replacing whatever was there.
    ///
    /// A missing container is logged and otherwise ignored; returns whether
    /// anything was written.
    pub fn render<M, E>(&self, mount: &mut M, outcome: &Result<Vec<UpdateRecord>, E>) -> bool
    where
        M: Mount + ?Sized,
    {
        self.mount(mount, &self.fragment(outcome))
    }

    /// Replace the container's content with an already built fragment
    pub fn mount<M>(&self, mount: &mut M, fragment: &str) -> bool
    where
        M: Mount + ?Sized,
    {
        if mount.set_inner_html(&self.container_id, fragment) {
            tracing::debug!("Rendered {} bytes into #{}", fragment.len(), self.container_id);
            true
        } else {
            tracing::error!("Container #{} not found", self.container_id);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use chrono::{TimeZone, Utc};

    fn record(title: &str, day: u32, body: &str) -> UpdateRecord {
        UpdateRecord {
            title: title.to_string(),
            url: format!("https://example.com/{}", day),
            published_at: Some(Utc.with_ymd_and_hms(2025, 1, day, 9, 0, 0).unwrap()),
            excerpt_source: body.to_string(),
        }
    }

    fn page() -> HtmlPage {
        HtmlPage::new(
            "<html><body><div id=\"weekly-updates-container\">Loading…</div></body></html>",
        )
    }

    #[test]
    fn test_render_list() {
        let renderer = Renderer::new(&AppConfig::default());
        let mut page = page();
        let outcome: Result<_, FetchError> = Ok(vec![
            record("Week 2", 12, "<p>Second week</p>"),
            record("Week 1", 5, "First week"),
        ]);

        assert!(renderer.render(&mut page, &outcome));

        let inner = page.inner_html("weekly-updates-container").unwrap();
        assert!(inner.contains("<h2>Weekly Updates</h2>"));
        assert!(inner.contains("<div class=\"news-date\">January 12, 2025</div>"));
        assert!(inner.contains("<a href=\"https://example.com/12\">Week 2</a>"));
        assert!(inner.contains("<p class=\"news-excerpt\">Second week</p>"));
        assert!(inner.contains("View all updates →"));
        assert!(inner.find("Week 2").unwrap() < inner.find("Week 1").unwrap());
        assert!(!inner.contains("Loading"));
    }

    #[test]
    fn test_failure_and_empty_render_identically() {
        let renderer = Renderer::new(&AppConfig::default());

        let mut failed = page();
        let failure: Result<Vec<UpdateRecord>, FetchError> =
            Err(FetchError::Parse("bad xml".to_string()));
        assert!(renderer.render(&mut failed, &failure));

        let mut empty = page();
        let nothing: Result<Vec<UpdateRecord>, FetchError> = Ok(Vec::new());
        assert!(renderer.render(&mut empty, &nothing));

        assert_eq!(failed, empty);
        let inner = failed.inner_html("weekly-updates-container").unwrap();
        assert!(inner.contains("Check back soon for updates on FVUtils projects!"));
        assert!(!inner.contains("news-list"));
    }

    #[test]
    fn test_rerender_is_idempotent() {
        let renderer = Renderer::new(&AppConfig::default());
        let outcome: Result<_, FetchError> = Ok(vec![record("Week 1", 5, "First week")]);

        let mut page = page();
        renderer.render(&mut page, &outcome);
        let once = page.clone();
        renderer.render(&mut page, &outcome);

        assert_eq!(page, once);
    }

    #[test]
    fn test_missing_container_is_noop() {
        let renderer = Renderer::new(&AppConfig::default());
        let original = "<html><body><div id=\"other\"></div></body></html>";
        let mut page = HtmlPage::new(original);
        let outcome: Result<_, FetchError> = Ok(vec![record("Week 1", 5, "First week")]);

        assert!(!renderer.render(&mut page, &outcome));
        assert_eq!(page.as_str(), original);
    }

    #[test]
    fn test_activity_report_excerpt() {
        let mut config = AppConfig::default();
        config.source.excerpt = ExcerptStyle::ActivityReport;
        let renderer = Renderer::new(&config);

        let body = "## Commits\n- Commit abc1234 in fvutils/pyvsc: fix\n\n## Pull Requests\n- #3: docs\n";
        let outcome: Result<_, FetchError> = Ok(vec![record("Report", 7, body)]);
        let html = renderer.fragment(&outcome);

        assert!(html.contains(
            "This week saw 1 commit and 1 pull request across the tracked repositories."
        ));
    }
}
