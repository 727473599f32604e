//! HTML documents that can receive a rendered fragment.
//!
//! The container is located by its `id` attribute and only its inner content is
//! replaced; the rest of the document is left byte-for-byte as it was. The page
//! goes through `lol_html`, so comments, raw-text elements (`<script>`,
//! `<style>`, ...) and quoted or unquoted attributes are tokenized the way a
//! browser would.

use lol_html::html_content::{ContentType, Element};
use lol_html::{element, rewrite_str, RewriteStrSettings};
use std::path::Path;

use crate::Result;

/// Something with named elements whose content can be replaced
pub trait Mount {
    /// Replace the inner HTML of the element with `id`.
    /// Returns false (and changes nothing) when there is no such element.
    fn set_inner_html(&mut self, id: &str, html: &str) -> bool;
}

/// Brackets the container's content while it is read back out
const INNER_START: &str = "<!--weeklyfeed:inner-start-->";
const INNER_END: &str = "<!--weeklyfeed:inner-end-->";

/// An HTML page held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlPage {
    document: String,
}

impl HtmlPage {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
        }
    }

    /// A bare document holding only an empty container
    pub fn with_container(id: &str) -> Self {
        Self::new(format!(
            "<div id=\"{}\"></div>",
            html_escape::encode_double_quoted_attribute(id)
        ))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let document = std::fs::read_to_string(path)?;
        Ok(Self::new(document))
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.document)?;
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.document
    }

    pub fn into_string(self) -> String {
        self.document
    }

    pub fn has_container(&self, id: &str) -> bool {
        self.rewrite_container(id, |_| {}).is_some()
    }

    /// Current inner HTML of the container, if present
    pub fn inner_html(&self, id: &str) -> Option<String> {
        let marked = self.rewrite_container(id, |el| {
            el.prepend(INNER_START, ContentType::Html);
            el.append(INNER_END, ContentType::Html);
        })?;

        let start = marked.find(INNER_START)? + INNER_START.len();
        let end = marked.rfind(INNER_END)?;
        marked.get(start..end).map(str::to_string)
    }

    /// Apply `edit` to the first element whose id is `id` and return the
    /// rewritten document. `None` when there is no such element or it cannot
    /// hold content.
    fn rewrite_container<F>(&self, id: &str, mut edit: F) -> Option<String>
    where
        F: FnMut(&mut Element<'_, '_>),
    {
        // First element carrying the id, and whether it can hold content
        let mut matched: Option<(String, bool)> = None;

        let output = rewrite_str(
            &self.document,
            RewriteStrSettings {
                element_content_handlers: vec![element!("[id]", |el| {
                    if matched.is_some() || el.get_attribute("id").as_deref() != Some(id) {
                        return Ok(());
                    }

                    let can_have_content = el.can_have_content();
                    matched = Some((el.tag_name(), can_have_content));
                    if can_have_content {
                        edit(el);
                    }
                    Ok(())
                })],
                ..RewriteStrSettings::new()
            },
        );

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!("Failed to rewrite page: {}", e);
                return None;
            }
        };

        match matched {
            Some((_, true)) => Some(output),
            Some((tag, false)) => {
                tracing::warn!("Element #{} is a <{}/> and cannot hold content", id, tag);
                None
            }
            None => None,
        }
    }
}

impl Mount for HtmlPage {
    fn set_inner_html(&mut self, id: &str, html: &str) -> bool {
        match self.rewrite_container(id, |el| el.set_inner_content(html, ContentType::Html)) {
            Some(document) => {
                self.document = document;
                true
            }
            None => false,
        }
    }
}
