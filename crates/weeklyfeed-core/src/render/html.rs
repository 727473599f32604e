use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::feed::UpdateRecord;

/// Heading plus a static message, used for failures and empty results
pub fn fallback_fragment(heading: &str, message: &str) -> String {
    let mut buf = String::new();
    buf.push_str("\n<div class=\"news-section\">\n");
    buf.push_str(&format!("  <h2>{}</h2>\n", encode_text(heading)));
    buf.push_str(&format!("  <p>{}</p>\n", encode_text(message)));
    buf.push_str("</div>\n");
    buf
}

/// One list entry: date, linked title and preview line
pub fn entry_fragment(record: &UpdateRecord, excerpt: &str) -> String {
    format!(
        "    <li class=\"news-item\">\n      \
         <div class=\"news-date\">{}</div>\n      \
         <h3 class=\"news-title\"><a href=\"{}\">{}</a></h3>\n      \
         <p class=\"news-excerpt\">{}</p>\n    \
         </li>\n",
        encode_text(&record.display_date()),
        encode_double_quoted_attribute(&record.url),
        encode_text(&record.title),
        encode_text(excerpt),
    )
}

/// Full list section. `entries` are already-rendered `<li>` fragments.
pub fn list_fragment(heading: &str, entries: &[String], view_all_url: &str, view_all_label: &str) -> String {
    let mut buf = String::new();
    buf.push_str("\n<div class=\"news-section\">\n");
    buf.push_str(&format!("  <h2>{}</h2>\n", encode_text(heading)));
    buf.push_str("  <ul class=\"news-list\">\n");
    for entry in entries {
        buf.push_str(entry);
    }
    buf.push_str("  </ul>\n");
    buf.push_str(&format!(
        "  <p><a href=\"{}\">{}</a></p>\n",
        encode_double_quoted_attribute(view_all_url),
        encode_text(view_all_label)
    ));
    buf.push_str("</div>\n");
    buf
}
