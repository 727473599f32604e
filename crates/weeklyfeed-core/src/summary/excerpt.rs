use scraper::Html;

pub const DEFAULT_EXCERPT_WORDS: usize = 30;

const ELLIPSIS: &str = "...";

/// Plain-text preview of an HTML or text body.
///
/// Markup is stripped and whitespace collapsed. Text longer than `max_words`
/// words is cut and gets a trailing ellipsis; shorter text comes back whole.
pub fn summarize(source: &str, max_words: usize) -> String {
    let text = html_to_text(source);
    let words: Vec<&str> = text.split_whitespace().collect();

    if words.len() > max_words {
        format!("{}{}", words[..max_words].join(" "), ELLIPSIS)
    } else {
        words.join(" ")
    }
}

/// Text content of an HTML fragment, entities decoded
fn html_to_text(html: &str) -> String {
    Html::parse_fragment(html)
        .root_element()
        .text()
        .collect::<String>()
}
