//! Activity-report summaries.
//!
//! Weekly reports list commits as bullets anywhere in the body and pull
//! requests as `#N:` bullets under a "Pull Requests" heading. Commits are
//! counted across the whole body while pull requests only count inside their
//! section.

use regex::Regex;
use std::sync::OnceLock;

pub const NO_ACTIVITY_SUMMARY: &str =
    "No commit or pull request activity was recorded this week.";

/// `- Commit a1b2c3d in owner/repo: message`
fn commit_bullet() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?mi)^[ \t]*[-*][ \t]+commit\b[^\n]*?\bin[ \t]+[\w.-]+/[\w.-]+")
            .expect("commit bullet pattern is valid")
    })
}

fn pull_request_heading() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?mi)^#{1,6}[ \t]*pull requests[ \t]*\r?$")
            .expect("pull request heading pattern is valid")
    })
}

fn any_heading() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^#{1,6}[ \t]").expect("heading pattern is valid"))
}

/// `- #42: title`
fn pull_request_bullet() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*[-*][ \t]+#\d+:").expect("pull request bullet pattern is valid")
    })
}

fn count_commits(body: &str) -> usize {
    commit_bullet().find_iter(body).count()
}

/// Body of the "Pull Requests" section, up to the next heading or end of text
fn pull_request_section(body: &str) -> Option<&str> {
    let heading = pull_request_heading().find(body)?;
    let rest = &body[heading.end()..];
    let end = any_heading().find(rest).map_or(rest.len(), |m| m.start());
    Some(&rest[..end])
}

fn count_pull_requests(body: &str) -> usize {
    pull_request_section(body)
        .map(|section| pull_request_bullet().find_iter(section).count())
        .unwrap_or(0)
}

fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// One-sentence summary of a weekly activity report
pub fn summarize_report(body: &str) -> String {
    let commits = count_commits(body);
    let pull_requests = count_pull_requests(body);

    let mut parts = Vec::new();
    if commits > 0 {
        parts.push(pluralize(commits, "commit", "commits"));
    }
    if pull_requests > 0 {
        parts.push(pluralize(pull_requests, "pull request", "pull requests"));
    }

    if parts.is_empty() {
        return NO_ACTIVITY_SUMMARY.to_string();
    }

    format!(
        "This week saw {} across the tracked repositories.",
        parts.join(" and ")
    )
}
