//! Markdown rendering of stored articles.

pub mod tags;

use chrono::{DateTime, Local, NaiveDate};
use html_escape::decode_html_entities;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use url::Url;

use crate::domain::{today, Article};

pub const FALLBACK_SOURCE: &str = "nakedcapitalism.com";

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%B %d, %Y"];

const SUMMARY_SENTENCES: usize = 3;
const MIN_SENTENCE_CHARS: usize = 20;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static DISALLOWED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[^\w\s\-.,!?():;"'@#$%&*+=<>/\\|~`]"#).unwrap());
static SENTENCE_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

#[derive(Debug, Clone, Serialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub author: String,
    pub date: String,
    pub source: String,
    pub url: String,
    pub tags: Vec<String>,
    pub category: String,
    pub word_count: usize,
    pub has_full_content: bool,
    pub content_length: usize,
    pub converted_at: DateTime<Local>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormattedDocument {
    pub metadata: DocumentMetadata,
    pub body: String,
}

pub fn format_document(article: &Article, full_text: Option<&str>) -> FormattedDocument {
    format_document_at(article, full_text, Local::now())
}

/// Same as [`format_document`] with a fixed conversion timestamp.
pub fn format_document_at(
    article: &Article,
    full_text: Option<&str>,
    converted_at: DateTime<Local>,
) -> FormattedDocument {
    let full_text = full_text.filter(|t| !t.trim().is_empty());
    let title = clean_text(&article.title);

    let metadata = DocumentMetadata {
        author: clean_text(&article.author),
        date: format_date(&article.date_posted),
        source: source_of(&article.url),
        url: article.url.clone(),
        tags: tags::generate_tags(&title),
        category: tags::categorize(&title).to_string(),
        word_count: full_text.unwrap_or(title.as_str()).split_whitespace().count(),
        has_full_content: full_text.is_some(),
        content_length: full_text.map_or(0, |t| t.chars().count()),
        converted_at,
        title,
    };

    let body = render_body(&metadata, full_text);
    FormattedDocument { metadata, body }
}

/// Decode entities, strip tags, collapse whitespace and drop unusual symbols.
pub fn clean_text(text: &str) -> String {
    let decoded = decode_html_entities(text);
    let untagged = TAG_RE.replace_all(&decoded, "");
    let collapsed = WHITESPACE_RE.replace_all(&untagged, " ");
    DISALLOWED_RE.replace_all(&collapsed, "").trim().to_string()
}

/// Normalize a scraped date to `YYYY-MM-DD`. Unrecognized dates pass through.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return today();
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn source_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| FALLBACK_SOURCE.to_string())
}

/// First few sentences long enough to carry meaning.
pub fn summarize(text: &str) -> Option<String> {
    let sentences: Vec<&str> = SENTENCE_END_RE
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .take(SUMMARY_SENTENCES)
        .collect();

    if sentences.is_empty() {
        return None;
    }
    Some(format!("{}.", sentences.join(". ")))
}

fn render_body(meta: &DocumentMetadata, full_text: Option<&str>) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push(format!("# {}", meta.title));
    parts.push(String::new());

    parts.push("## Article Information".into());
    parts.push(format!("**Author:** {}", meta.author));
    parts.push(format!("**Date:** {}", meta.date));
    parts.push(format!("**Source:** {}", meta.source));
    parts.push(format!("**Category:** {}", meta.category));
    parts.push(format!("**Tags:** {}", meta.tags.join(", ")));
    parts.push(String::new());

    parts.push("## Summary".into());
    match full_text.and_then(summarize) {
        Some(summary) => parts.push(summary),
        None => parts.push(format!(
            "*This article from {} discusses {}*",
            meta.source,
            tags::topic_phrase(&meta.title)
        )),
    }
    parts.push(String::new());

    parts.push("## Full Text".into());
    match full_text {
        Some(text) => parts.push(text.to_string()),
        None => parts.push(format!(
            "*Full text is not available. Read the original article on {}.*",
            meta.source
        )),
    }
    parts.push(String::new());

    parts.push("## References".into());
    parts.push(format!(
        "[Read full article on {}]({})",
        meta.source, meta.url
    ));
    parts.push(String::new());

    parts.push("## Tags".into());
    parts.extend(meta.tags.iter().map(|tag| format!("#{}", tag)));
    parts.push(String::new());

    parts.push("---".into());
    parts.push(format!("**Original URL:** {}", meta.url));
    parts.push(format!(
        "**Converted:** {}",
        meta.converted_at.format("%Y-%m-%d %H:%M:%S")
    ));
    parts.push(format!("**Word Count:** {}", meta.word_count));

    parts.join("\n")
}
