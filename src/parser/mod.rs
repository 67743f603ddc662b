//! Front-page parsing: turns the site's HTML into candidate articles.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::app::{NakedcapError, Result};
use crate::domain::DiscoveredArticle;

/// Titles this short (in characters) or shorter are navigation, not articles.
const MIN_TITLE_CHARS: usize = 15;

/// Lowercase fragments that mark a link as comment/pagination chrome.
const TITLE_DENYLIST: &[&str] = &[
    "comment",
    "comments",
    "older entries",
    "←",
    "topics:",
    "posted by",
];

const CONTAINER_SELECTORS: &[&str] = &["div#content", "main"];
const AUTHOR_SELECTORS: &[&str] = &["span.author", "em"];
const DATE_SELECTORS: &[&str] = &["span.date", "time"];

pub(crate) fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| NakedcapError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn parse_selectors(selectors: &[&str]) -> Result<Vec<Selector>> {
    selectors.iter().map(|s| parse_selector(s)).collect()
}

pub struct ListParser {
    base_url: Url,
    domain: String,
    containers: Vec<Selector>,
    links: Selector,
    authors: Vec<Selector>,
    dates: Vec<Selector>,
}

impl ListParser {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let domain = base_url
            .host_str()
            .map(|h| h.trim_start_matches("www.").to_lowercase())
            .ok_or_else(|| NakedcapError::Config(format!("Base URL has no host: {}", base_url)))?;

        Ok(Self {
            base_url,
            domain,
            containers: parse_selectors(CONTAINER_SELECTORS)?,
            links: parse_selector("a[href]")?,
            authors: parse_selectors(AUTHOR_SELECTORS)?,
            dates: parse_selectors(DATE_SELECTORS)?,
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Extract candidate articles in document order. Duplicates are kept;
    /// the store deduplicates by URL.
    pub fn parse(&self, html: &str) -> Vec<DiscoveredArticle> {
        let document = Html::parse_document(html);

        let Some(container) = self
            .containers
            .iter()
            .find_map(|sel| document.select(sel).next())
        else {
            debug!("No main content container found");
            return Vec::new();
        };

        let articles: Vec<DiscoveredArticle> = container
            .select(&self.links)
            .filter_map(|link| self.candidate(link))
            .collect();

        debug!(count = articles.len(), "Parsed article links");
        articles
    }

    fn candidate(&self, link: ElementRef) -> Option<DiscoveredArticle> {
        let href = link.value().attr("href")?.trim();
        if href.is_empty() || href.starts_with('#') {
            return None;
        }

        let title = element_text(link);
        if !is_article_title(&title) {
            return None;
        }

        let url = self.base_url.join(href).ok()?;
        if !self.is_on_domain(&url) {
            return None;
        }

        let mut article = DiscoveredArticle::new(title, url.to_string());

        if let Some(parent) = link.parent().and_then(ElementRef::wrap) {
            if let Some(author) = first_text(parent, &self.authors) {
                article.author = author;
            }
            if let Some(date) = first_text(parent, &self.dates) {
                article.date_posted = date;
            }
        }

        Some(article)
    }

    fn is_on_domain(&self, url: &Url) -> bool {
        match url.host_str() {
            Some(host) => {
                let host = host.to_lowercase();
                host == self.domain || host.ends_with(&format!(".{}", self.domain))
            }
            None => false,
        }
    }
}

fn is_article_title(title: &str) -> bool {
    if title.chars().count() <= MIN_TITLE_CHARS {
        return false;
    }
    let lower = title.to_lowercase();
    !TITLE_DENYLIST.iter().any(|word| lower.contains(word))
}

/// Text fragments of an element, trimmed and joined with single spaces.
fn element_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of the first element matching any selector, in selector priority.
/// Empty text counts as missing.
fn first_text(scope: ElementRef, selectors: &[Selector]) -> Option<String> {
    selectors
        .iter()
        .find_map(|sel| scope.select(sel).next())
        .map(element_text)
        .filter(|text| !text.is_empty())
}
