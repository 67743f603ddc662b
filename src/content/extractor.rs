use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::app::Result;
use crate::content::ContentConfig;
use crate::parser::parse_selector;

const MARKER_TEXT: &str = "[content truncated]";
pub const TRUNCATION_MARKER: &str = "\n\n[content truncated]";

/// Locates the article body in a page and flattens it to clean lines.
pub struct ContentExtractor {
    content_selectors: Vec<Selector>,
    fallback_divs: Selector,
    fallback_class: Regex,
    remove_tags: Vec<String>,
    noise_class: Regex,
    min_line_length: usize,
    max_content_length: usize,
}

impl ContentExtractor {
    pub fn new(config: &ContentConfig) -> Result<Self> {
        let content_selectors = config
            .content_selectors
            .iter()
            .map(|s| parse_selector(s))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            content_selectors,
            fallback_divs: parse_selector("div[class]")?,
            fallback_class: Regex::new(&config.fallback_class_pattern)?,
            remove_tags: config
                .remove_tags
                .iter()
                .map(|t| t.to_lowercase())
                .collect(),
            noise_class: Regex::new(&config.noise_class_pattern)?,
            min_line_length: config.min_line_length,
            max_content_length: config.max_content_length,
        })
    }

    /// Returns `None` when no body container is found or nothing survives cleaning.
    pub fn extract(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        let container = self.find_container(&document)?;

        let mut fragments = Vec::new();
        self.collect_text(container, &mut fragments);

        let text = fragments
            .into_iter()
            .flat_map(str::lines)
            .map(strip_marker)
            .filter(|line| line.chars().count() > self.min_line_length)
            .collect::<Vec<_>>()
            .join("\n");

        if text.is_empty() {
            return None;
        }

        Some(self.truncate(text))
    }

    fn find_container<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        self.content_selectors
            .iter()
            .find_map(|sel| document.select(sel).next())
            .or_else(|| {
                document
                    .select(&self.fallback_divs)
                    .find(|div| div.value().classes().any(|c| self.fallback_class.is_match(c)))
            })
    }

    fn collect_text<'a>(&self, element: ElementRef<'a>, out: &mut Vec<&'a str>) {
        for child in element.children() {
            if let Some(text) = child.value().as_text() {
                let text: &'a str = text;
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    out.push(trimmed);
                }
            } else if let Some(child) = ElementRef::wrap(child) {
                if !self.is_noise(child) {
                    self.collect_text(child, out);
                }
            }
        }
    }

    fn is_noise(&self, element: ElementRef) -> bool {
        let el = element.value();
        self.remove_tags.iter().any(|t| t == el.name())
            || el.classes().any(|c| self.noise_class.is_match(c))
    }

    fn truncate(&self, text: String) -> String {
        match text.char_indices().nth(self.max_content_length) {
            Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
            None => text,
        }
    }
}

/// Trim a line and drop any literal truncation marker the page itself carries,
/// so only the one appended by `truncate` can appear in the output.
fn strip_marker(line: &str) -> String {
    let mut line = line.trim().to_string();
    while line.contains(MARKER_TEXT) {
        line = line.replace(MARKER_TEXT, "");
    }
    line.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ContentExtractor {
        ContentExtractor::new(&ContentConfig::default()).unwrap()
    }

    #[test]
    fn test_extracts_entry_content_lines() {
        let html = r#"<html><body>
            <div class="entry-content">
              <p>The Federal Reserve raised rates again this week.</p>
              <p>Short one</p>
              <p>Markets reacted with the usual <a href="/x">hand wringing</a> and noise.</p>
            </div>
        </body></html>"#;

        // Inline elements split text nodes, so "and noise." ends up too short.
        let text = extractor().extract(html).unwrap();
        assert_eq!(
            text,
            "The Federal Reserve raised rates again this week.\n\
             Markets reacted with the usual\n\
             hand wringing"
        );
        assert!(!text.contains("Short one"));
    }

    #[test]
    fn test_selector_priority() {
        let html = r#"<html><body>
            <article><p>Text from the article element itself.</p></article>
            <div class="post-content"><p>Text from the post content div.</p></div>
        </body></html>"#;

        let text = extractor().extract(html).unwrap();
        assert_eq!(text, "Text from the post content div.");
    }

    #[test]
    fn test_fallback_class_match() {
        let html = r#"<html><body>
            <div class="sidebar"><p>Sidebar text that is long enough.</p></div>
            <div class="wide single-post-body"><p>Body found through the fallback.</p></div>
        </body></html>"#;

        let text = extractor().extract(html).unwrap();
        assert_eq!(text, "Body found through the fallback.");
    }

    #[test]
    fn test_no_container_is_none() {
        let html = r#"<html><body><div class="sidebar"><p>Nothing to see in here at all.</p></div></body></html>"#;
        assert!(extractor().extract(html).is_none());
    }

    #[test]
    fn test_nav_and_script_only_is_none() {
        let html = r#"<html><body><div class="entry-content">
            <nav><a href="/">Home page of the whole website</a></nav>
            <script>var tracking = "something long enough";</script>
        </div></body></html>"#;
        assert!(extractor().extract(html).is_none());
    }

    #[test]
    fn test_noise_subtrees_skipped() {
        let html = r#"<html><body><div class="entry-content">
            <p>First paragraph of the real article.</p>
            <div class="promo-box"><p>Subscribe now for exclusive offers!</p></div>
            <aside><p>Related reading you might enjoy.</p></aside>
            <footer><p>Copyright notice for the site.</p></footer>
            <p>Second paragraph of the real article.</p>
        </div></body></html>"#;

        let text = extractor().extract(html).unwrap();
        assert_eq!(
            text,
            "First paragraph of the real article.\nSecond paragraph of the real article."
        );
    }

    #[test]
    fn test_truncation_marker_once() {
        let config = ContentConfig {
            max_content_length: 50,
            ..Default::default()
        };
        let extractor = ContentExtractor::new(&config).unwrap();
        let paragraphs: String = (0..20)
            .map(|i| format!("<p>Paragraph number {} of a very long article.</p>", i))
            .collect();
        let html = format!("<div class=\"entry-content\">{}</div>", paragraphs);

        let text = extractor.extract(&html).unwrap();
        assert!(text.ends_with(TRUNCATION_MARKER));
        assert_eq!(text.matches("[content truncated]").count(), 1);
        assert_eq!(text.chars().count(), 50 + TRUNCATION_MARKER.chars().count());
    }

    #[test]
    fn test_marker_in_page_text_not_duplicated() {
        let config = ContentConfig {
            max_content_length: 60,
            ..Default::default()
        };
        let extractor = ContentExtractor::new(&config).unwrap();
        let html = r#"<div class="entry-content">
            <p>Editor note: [content truncated] by the CMS.</p>
            <p>More paragraphs follow after the editor note here.</p>
            <p>And another paragraph to push past the cap.</p>
        </div>"#;

        let text = extractor.extract(html).unwrap();
        assert!(text.starts_with("Editor note:  by the CMS."));
        assert!(text.ends_with(TRUNCATION_MARKER));
        assert_eq!(text.matches(MARKER_TEXT).count(), 1);
    }

    #[test]
    fn test_marker_alone_is_no_content() {
        let html = r#"<div class="entry-content"><p>[content truncated]</p></div>"#;
        assert!(extractor().extract(html).is_none());
    }

    #[test]
    fn test_nested_marker_text_removed() {
        let html = r#"<div class="entry-content">
            <p>Start [content [content truncated]truncated] end of the line.</p>
        </div>"#;
        let text = extractor().extract(html).unwrap();
        assert_eq!(text, "Start  end of the line.");
    }

    #[test]
    fn test_short_text_not_truncated() {
        let html = r#"<div class="entry-content"><p>Just one modest paragraph.</p></div>"#;
        let text = extractor().extract(html).unwrap();
        assert!(!text.contains("[content truncated]"));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let config = ContentConfig {
            max_content_length: 12,
            ..Default::default()
        };
        let extractor = ContentExtractor::new(&config).unwrap();
        let html = r#"<div class="entry-content"><p>Ökonomie über alles, für immer.</p></div>"#;

        let text = extractor.extract(html).unwrap();
        assert!(text.starts_with("Ökonomie übe"));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let config = ContentConfig {
            noise_class_pattern: "(unclosed".to_string(),
            ..Default::default()
        };
        assert!(ContentExtractor::new(&config).is_err());

        let config = ContentConfig {
            content_selectors: vec!["div[".to_string()],
            ..Default::default()
        };
        assert!(ContentExtractor::new(&config).is_err());
    }
}
