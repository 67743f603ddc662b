//! Keyword tables used to derive tags, categories and topic phrases from a title.
//!
//! All matching is a case-insensitive substring test against the title, so
//! short keywords like `ai` also fire inside longer words.

pub const MAX_TAGS: usize = 10;

pub const BASELINE_TAGS: &[&str] = &["naked-capitalism", "finance", "economics"];

pub const KEYWORD_TAGS: &[(&str, &str)] = &[
    ("trump", "politics"),
    ("economy", "economics"),
    ("finance", "finance"),
    ("bank", "banking"),
    ("market", "markets"),
    ("ai", "technology"),
    ("tech", "technology"),
    ("climate", "environment"),
    ("green", "environment"),
    ("health", "healthcare"),
    ("medical", "healthcare"),
    ("china", "geopolitics"),
    ("russia", "geopolitics"),
    ("war", "geopolitics"),
    ("military", "geopolitics"),
    ("housing", "real-estate"),
    ("real estate", "real-estate"),
    ("commodities", "commodities"),
    ("oil", "energy"),
    ("energy", "energy"),
    ("crypto", "cryptocurrency"),
    ("bitcoin", "cryptocurrency"),
    ("inflation", "macro-economics"),
    ("fed", "federal-reserve"),
    ("federal reserve", "federal-reserve"),
];

pub const DEFAULT_CATEGORY: &str = "general";

/// First rule with any matching keyword wins.
pub const CATEGORY_RULES: &[(&str, &[&str])] = &[
    ("daily-links", &["links", "daily", "roundup"]),
    ("analysis", &["analysis", "report", "study"]),
    ("opinion", &["opinion", "commentary", "view"]),
    ("news", &["news", "breaking", "update"]),
    ("interview", &["interview", "talk", "discussion"]),
];

pub const DEFAULT_TOPIC: &str = "current events and analysis";

/// Topic phrase used in place of a summary when no full text is available.
pub const TOPIC_RULES: &[(&[&str], &str)] = &[
    (&["trump"], "political developments and policy implications"),
    (
        &["economy", "economic", "finance"],
        "economic trends and financial analysis",
    ),
    (
        &["market", "trading", "investment"],
        "market analysis and investment insights",
    ),
    (
        &["ai", "tech", "technology"],
        "technological developments and their implications",
    ),
    (
        &["climate", "environment"],
        "environmental issues and climate policy",
    ),
    (
        &["health", "medical"],
        "healthcare and medical industry developments",
    ),
];

/// Baseline tags followed by keyword tags, first occurrence kept, at most [`MAX_TAGS`].
pub fn generate_tags(title: &str) -> Vec<String> {
    let title = title.to_lowercase();
    let keyword_tags = KEYWORD_TAGS
        .iter()
        .filter(|(keyword, _)| title.contains(keyword))
        .map(|(_, tag)| *tag);

    let mut tags: Vec<String> = Vec::new();
    for tag in BASELINE_TAGS.iter().copied().chain(keyword_tags) {
        if tags.len() == MAX_TAGS {
            break;
        }
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

pub fn categorize(title: &str) -> &'static str {
    let title = title.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| title.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(DEFAULT_CATEGORY)
}

pub fn topic_phrase(title: &str) -> &'static str {
    let title = title.to_lowercase();
    TOPIC_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| title.contains(k)))
        .map(|(_, phrase)| *phrase)
        .unwrap_or(DEFAULT_TOPIC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_always_present() {
        let tags = generate_tags("Nothing Matches Here Whatsoever");
        assert_eq!(tags, vec!["naked-capitalism", "finance", "economics"]);
    }

    #[test]
    fn test_bitcoin_and_trump() {
        let tags = generate_tags("Trump Embraces Bitcoin As Reserve Asset");
        for expected in ["naked-capitalism", "finance", "economics", "politics", "cryptocurrency"] {
            assert!(tags.iter().any(|t| t == expected), "missing {}", expected);
        }
        assert!(tags.len() <= MAX_TAGS);
    }

    #[test]
    fn test_duplicates_removed_in_order() {
        let tags = generate_tags("Oil and Energy Finance");
        assert_eq!(
            tags,
            vec!["naked-capitalism", "finance", "economics", "energy"]
        );
    }

    #[test]
    fn test_capped_at_ten() {
        let tags = generate_tags(
            "Trump Bank Market Tech Climate Health China Housing Commodities Oil Bitcoin Inflation Fed",
        );
        assert_eq!(tags.len(), MAX_TAGS);
        assert_eq!(&tags[..3], BASELINE_TAGS);
    }

    #[test]
    fn test_case_insensitive() {
        assert!(generate_tags("FEDERAL RESERVE HOLDS").contains(&"federal-reserve".to_string()));
    }

    #[test]
    fn test_categorize_first_rule_wins() {
        assert_eq!(categorize("Links 10/21/2025"), "daily-links");
        assert_eq!(categorize("Daily Analysis Of Markets"), "daily-links");
        assert_eq!(categorize("A Study Of Private Equity"), "analysis");
        assert_eq!(categorize("Commentary: Why It Fails"), "opinion");
        assert_eq!(categorize("Breaking: Bank Run"), "news");
        assert_eq!(categorize("Talking Shop With An Economist"), "interview");
        // "view" is an opinion keyword and matches first.
        assert_eq!(categorize("An Interview With An Economist"), "opinion");
        assert_eq!(categorize("Private Equity Buys Hospitals"), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_topic_phrase() {
        assert_eq!(
            topic_phrase("Trump And The Economy"),
            "political developments and policy implications"
        );
        assert_eq!(
            topic_phrase("Economic Outlook Darkens"),
            "economic trends and financial analysis"
        );
        assert_eq!(
            topic_phrase("Climate Policy Stalls"),
            "environmental issues and climate policy"
        );
        assert_eq!(topic_phrase("Something Else Entirely"), DEFAULT_TOPIC);
    }
}
