use serde::{Deserialize, Serialize};

/// How article bodies are located and cleaned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// CSS selectors tried in order; the first match is the article body
    pub content_selectors: Vec<String>,

    /// Fallback when no selector matches: first `<div>` with a class matching this regex
    pub fallback_class_pattern: String,

    /// Tag names whose whole subtree is skipped
    pub remove_tags: Vec<String>,

    /// Elements with a class matching this regex are skipped with their subtree
    pub noise_class_pattern: String,

    /// Lines must be longer than this many characters to be kept (default: 10)
    pub min_line_length: usize,

    /// Text beyond this many characters is cut off (default: 10000)
    pub max_content_length: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            content_selectors: vec![
                "div.entry-content".to_string(),
                "div.post-content".to_string(),
                "div.article-content".to_string(),
                "div.content".to_string(),
                "article".to_string(),
                "main".to_string(),
            ],
            fallback_class_pattern: "content|entry|post|article".to_string(),
            remove_tags: vec![
                "script".to_string(),
                "style".to_string(),
                "nav".to_string(),
                "footer".to_string(),
                "header".to_string(),
                "aside".to_string(),
            ],
            noise_class_pattern: "ads|advertisement|sponsor|promo".to_string(),
            min_line_length: 10,
            max_content_length: 10000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = ContentConfig::default();
        assert_eq!(config.content_selectors.len(), 6);
        assert_eq!(config.content_selectors[0], "div.entry-content");
        assert_eq!(config.content_selectors[5], "main");
        assert!(config.remove_tags.contains(&"aside".to_string()));
        assert_eq!(config.min_line_length, 10);
        assert_eq!(config.max_content_length, 10000);
    }

    #[test]
    fn test_partial_override() {
        let config: ContentConfig = toml::from_str("max_content_length = 500").unwrap();
        assert_eq!(config.max_content_length, 500);
        assert_eq!(config.fallback_class_pattern, "content|entry|post|article");
    }
}
