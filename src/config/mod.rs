//! Configuration for nakedcap.
//!
//! Configuration is read from `~/.config/nakedcap/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::content::ContentConfig;

pub const DEFAULT_BASE_URL: &str = "https://www.nakedcapitalism.com/";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database file. Defaults to `<data_dir>/nakedcap/articles.db`.
    pub database_path: Option<PathBuf>,
    pub site: SiteConfig,
    pub content: ContentConfig,
    pub convert: ConvertConfig,
}

/// The monitored website and how to talk to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}

impl SiteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Pause between consecutive full-text fetches in milliseconds (default: 2000)
    pub batch_delay_ms: u64,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            batch_delay_ms: 2000,
        }
    }
}

impl ConvertConfig {
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }
}

impl Config {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`.
    ///
    /// If the file doesn't exist, a commented default is written there first.
    /// Missing fields in an existing file use default values.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::create_default_config(path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// `~/.config/nakedcap/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("nakedcap").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> String {
        r##"# nakedcap configuration
#
# Every field is optional. Remove a line to fall back to the built-in default.

# SQLite database holding discovered articles.
# Defaults to <data_dir>/nakedcap/articles.db
# database_path = "/home/me/.local/share/nakedcap/articles.db"

[site]
# Front page polled by `nakedcap check`
base_url = "https://www.nakedcapitalism.com/"

# Sent with every request
user_agent = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"

# Request timeout in seconds
timeout_secs = 30

[content]
# CSS selectors tried in order to find the article body
content_selectors = [
    "div.entry-content",
    "div.post-content",
    "div.article-content",
    "div.content",
    "article",
    "main",
]

# Fallback: first <div> with a class matching this pattern
fallback_class_pattern = "content|entry|post|article"

# Elements skipped entirely when flattening text
remove_tags = ["script", "style", "nav", "footer", "header", "aside"]

# Elements with a class matching this pattern are skipped too
noise_class_pattern = "ads|advertisement|sponsor|promo"

# Lines this short or shorter are dropped
min_line_length = 10

# Longer text is cut and marked as truncated
max_content_length = 10000

[convert]
# Pause between full-text fetches when converting several articles (ms)
batch_delay_ms = 2000
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
