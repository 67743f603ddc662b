use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleStats {
    pub total: i64,
    pub last_day: i64,
    pub published: i64,
}

impl ArticleStats {
    pub fn unpublished(&self) -> i64 {
        self.total - self.published
    }

    /// Share of published articles, rounded to two decimals.
    pub fn publish_percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let pct = self.published as f64 / self.total as f64 * 100.0;
        (pct * 100.0).round() / 100.0
    }
}
