use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rusqlite_migration::{Migrations, M};
use tracing::{debug, info, warn};

use crate::app::{NakedcapError, Result};
use crate::domain::{Article, ArticleStats, DiscoveredArticle, UNKNOWN_AUTHOR};
use crate::store::Store;

/// Columns bolted on by the publishing workflow. Older databases may lack
/// them, newer ones may already carry them without a migration record.
const PUBLISH_COLUMNS: &[(&str, &str)] = &[
    ("telegraph_url", "TEXT"),
    ("telegraph_path", "TEXT"),
    ("telegraph_published_at", "TIMESTAMP"),
];

const ARTICLE_COLUMNS: &str =
    "id, title, url, author, date_posted, content_hash, created_at, telegraph_url";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            NakedcapError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(e.to_string()),
            ))
        })
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.lock()?;
        migrations.to_latest(&mut conn)?;
        Self::ensure_publish_columns(&conn)?;

        Ok(())
    }

    fn ensure_publish_columns(conn: &Connection) -> Result<()> {
        let existing: Vec<String> = {
            let mut stmt = conn.prepare("PRAGMA table_info(articles)")?;
            let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
            names.collect::<std::result::Result<Vec<_>, _>>()?
        };

        for (name, kind) in PUBLISH_COLUMNS {
            if existing.iter().any(|c| c == *name) {
                continue;
            }
            conn.execute(
                &format!("ALTER TABLE articles ADD COLUMN {} {}", name, kind),
                [],
            )?;
            info!(column = *name, "Added missing column to articles table");
        }

        Ok(())
    }

    fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }

    fn article_from_row(row: &Row) -> rusqlite::Result<Article> {
        Ok(Article {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
            author: row
                .get::<_, Option<String>>(3)?
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            date_posted: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            content_hash: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
            created_at: row
                .get::<_, Option<String>>(6)?
                .and_then(|s| Self::parse_datetime(&s))
                .unwrap_or_else(Utc::now),
            telegraph_url: row.get(7)?,
        })
    }
}

impl Store for SqliteStore {
    fn save_articles(&self, articles: &[DiscoveredArticle]) -> Result<Vec<DiscoveredArticle>> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let mut inserted = Vec::new();

        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO articles (title, url, author, date_posted, content_hash)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;

            for article in articles {
                match stmt.execute(params![
                    article.title,
                    article.url,
                    article.author,
                    article.date_posted,
                    article.content_hash
                ]) {
                    Ok(0) => debug!(url = %article.url, "Article already stored"),
                    Ok(_) => inserted.push(article.clone()),
                    Err(e) => warn!(url = %article.url, error = %e, "Failed to save article"),
                }
            }
        }

        tx.commit()?;
        Ok(inserted)
    }

    fn get_article(&self, id: i64) -> Result<Option<Article>> {
        let conn = self.lock()?;

        let result = conn
            .query_row(
                &format!("SELECT {} FROM articles WHERE id = ?1", ARTICLE_COLUMNS),
                params![id],
                Self::article_from_row,
            )
            .optional()?;

        Ok(result)
    }

    fn get_article_by_url(&self, url: &str) -> Result<Option<Article>> {
        let conn = self.lock()?;

        let result = conn
            .query_row(
                &format!("SELECT {} FROM articles WHERE url = ?1", ARTICLE_COLUMNS),
                params![url],
                Self::article_from_row,
            )
            .optional()?;

        Ok(result)
    }

    fn latest_articles(&self, limit: usize, offset: usize) -> Result<Vec<Article>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM articles ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2",
            ARTICLE_COLUMNS
        ))?;

        let articles = stmt
            .query_map(params![limit as i64, offset as i64], Self::article_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(articles)
    }

    fn count_articles(&self) -> Result<i64> {
        let conn = self.lock()?;
        let count = conn.query_row("SELECT COUNT(*) FROM articles", [], |row| row.get(0))?;
        Ok(count)
    }

    fn search_articles(&self, query: &str, limit: usize) -> Result<Vec<Article>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.lock()?;
        let pattern = format!("%{}%", query.to_lowercase());

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM articles
             WHERE LOWER(title) LIKE ?1 OR LOWER(author) LIKE ?1
             ORDER BY created_at DESC, id DESC
             LIMIT ?2",
            ARTICLE_COLUMNS
        ))?;

        let articles = stmt
            .query_map(params![pattern, limit as i64], Self::article_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(articles)
    }

    fn stats(&self) -> Result<ArticleStats> {
        let conn = self.lock()?;

        let stats = conn.query_row(
            "SELECT
                 COUNT(*),
                 COALESCE(SUM(CASE WHEN created_at >= datetime('now', '-1 day') THEN 1 ELSE 0 END), 0),
                 COALESCE(SUM(CASE WHEN TRIM(COALESCE(telegraph_url, '')) != '' THEN 1 ELSE 0 END), 0)
             FROM articles",
            [],
            |row| {
                Ok(ArticleStats {
                    total: row.get(0)?,
                    last_day: row.get(1)?,
                    published: row.get(2)?,
                })
            },
        )?;

        Ok(stats)
    }
}
