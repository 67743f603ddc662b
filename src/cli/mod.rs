pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nakedcap")]
#[command(about = "Watches Naked Capitalism for new articles", long_about = None)]
pub struct Cli {
    /// SQLite database file (overrides the config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file (default: ~/.config/nakedcap/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Poll the front page once and store new articles
    Check,
    /// List stored articles, newest first
    Latest {
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Articles per page
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
        per_page: u32,
    },
    /// Show article counts
    Stats,
    /// Search titles and authors
    Search {
        /// Words to search for
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Maximum number of results
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Fetch and print the full text of an article page
    Content {
        /// Article URL
        url: String,
    },
    /// Render stored articles as markdown documents
    Convert {
        /// Convert a single article by id
        #[arg(long, conflicts_with = "latest")]
        id: Option<i64>,

        /// Convert the newest N articles (default: 5)
        #[arg(long)]
        latest: Option<usize>,

        /// Fetch the full text of each article
        #[arg(long)]
        full: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_with_global_db() {
        let cli = Cli::try_parse_from(["nakedcap", "check", "--db", "/tmp/a.db"]).unwrap();
        assert!(matches!(cli.command, Commands::Check));
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/a.db")));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_latest_defaults() {
        let cli = Cli::try_parse_from(["nakedcap", "latest"]).unwrap();
        match cli.command {
            Commands::Latest { page, per_page } => {
                assert_eq!(page, 1);
                assert_eq!(per_page, 10);
            }
            _ => panic!("expected latest"),
        }
    }

    #[test]
    fn test_parse_latest_rejects_page_zero() {
        assert!(Cli::try_parse_from(["nakedcap", "latest", "--page", "0"]).is_err());
    }

    #[test]
    fn test_parse_search_multiword() {
        let cli =
            Cli::try_parse_from(["nakedcap", "search", "private", "equity", "--limit", "3"]).unwrap();
        match cli.command {
            Commands::Search { query, limit } => {
                assert_eq!(query, vec!["private", "equity"]);
                assert_eq!(limit, 3);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_parse_search_requires_query() {
        assert!(Cli::try_parse_from(["nakedcap", "search"]).is_err());
    }

    #[test]
    fn test_parse_convert_id_conflicts_with_latest() {
        assert!(Cli::try_parse_from(["nakedcap", "convert", "--id", "1", "--latest", "3"]).is_err());

        let cli = Cli::try_parse_from(["nakedcap", "convert", "--id", "4", "--full"]).unwrap();
        match cli.command {
            Commands::Convert { id, latest, full } => {
                assert_eq!(id, Some(4));
                assert!(latest.is_none());
                assert!(full);
            }
            _ => panic!("expected convert"),
        }
    }
}
