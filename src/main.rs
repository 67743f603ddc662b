use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use nakedcap::app::AppContext;
use nakedcap::cli::{commands, Cli, Commands};
use nakedcap::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(config, cli.db)?;

    match cli.command {
        Commands::Check => {
            commands::check(&ctx).await?;
        }
        Commands::Latest { page, per_page } => {
            commands::latest(&ctx, page as usize, per_page as usize)?;
        }
        Commands::Stats => {
            commands::stats(&ctx)?;
        }
        Commands::Search { query, limit } => {
            commands::search(&ctx, &query, limit)?;
        }
        Commands::Content { url } => {
            commands::content(&ctx, &url).await?;
        }
        Commands::Convert { id, latest, full } => {
            commands::convert(&ctx, id, latest, full).await?;
        }
    }

    Ok(())
}
