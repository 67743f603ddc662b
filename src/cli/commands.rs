use crate::app::{AppContext, Result};
use crate::domain::Article;
use crate::formatter::FormattedDocument;
use crate::store::Store;

pub const DEFAULT_CONVERT_LIMIT: usize = 5;

pub async fn check(ctx: &AppContext) -> Result<()> {
    let new_articles = ctx.monitor.check_for_new_articles().await?;

    if new_articles.is_empty() {
        println!("No new articles");
        return Ok(());
    }

    println!("Found {} new articles:", new_articles.len());
    for article in new_articles {
        println!("  {}", article.title);
        println!("    {} | {}", article.author, article.date_posted);
        println!("    {}", article.url);
    }

    Ok(())
}

pub fn latest(ctx: &AppContext, page: usize, per_page: usize) -> Result<()> {
    let total = ctx.store.count_articles()?.max(0) as usize;
    if total == 0 {
        println!("No articles");
        return Ok(());
    }

    let pages = page_count(total, per_page);
    if page > pages {
        println!("Page {} is out of range ({} pages)", page, pages);
        return Ok(());
    }

    let articles = ctx.store.latest_articles(per_page, (page - 1) * per_page)?;

    println!("Page {} of {} ({} articles)", page, pages, total);
    for article in &articles {
        print_article(article);
    }

    Ok(())
}

pub fn stats(ctx: &AppContext) -> Result<()> {
    let stats = ctx.store.stats()?;

    println!("Total articles:   {}", stats.total);
    println!("Last 24 hours:    {}", stats.last_day);
    println!(
        "Published:        {} ({:.2}%)",
        stats.published,
        stats.publish_percentage()
    );
    println!("Unpublished:      {}", stats.unpublished());

    Ok(())
}

pub fn search(ctx: &AppContext, query: &[String], limit: usize) -> Result<()> {
    let Some(query) = search_query(query) else {
        println!("Usage: nakedcap search <query>...");
        println!("Example: nakedcap search private equity");
        return Ok(());
    };
    let articles = ctx.store.search_articles(&query, limit)?;

    if articles.is_empty() {
        println!("No articles matching \"{}\"", query);
        return Ok(());
    }

    println!("{} articles matching \"{}\":", articles.len(), query);
    for article in &articles {
        print_article(article);
    }

    Ok(())
}

pub async fn content(ctx: &AppContext, url: &str) -> Result<()> {
    match ctx.monitor.fetch_content(url).await {
        Some(text) => println!("{}", text),
        None => println!("No content found"),
    }
    Ok(())
}

pub async fn convert(
    ctx: &AppContext,
    id: Option<i64>,
    latest: Option<usize>,
    full: bool,
) -> Result<()> {
    let documents = match id {
        Some(id) => vec![ctx.monitor.convert_article(id, full).await?],
        None => {
            let limit = latest.unwrap_or(DEFAULT_CONVERT_LIMIT);
            ctx.monitor.convert_latest(limit, full).await?
        }
    };

    if documents.is_empty() {
        println!("No articles to convert");
        return Ok(());
    }

    println!("{}", render_documents(&documents));
    Ok(())
}

fn print_article(article: &Article) {
    println!("[{}] {}", article.id, article.title);
    println!("    {} | {}", article.author, article.date_posted);
    println!("    {}", article.url);
    if article.is_published() {
        if let Some(link) = &article.telegraph_url {
            println!("    Telegraph: {}", link);
        }
    }
}

/// Joined search words, or `None` when nothing but whitespace was given.
fn search_query(words: &[String]) -> Option<String> {
    let query = words.join(" ").trim().to_string();
    (!query.is_empty()).then_some(query)
}

fn page_count(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page.max(1)).max(1)
}

fn render_documents(documents: &[FormattedDocument]) -> String {
    documents
        .iter()
        .map(|doc| doc.body.as_str())
        .collect::<Vec<_>>()
        .join("\n\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(95, 10), 10);
    }

    #[test]
    fn test_search_query_rejects_blank() {
        assert_eq!(search_query(&[" ".to_string()]), None);
        assert_eq!(search_query(&["".to_string(), "  ".to_string()]), None);
        assert_eq!(
            search_query(&["private".to_string(), "equity".to_string()]).as_deref(),
            Some("private equity")
        );
    }
}
