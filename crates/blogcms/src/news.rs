use crate::prelude::{eprintln, println, *};
use std::sync::Arc;

use blogcms_core::article::{Article, ArticleListResponse};
use blogcms_core::markdown::render_markdown;
use blogcms_core::queries::{QueryValue, RawQuery};
use colored::Colorize;

use crate::articles::{ArticleService, DEFAULT_POPULAR_LIMIT};
use crate::store::BlogStore;

#[derive(Debug, clap::Parser)]
#[command(name = "news")]
#[command(about = "Read blog articles")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List articles
    #[clap(name = "list")]
    List(ListOptions),

    /// Show one article by slug
    #[clap(name = "get")]
    Get(GetOptions),

    /// List the most popular articles
    #[clap(name = "popular")]
    Popular(PopularOptions),
}

#[derive(Debug, Default, clap::Args, Clone)]
pub struct ListOptions {
    /// Maximum number of articles to return
    #[arg(short, long)]
    pub limit: Option<i64>,

    /// Number of articles to skip
    #[arg(short, long)]
    pub offset: Option<i64>,

    /// Sort order (e.g. "-publishedAt")
    #[arg(long)]
    pub orders: Option<String>,

    /// Only articles in this category slug
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only articles carrying this tag slug
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Raw microCMS filter expression
    #[arg(long)]
    pub filters: Option<String>,

    /// Full text search
    #[arg(short, long)]
    pub q: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct GetOptions {
    /// Article slug (or content id)
    pub slug: String,

    /// Print the body rendered as HTML
    #[arg(long, conflicts_with = "json")]
    pub html: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct PopularOptions {
    /// Number of articles to return
    #[arg(short, long, default_value_t = DEFAULT_POPULAR_LIMIT)]
    pub limit: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let service = Arc::new(ArticleService::new(
        global.config.cms_config(),
        global.config.fallback_policy,
    ));

    if global.verbose {
        match service.service_domain() {
            Some(domain) => eprintln!("Reading articles from microCMS ({domain})"),
            None => eprintln!("Reading sample articles"),
        }
    }

    match app.command {
        Commands::List(options) => list(service, options).await,
        Commands::Get(options) => get(&service, options).await,
        Commands::Popular(options) => popular(service, options).await,
    }
}

async fn list(service: Arc<ArticleService>, options: ListOptions) -> Result<()> {
    let page = list_data(service, &options).await?;

    if options.json {
        println!("{}", format_json(&page)?);
    } else {
        print!("{}", format_list_text(&page.contents, page.total_count));
    }

    Ok(())
}

/// Load one page of articles through the store, keeping the window the
/// serving source reported
pub async fn list_data(
    service: Arc<ArticleService>,
    options: &ListOptions,
) -> Result<ArticleListResponse> {
    let mut store = BlogStore::new(service);
    store.load_articles(&list_query(options)).await;

    if let Some(error) = store.error {
        return Err(eyre!(error));
    }

    Ok(ArticleListResponse {
        total_count: store.total_count,
        offset: store.offset,
        limit: store.limit,
        contents: store.articles,
    })
}

async fn get(service: &ArticleService, options: GetOptions) -> Result<()> {
    let article = service
        .get_article(&options.slug)
        .await
        .map_err(|e| eyre!("{}: {}", e, options.slug))?;

    if options.json {
        println!("{}", format_json(&article)?);
    } else if options.html {
        println!("{}", render_markdown(&article.body));
    } else {
        print!("{}", format_article_text(&article));
    }

    Ok(())
}

async fn popular(service: Arc<ArticleService>, options: PopularOptions) -> Result<()> {
    let mut store = BlogStore::new(service);
    store.load_popular_articles(options.limit).await;

    if let Some(error) = store.error {
        return Err(eyre!(error));
    }

    if options.json {
        println!("{}", format_json(&store.popular_articles)?);
    } else {
        let total = store.popular_articles.len();
        print!("{}", format_list_text(&store.popular_articles, total));
    }

    Ok(())
}

/// Turn the command line options into the query string map the article
/// operations accept
fn list_query(options: &ListOptions) -> RawQuery {
    let numbers = [("limit", options.limit), ("offset", options.offset)]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v.to_string())));

    let strings = [
        ("orders", &options.orders),
        ("category", &options.category),
        ("tag", &options.tag),
        ("filters", &options.filters),
        ("q", &options.q),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.clone().map(|v| (key, v)));

    numbers
        .chain(strings)
        .map(|(key, value)| (key.to_string(), QueryValue::Single(value)))
        .collect()
}

/// Dates are shown as `YYYY-MM-DD` when they parse as RFC 3339
fn format_date(value: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| value.to_string())
}

fn format_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_list_text(articles: &[Article], total_count: usize) -> String {
    if articles.is_empty() {
        return format!("{}\n", "No articles found.".yellow());
    }

    let mut table = new_table(&["Slug", "Title", "Category", "Published"]);

    for article in articles {
        table.add_row(prettytable::row![
            article.slug,
            article.title,
            article
                .category
                .as_ref()
                .map(|c| c.name.as_str())
                .unwrap_or("-"),
            format_date(&article.published_at)
        ]);
    }

    format!(
        "{}\n{}\n",
        table,
        f!("Showing {} of {} articles", articles.len(), total_count).bright_black()
    )
}

fn format_article_text(article: &Article) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", article.title.bright_cyan().bold()));
    if let Some(description) = &article.description {
        result.push_str(&format!("{}\n", description.italic()));
    }

    let mut table = new_table(&[]);
    table.add_row(prettytable::row!["Slug", article.slug]);
    if let Some(category) = &article.category {
        table.add_row(prettytable::row!["Category", category.name]);
    }
    if !article.tags.is_empty() {
        let tags: Vec<&str> = article.tags.iter().map(|t| t.name.as_str()).collect();
        table.add_row(prettytable::row!["Tags", tags.join(", ")]);
    }
    table.add_row(prettytable::row!["Published", format_date(&article.published_at)]);
    table.add_row(prettytable::row!["Updated", format_date(&article.updated_at)]);
    if let Some(eyecatch) = &article.eyecatch {
        table.add_row(prettytable::row!["Eyecatch", eyecatch.url]);
    }

    result.push_str(&format!("\n{table}\n"));
    result.push_str(&format!("{}\n", article.body));
    result
}
