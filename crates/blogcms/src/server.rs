use crate::prelude::{eprintln, *};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use blogcms_core::article::{Article, ArticleListResponse};
use blogcms_core::queries::collect_query_pairs;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::articles::ArticleService;
use crate::config::SiteMeta;

#[derive(Debug, clap::Args)]
pub struct ServeOptions {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
}

/// State shared by every handler
#[derive(Debug)]
pub struct AppState {
    pub articles: Arc<ArticleService>,
    pub site: SiteMeta,
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/news", get(list_news))
        .route("/api/news/{slug}", get(get_news))
        .route("/api/popular", get(popular_news))
        .route("/api/site", get(site_meta))
        .layer(cors)
        .with_state(state)
}

pub async fn run(options: ServeOptions, global: crate::Global) -> Result<()> {
    let articles = Arc::new(ArticleService::new(
        global.config.cms_config(),
        global.config.fallback_policy,
    ));

    if global.verbose {
        let source = if articles.is_live() {
            "microCMS"
        } else {
            "sample data"
        };
        eprintln!(
            "Serving articles from {source} (fallback policy: {:?})",
            articles.policy()
        );
    }

    let state = Arc::new(AppState {
        articles,
        site: global.config.site_meta(),
    });

    let addr = format!("{}:{}", options.host, options.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!("blog API listening on http://{addr}");
    if global.verbose {
        eprintln!("Listening on http://{}", addr);
        eprintln!("Articles endpoint: http://{}/api/news", addr);
    }

    axum::serve(listener, router(state))
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

async fn list_news(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ArticleListResponse>, Error> {
    let query = collect_query_pairs(pairs);
    state.articles.list_articles(&query).await.map(Json)
}

async fn get_news(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Article>, Error> {
    state.articles.get_article(&slug).await.map(Json)
}

#[derive(Debug, Deserialize)]
struct PopularParams {
    limit: Option<String>,
}

async fn popular_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PopularParams>,
) -> Result<Json<Vec<Article>>, Error> {
    // Same leniency as the list endpoint: unparseable limits are ignored.
    let limit = params
        .limit
        .as_deref()
        .and_then(blogcms_core::queries::parse_number)
        .map(|limit| limit.max(0) as usize);

    state.articles.popular_articles(limit).await.map(Json)
}

async fn site_meta(State(state): State<Arc<AppState>>) -> Json<SiteMeta> {
    Json(state.site.clone())
}
