use std::sync::Arc;

use blogcms_core::article::Article;
use blogcms_core::queries::RawQuery;

use crate::articles::ArticleService;

/// UI state holder over the article operations
///
/// Actions run one at a time through `&mut self`; the last action to finish
/// owns `loading` and `error`.
#[derive(Debug)]
pub struct BlogStore {
    service: Arc<ArticleService>,
    pub articles: Vec<Article>,
    pub popular_articles: Vec<Article>,
    pub loading: bool,
    pub total_count: usize,
    pub offset: usize,
    pub limit: usize,
    pub error: Option<String>,
}

impl BlogStore {
    pub fn new(service: Arc<ArticleService>) -> Self {
        Self {
            service,
            articles: Vec::new(),
            popular_articles: Vec::new(),
            loading: false,
            total_count: 0,
            offset: 0,
            limit: 0,
            error: None,
        }
    }

    /// Replace `articles` and its page window with the result of a list query
    ///
    /// `total_count`, `offset` and `limit` are kept as the source reported
    /// them. On failure the previous page is kept and `error` is set.
    pub async fn load_articles(&mut self, query: &RawQuery) {
        self.loading = true;

        match self.service.list_articles(query).await {
            Ok(response) => {
                self.articles = response.contents;
                self.total_count = response.total_count;
                self.offset = response.offset;
                self.limit = response.limit;
                self.error = None;
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }

        self.loading = false;
    }

    /// Replace `popular_articles`
    ///
    /// A failure only sets `error` when no earlier error is recorded.
    pub async fn load_popular_articles(&mut self, limit: usize) {
        match self.service.popular_articles(Some(limit)).await {
            Ok(articles) => self.popular_articles = articles,
            Err(e) => {
                if self.error.is_none() {
                    self.error = Some(e.to_string());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CmsConfig, FallbackPolicy};
    use blogcms_core::queries::QueryValue;

    fn store(policy: FallbackPolicy) -> BlogStore {
        BlogStore::new(Arc::new(ArticleService::new(CmsConfig::default(), policy)))
    }

    #[test]
    fn test_initial_state() {
        let store = store(FallbackPolicy::DegradeToFixture);

        assert!(store.articles.is_empty());
        assert!(store.popular_articles.is_empty());
        assert!(!store.loading);
        assert_eq!(store.total_count, 0);
        assert_eq!(store.error, None);
    }

    #[tokio::test]
    async fn test_load_articles() {
        let mut store = store(FallbackPolicy::DegradeToFixture);
        let mut query = RawQuery::new();
        query.insert("limit".to_string(), QueryValue::from("1"));

        store.load_articles(&query).await;

        assert_eq!(store.articles.len(), 1);
        assert_eq!(store.total_count, 2);
        assert_eq!(store.offset, 0);
        assert_eq!(store.limit, 1);
        assert!(!store.loading);
        assert_eq!(store.error, None);
    }

    #[tokio::test]
    async fn test_load_articles_keeps_reported_window() {
        let mut store = store(FallbackPolicy::DegradeToFixture);
        let mut query = RawQuery::new();
        query.insert("limit".to_string(), QueryValue::from("5"));
        query.insert("offset".to_string(), QueryValue::from("1"));

        store.load_articles(&query).await;

        assert_eq!(store.articles.len(), 1);
        assert_eq!(store.total_count, 2);
        assert_eq!(store.offset, 1);
        assert_eq!(store.limit, 5);
    }

    #[tokio::test]
    async fn test_load_articles_failure_sets_error() {
        let mut store = store(FallbackPolicy::Strict);

        store.load_articles(&RawQuery::new()).await;

        assert!(!store.loading);
        assert_eq!(store.error.as_deref(), Some("MicroCMS client is not available"));
        assert!(store.articles.is_empty());
    }

    #[tokio::test]
    async fn test_load_popular_articles() {
        let mut store = store(FallbackPolicy::DegradeToFixture);

        store.load_popular_articles(5).await;

        assert_eq!(store.popular_articles.len(), 2);
    }

    #[tokio::test]
    async fn test_popular_failure_keeps_first_error() {
        let mut store = store(FallbackPolicy::Strict);
        store.error = Some("Failed to load articles".to_string());

        store.load_popular_articles(5).await;

        assert_eq!(store.error.as_deref(), Some("Failed to load articles"));
    }

    #[tokio::test]
    async fn test_popular_failure_sets_error() {
        let mut store = store(FallbackPolicy::Strict);

        store.load_popular_articles(5).await;

        assert_eq!(store.error.as_deref(), Some("MicroCMS client is not available"));
    }
}
