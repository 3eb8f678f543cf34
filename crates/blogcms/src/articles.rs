//! Article read operations
//!
//! Each operation asks the [`ClientFactory`] for a live client. With one, the
//! request goes to microCMS and the records are mapped by the core crate.
//! Without one, the configured [`FallbackPolicy`] decides between failing with
//! [`Error::UpstreamUnavailable`] and serving the sample articles.

use std::sync::{Arc, Once};

use blogcms_core::article::{Article, ArticleListResponse};
use blogcms_core::cms::{map_article, transform_list_response, CmsArticle, ARTICLE_ENDPOINT};
use blogcms_core::queries::{build_cms_queries, build_sample_queries, slug_filter, CmsQueries, RawQuery};
use blogcms_core::sample::{build_sample_list_response, find_sample_article, popular_sample_articles};

use crate::cms::{ClientFactory, CmsClient};
use crate::config::{CmsConfig, FallbackPolicy};
use crate::error::Error;

/// Number of popular articles returned when no limit is given
pub const DEFAULT_POPULAR_LIMIT: usize = 5;

#[derive(Debug)]
pub struct ArticleService {
    factory: ClientFactory,
    policy: FallbackPolicy,
    notice: Once,
}

impl ArticleService {
    pub fn new(config: CmsConfig, policy: FallbackPolicy) -> Self {
        Self {
            factory: ClientFactory::new(config),
            policy,
            notice: Once::new(),
        }
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Whether requests are answered by microCMS rather than sample data
    pub fn is_live(&self) -> bool {
        self.factory.client().is_some()
    }

    /// Sanitized microCMS service domain, when a live client exists
    pub fn service_domain(&self) -> Option<String> {
        self.factory.client()?;
        self.factory.service_domain()
    }

    fn client_or_fallback(&self) -> Result<Option<Arc<CmsClient>>, Error> {
        let client = self.factory.client();
        if client.is_none() {
            self.notice
                .call_once(|| log::warn!("{}", self.policy.missing_client_notice()));
        }

        match (client, self.policy) {
            (Some(client), _) => Ok(Some(client)),
            (None, FallbackPolicy::DegradeToFixture) => Ok(None),
            (None, FallbackPolicy::Strict) => Err(Error::client_unavailable()),
        }
    }

    /// List articles matching the raw query string parameters
    pub async fn list_articles(&self, query: &RawQuery) -> Result<ArticleListResponse, Error> {
        let Some(client) = self.client_or_fallback()? else {
            return Ok(build_sample_list_response(&build_sample_queries(query)));
        };

        let queries = build_cms_queries(query);

        let response = client
            .get_list::<CmsArticle>(ARTICLE_ENDPOINT, &queries)
            .await
            .map_err(|e| {
                log::error!("[api/news] {e}");
                Error::upstream("Failed to fetch articles from microCMS", e)
            })?;

        log::debug!("[api/news] fetched from microCMS {queries:?}");

        Ok(transform_list_response(response))
    }

    /// Get one article by slug
    ///
    /// The slug is first tried as a content id. If that lookup fails for any
    /// reason, a `slug[equals]` list query is issued instead.
    pub async fn get_article(&self, slug: &str) -> Result<Article, Error> {
        if slug.is_empty() {
            return Err(Error::slug_required());
        }

        let Some(client) = self.client_or_fallback()? else {
            return find_sample_article(slug).ok_or_else(Error::article_not_found);
        };

        match client
            .get_list_detail::<CmsArticle>(ARTICLE_ENDPOINT, slug)
            .await
        {
            Ok(entry) => return Ok(map_article(entry)),
            Err(e) => log::debug!("[api/news/{slug}] direct lookup failed, searching by slug: {e}"),
        }

        let queries = CmsQueries {
            filters: Some(slug_filter(slug)),
            limit: Some(1),
            depth: Some(2),
            ..Default::default()
        };

        let response = client
            .get_list::<CmsArticle>(ARTICLE_ENDPOINT, &queries)
            .await
            .map_err(|e| {
                log::error!("[api/news/{slug}] {e}");
                Error::upstream("Failed to fetch article from microCMS", e)
            })?;

        response
            .contents
            .into_iter()
            .next()
            .map(map_article)
            .ok_or_else(Error::article_not_found)
    }

    /// Most popular articles, as ranked by the `popularity` field
    pub async fn popular_articles(&self, limit: Option<usize>) -> Result<Vec<Article>, Error> {
        let limit = limit.unwrap_or(DEFAULT_POPULAR_LIMIT);

        let Some(client) = self.client_or_fallback()? else {
            return Ok(popular_sample_articles(limit));
        };

        let queries = CmsQueries {
            orders: Some("-popularity".to_string()),
            limit: Some(limit as i64),
            ..Default::default()
        };

        let response = client
            .get_list::<CmsArticle>(ARTICLE_ENDPOINT, &queries)
            .await
            .map_err(|e| Error::upstream("Failed to fetch popular articles from microCMS", e))?;

        Ok(response.contents.into_iter().map(map_article).collect())
    }
}
