use blogcms_core::cms::CmsListResponse;
use blogcms_core::domain::api_base_url;
use blogcms_core::queries::CmsQueries;
use serde::de::DeserializeOwned;

pub mod factory;

pub use factory::ClientFactory;

/// Header microCMS reads the API key from
const API_KEY_HEADER: &str = "x-microcms-api-key";

/// Transport level failures talking to microCMS
#[derive(thiserror::Error, Debug)]
pub enum CmsError {
    #[error("Failed to build microCMS client: {0}")]
    Build(String),

    #[error("Failed to send request to microCMS: {0}")]
    Request(String),

    #[error("microCMS API error [{status}]: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse microCMS response: {0}")]
    Decode(String),
}

/// Handle to the microCMS content API of one service
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    base_url: String,
    service_domain: String,
}

impl CmsClient {
    /// Build a client for an already sanitized service domain
    ///
    /// No request is sent; this only prepares the default headers.
    pub fn new(
        service_domain: &str,
        api_key: &str,
        base_url: Option<&str>,
    ) -> Result<Self, CmsError> {
        use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};

        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| CmsError::Build(format!("Invalid API key header value: {e}")))?;
        key.set_sensitive(true);
        headers.insert(HeaderName::from_static(API_KEY_HEADER), key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| CmsError::Build(e.to_string()))?;

        let base_url = base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| api_base_url(service_domain));

        log::debug!("[microcms] client ready for {service_domain} at {base_url}");

        Ok(Self {
            http,
            base_url,
            service_domain: service_domain.to_string(),
        })
    }

    pub fn service_domain(&self) -> &str {
        &self.service_domain
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a page of records from a list endpoint
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        queries: &CmsQueries,
    ) -> Result<CmsListResponse<T>, CmsError> {
        let url = format!("{}/{endpoint}", self.base_url);
        self.get_json(&url, &queries.to_pairs()).await
    }

    /// Fetch a single record of a list endpoint by content id
    pub async fn get_list_detail<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        content_id: &str,
    ) -> Result<T, CmsError> {
        let url = format!(
            "{}/{endpoint}/{}",
            self.base_url,
            urlencoding::encode(content_id)
        );
        self.get_json(&url, &[]).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, CmsError> {
        log::debug!("[microcms] request GET {url} {query:?}");

        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| CmsError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CmsError::Status { status, body });
        }

        let body_text = response
            .text()
            .await
            .map_err(|e| CmsError::Request(e.to_string()))?;

        serde_json::from_str(&body_text).map_err(|e| CmsError::Decode(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::{
        extract::{Path, Query},
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::get,
        Json, Router,
    };
    use blogcms_core::cms::CmsArticle;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    pub const TEST_API_KEY: &str = "test-api-key";

    fn record(id: &str, slug: &str, published_at: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "slug": slug,
            "title": format!("Title of {slug}"),
            "body": "Body",
            "category": {"id": "news", "name": "News", "slug": "news"},
            "publishedAt": published_at,
            "updatedAt": published_at,
        })
    }

    fn records() -> Vec<serde_json::Value> {
        vec![
            record("id-1", "first-post", "2024-01-01T00:00:00.000Z"),
            record("id-2", "second-post", "2024-02-01T00:00:00.000Z"),
        ]
    }

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("x-microcms-api-key")
            .and_then(|v| v.to_str().ok())
            == Some(TEST_API_KEY)
    }

    async fn list_handler(
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> axum::response::Response {
        if !authorized(&headers) {
            return StatusCode::UNAUTHORIZED.into_response();
        }

        let mut contents = records();
        if let Some(filters) = params.get("filters") {
            for fragment in filters.split("[and]") {
                if let Some(slug) = fragment.strip_prefix("slug[equals]") {
                    contents.retain(|r| r["slug"] == slug);
                } else if let Some(category) = fragment.strip_prefix("category[equals]") {
                    contents.retain(|r| r["category"]["slug"] == category);
                } else {
                    contents.clear();
                }
            }
        }
        let total_count = contents.len();
        let limit: usize = params
            .get("limit")
            .and_then(|l| l.parse().ok())
            .unwrap_or(10);
        contents.truncate(limit);

        Json(serde_json::json!({
            "contents": contents,
            "totalCount": total_count,
            "offset": 0,
            "limit": limit,
        }))
        .into_response()
    }

    async fn detail_handler(
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> axum::response::Response {
        if !authorized(&headers) {
            return StatusCode::UNAUTHORIZED.into_response();
        }

        match records().into_iter().find(|r| r["id"] == id.as_str()) {
            Some(record) => Json(record).into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        }
    }

    /// Router imitating the microCMS content API for the `news` endpoint
    pub fn mock_cms_router() -> Router {
        Router::new()
            .route("/api/v1/news", get(list_handler))
            .route("/api/v1/news/{id}", get(detail_handler))
    }

    /// Query strings received by a [`recording_cms_router`], one per request
    pub type RecordedQueries = Arc<Mutex<Vec<HashMap<String, String>>>>;

    /// Router that answers every list request with an empty page and every
    /// detail request with a 404, keeping the query string of each list call
    pub fn recording_cms_router() -> (Router, RecordedQueries) {
        let recorded = RecordedQueries::default();
        let sink = Arc::clone(&recorded);

        let router = Router::new()
            .route(
                "/api/v1/news",
                get(move |Query(params): Query<HashMap<String, String>>| {
                    let sink = Arc::clone(&sink);
                    async move {
                        sink.lock().unwrap().push(params);
                        Json(serde_json::json!({
                            "contents": [],
                            "totalCount": 0,
                            "offset": 0,
                            "limit": 0,
                        }))
                    }
                }),
            )
            .route(
                "/api/v1/news/{id}",
                get(|| async { StatusCode::NOT_FOUND }),
            );

        (router, recorded)
    }

    /// Expected recorded query built from literal pairs
    pub fn query_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    /// Router whose every request fails with a 500
    pub fn failing_cms_router() -> Router {
        Router::new().fallback(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") })
    }

    /// Serve a router on an ephemeral local port, returning its base URL
    pub async fn spawn_router(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn mock_client() -> CmsClient {
        let base = spawn_router(mock_cms_router()).await;
        CmsClient::new("test", TEST_API_KEY, Some(&format!("{base}/api/v1/"))).unwrap()
    }

    #[test]
    fn test_default_base_url() {
        let client = CmsClient::new("blog", "key", None).unwrap();
        assert_eq!(client.base_url(), "https://blog.microcms.io/api/v1");
        assert_eq!(client.service_domain(), "blog");
    }

    #[test]
    fn test_invalid_api_key_is_a_build_error() {
        let result = CmsClient::new("blog", "bad\nkey", None);
        assert!(matches!(result, Err(CmsError::Build(_))));
    }

    #[tokio::test]
    async fn test_get_list_sends_queries() {
        let client = mock_client().await;
        let queries = CmsQueries {
            limit: Some(1),
            orders: Some("-publishedAt".to_string()),
            ..Default::default()
        };

        let response: CmsListResponse<serde_json::Value> =
            client.get_list("news", &queries).await.unwrap();

        assert_eq!(response.total_count, 2);
        assert_eq!(response.contents.len(), 1);
        assert_eq!(response.limit, 1);
    }

    #[tokio::test]
    async fn test_get_list_sends_every_query_param() {
        let (router, recorded) = recording_cms_router();
        let base = spawn_router(router).await;
        let client = CmsClient::new("test", TEST_API_KEY, Some(&format!("{base}/api/v1"))).unwrap();
        let queries = CmsQueries {
            limit: Some(3),
            offset: Some(6),
            depth: Some(1),
            fields: Some("id,title".to_string()),
            orders: Some("-publishedAt".to_string()),
            filters: Some("title[contains]rust".to_string()),
            q: Some("hello world".to_string()),
        };

        let _: CmsListResponse<CmsArticle> = client.get_list("news", &queries).await.unwrap();

        assert_eq!(
            *recorded.lock().unwrap(),
            vec![query_of(&[
                ("limit", "3"),
                ("offset", "6"),
                ("depth", "1"),
                ("fields", "id,title"),
                ("orders", "-publishedAt"),
                ("filters", "title[contains]rust"),
                ("q", "hello world"),
            ])]
        );
    }

    #[tokio::test]
    async fn test_get_list_detail() {
        let client = mock_client().await;

        let article: CmsArticle = client.get_list_detail("news", "id-2").await.unwrap();
        assert_eq!(article.slug.as_deref(), Some("second-post"));
    }

    #[tokio::test]
    async fn test_get_list_detail_not_found() {
        let client = mock_client().await;

        let result: Result<CmsArticle, _> = client.get_list_detail("news", "missing").await;
        assert!(matches!(result, Err(CmsError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_wrong_api_key_is_rejected() {
        let base = spawn_router(mock_cms_router()).await;
        let client = CmsClient::new("test", "wrong", Some(&format!("{base}/api/v1"))).unwrap();

        let result: Result<CmsListResponse<CmsArticle>, _> =
            client.get_list("news", &CmsQueries::default()).await;
        assert!(matches!(result, Err(CmsError::Status { status: 401, .. })));
    }

    #[tokio::test]
    async fn test_connection_failure_is_a_request_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = CmsClient::new("test", TEST_API_KEY, Some(&format!("http://{addr}"))).unwrap();
        let result: Result<CmsListResponse<CmsArticle>, _> =
            client.get_list("news", &CmsQueries::default()).await;
        assert!(matches!(result, Err(CmsError::Request(_))));
    }
}
