//! Transformation functions for microCMS API responses

use serde::{Deserialize, Serialize};

use crate::article::{Article, ArticleListResponse, Category, EyecatchImage, Tag};

/// Content endpoint holding the blog articles
pub const ARTICLE_ENDPOINT: &str = "news";

/// Article record as returned by microCMS
///
/// Every field is defaulted so that malformed records still deserialize.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CmsArticle {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub tags: Option<Vec<Tag>>,
    #[serde(default)]
    pub eyecatch: Option<EyecatchImage>,
    #[serde(default)]
    pub thumbnail: Option<EyecatchImage>,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// List envelope returned by the microCMS list endpoint
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CmsListResponse<T> {
    pub contents: Vec<T>,
    #[serde(default)]
    pub total_count: usize,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub limit: usize,
}

/// Convert a microCMS record into an [`Article`]
///
/// - an empty or missing `slug` falls back to the content id
/// - missing `tags` become an empty list
/// - `eyecatch` falls back to `thumbnail`
pub fn map_article(entry: CmsArticle) -> Article {
    let slug = match entry.slug {
        Some(slug) if !slug.is_empty() => slug,
        _ => entry.id.clone(),
    };

    Article {
        id: entry.id,
        slug,
        title: entry.title,
        description: entry.description,
        body: entry.body,
        category: entry.category,
        tags: entry.tags.unwrap_or_default(),
        published_at: entry.published_at,
        updated_at: entry.updated_at,
        eyecatch: entry.eyecatch.or(entry.thumbnail),
    }
}

/// Map every record of a list envelope, keeping its window as reported
pub fn transform_list_response(response: CmsListResponse<CmsArticle>) -> ArticleListResponse {
    ArticleListResponse {
        total_count: response.total_count,
        offset: response.offset,
        limit: response.limit,
        contents: response.contents.into_iter().map(map_article).collect(),
    }
}
