//! Domain model for blog articles
//!
//! These are the shapes served to readers. They are read-only projections of
//! the CMS content (or of the bundled sample fixtures); nothing here is ever
//! written back.

use serde::{Deserialize, Serialize};

/// Image shown at the top of an article
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct EyecatchImage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Category reference attached to an article
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Category {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// Tag reference attached to an article
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Tag {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// A single blog article
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub body: String,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
    pub published_at: String,
    pub updated_at: String,
    pub eyecatch: Option<EyecatchImage>,
}

impl Article {
    /// Whether the article belongs to the category with the given slug
    pub fn in_category(&self, slug: &str) -> bool {
        self.category
            .as_ref()
            .is_some_and(|category| category.slug == slug)
    }

    /// Whether any of the article tags has the given slug
    pub fn has_tag(&self, slug: &str) -> bool {
        self.tags.iter().any(|tag| tag.slug == slug)
    }
}

/// A page of articles plus the window it was cut from
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleListResponse {
    pub total_count: usize,
    pub offset: usize,
    pub limit: usize,
    pub contents: Vec<Article>,
}
