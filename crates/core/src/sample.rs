//! Sample articles served when no microCMS credentials are configured
//!
//! The fixtures go through the same filter, sort and pagination steps a live
//! list query would, so callers cannot tell the two apart by shape.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::article::{Article, ArticleListResponse, Category, EyecatchImage, Tag};
use crate::queries::SampleQueries;

/// Fields the sample fallback knows how to sort by
const SORTABLE_FIELDS: [&str; 2] = ["publishedAt", "updatedAt"];

fn sample_category() -> Category {
    Category {
        id: "news".to_string(),
        name: "News".to_string(),
        slug: "news".to_string(),
    }
}

fn sample_tag() -> Tag {
    Tag {
        id: "nuxt".to_string(),
        name: "Nuxt".to_string(),
        slug: "nuxt".to_string(),
    }
}

/// The fixed fixture set, in its canonical order
pub fn sample_articles() -> Vec<Article> {
    vec![
        Article {
            id: "welcome-to-the-blog".to_string(),
            slug: "welcome-to-the-blog".to_string(),
            title: "Welcome to the Nuxt3 + microCMS Blog".to_string(),
            description: Some(
                "Overview of the demo blog powered by Nuxt3, Pinia, and microCMS.".to_string(),
            ),
            body: "# Welcome\nThis is sample content rendered with **Markdown**.".to_string(),
            category: Some(sample_category()),
            tags: vec![sample_tag()],
            published_at: "2024-01-01T00:00:00.000Z".to_string(),
            updated_at: "2024-01-01T00:00:00.000Z".to_string(),
            eyecatch: Some(EyecatchImage {
                url: "https://placehold.co/800x400".to_string(),
                width: Some(800),
                height: Some(400),
            }),
        },
        Article {
            id: "getting-started-with-nuxt3".to_string(),
            slug: "getting-started-with-nuxt3".to_string(),
            title: "Getting Started with Nuxt3".to_string(),
            description: Some(
                "Learn how this project uses Nuxt3 features together with microCMS.".to_string(),
            ),
            body: "## Getting Started\nSet MICROCMS credentials to fetch real data.".to_string(),
            category: Some(sample_category()),
            tags: vec![sample_tag()],
            published_at: "2024-01-08T00:00:00.000Z".to_string(),
            updated_at: "2024-01-08T00:00:00.000Z".to_string(),
            eyecatch: Some(EyecatchImage {
                url: "https://placehold.co/800x400?text=Nuxt3".to_string(),
                width: Some(800),
                height: Some(400),
            }),
        },
    ]
}

/// Parse a timestamp the way a browser would accept it
///
/// RFC 3339 values keep their offset. Zone-less date-times and bare dates
/// (`2024-01-05`) are read as UTC.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Some(time.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|time| time.and_utc())
}

fn compare_values(left: &str, right: &str) -> Ordering {
    match (parse_timestamp(left), parse_timestamp(right)) {
        (Some(left_time), Some(right_time)) => left_time.cmp(&right_time),
        _ => left.cmp(right),
    }
}

/// Sort articles by an `orders` expression such as `-publishedAt`
///
/// A leading `-` sorts descending. Only `publishedAt` and `updatedAt` are
/// recognized; any other field leaves the input order untouched. Values that
/// do not parse as timestamps are compared as plain strings.
pub fn sort_articles(mut articles: Vec<Article>, orders: Option<&str>) -> Vec<Article> {
    let Some(orders) = orders else {
        return articles;
    };

    let (descending, field) = match orders.strip_prefix('-') {
        Some(field) => (true, field),
        None => (false, orders),
    };

    if !SORTABLE_FIELDS.contains(&field) {
        return articles;
    }

    let value = |article: &Article| -> String {
        match field {
            "publishedAt" => article.published_at.clone(),
            _ => article.updated_at.clone(),
        }
    };

    articles.sort_by(|a, b| {
        let ordering = compare_values(&value(a), &value(b));
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });

    articles
}

/// Filter, sort and paginate an arbitrary article set
///
/// `total_count` is the size of the filtered set, before pagination. A
/// missing `offset` means 0 and negative values are clamped to 0; a missing
/// `limit` means the whole filtered set.
pub fn query_articles(articles: Vec<Article>, query: &SampleQueries) -> ArticleListResponse {
    let category = query.category.as_deref().filter(|c| !c.is_empty());
    let tag = query.tag.as_deref().filter(|t| !t.is_empty());

    let filtered: Vec<Article> = articles
        .into_iter()
        .filter(|article| category.map_or(true, |slug| article.in_category(slug)))
        .filter(|article| tag.map_or(true, |slug| article.has_tag(slug)))
        .collect();

    let sorted = sort_articles(filtered, query.orders.as_deref());
    let total_count = sorted.len();

    let offset = query.offset.map_or(0, |offset| offset.max(0) as usize);
    let limit = query
        .limit
        .map_or(total_count, |limit| limit.max(0) as usize);

    let contents = sorted.into_iter().skip(offset).take(limit).collect();

    ArticleListResponse {
        total_count,
        offset,
        limit,
        contents,
    }
}

/// Run a list query against the fixture set
pub fn build_sample_list_response(query: &SampleQueries) -> ArticleListResponse {
    query_articles(sample_articles(), query)
}

/// Find a fixture whose slug or id equals `slug`
pub fn find_sample_article(slug: &str) -> Option<Article> {
    sample_articles()
        .into_iter()
        .find(|article| article.slug == slug || article.id == slug)
}

/// Fixtures standing in for the popular articles list
pub fn popular_sample_articles(limit: usize) -> Vec<Article> {
    sample_articles().into_iter().take(limit).collect()
}
