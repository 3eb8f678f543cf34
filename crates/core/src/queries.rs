//! Query building functions
//!
//! Pure functions that turn the loosely-typed parameters of an incoming URL
//! query string into the normalized query sent to microCMS, or into the
//! reduced query that drives the sample fallback.

use std::collections::HashMap;

use serde::Serialize;

/// A query string value: either a single value or a repeated key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Single(String),
    Many(Vec<String>),
}

impl QueryValue {
    /// First value, the only one that is ever used
    pub fn first(&self) -> Option<&str> {
        match self {
            QueryValue::Single(value) => Some(value.as_str()),
            QueryValue::Many(values) => values.first().map(String::as_str),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Single(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Single(value)
    }
}

/// Raw query parameters, keyed by name
pub type RawQuery = HashMap<String, QueryValue>;

/// Collect decoded `(name, value)` pairs into a [`RawQuery`].
///
/// A key that appears more than once becomes a [`QueryValue::Many`] holding
/// every value in the order it appeared.
pub fn collect_query_pairs<I>(pairs: I) -> RawQuery
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut query = RawQuery::new();

    for (key, value) in pairs {
        match query.remove(&key) {
            None => {
                query.insert(key, QueryValue::Single(value));
            }
            Some(QueryValue::Single(previous)) => {
                query.insert(key, QueryValue::Many(vec![previous, value]));
            }
            Some(QueryValue::Many(mut values)) => {
                values.push(value);
                query.insert(key, QueryValue::Many(values));
            }
        }
    }

    query
}

/// Normalized query accepted by the microCMS list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CmsQueries {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orders: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

impl CmsQueries {
    pub fn is_empty(&self) -> bool {
        self == &CmsQueries::default()
    }

    /// Query string pairs in a stable order, skipping unset values
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        let numbers = [
            ("limit", self.limit),
            ("offset", self.offset),
            ("depth", self.depth),
        ];
        for (key, value) in numbers {
            if let Some(value) = value {
                pairs.push((key, value.to_string()));
            }
        }

        let strings = [
            ("fields", &self.fields),
            ("orders", &self.orders),
            ("filters", &self.filters),
            ("q", &self.q),
        ];
        for (key, value) in strings {
            if let Some(value) = value {
                pairs.push((key, value.clone()));
            }
        }

        pairs
    }
}

/// Reduced query understood by the sample fallback
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleQueries {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub orders: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
}

/// Parse a numeric query value.
///
/// Surrounding whitespace is ignored and integral floats (`"10.0"`) are
/// accepted. Anything else, the empty string included, yields `None`.
pub fn parse_number(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(number) = value.parse::<i64>() {
        return Some(number);
    }

    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite() && number.fract() == 0.0)
        .map(|number| number as i64)
}

fn number_param(query: &RawQuery, key: &str) -> Option<i64> {
    query.get(key).and_then(QueryValue::first).and_then(parse_number)
}

fn string_param(query: &RawQuery, key: &str) -> Option<String> {
    query.get(key).and_then(QueryValue::first).map(str::to_string)
}

/// Filter fragment matching an exact category
pub fn category_filter(category: &str) -> String {
    format!("category[equals]{category}")
}

/// Filter fragment matching articles carrying a tag
pub fn tag_filter(tag: &str) -> String {
    format!("tags[contains]{tag}")
}

/// Filter fragment matching an exact slug
pub fn slug_filter(slug: &str) -> String {
    format!("slug[equals]{slug}")
}

/// Build the microCMS query from raw parameters
///
/// `category` and `tag` become filter fragments that are joined with any
/// explicit `filters` value using `[and]`, in the order category, tag,
/// explicit filters. Non-numeric `limit`, `offset` and `depth` values are
/// dropped.
pub fn build_cms_queries(query: &RawQuery) -> CmsQueries {
    let mut queries = CmsQueries {
        limit: number_param(query, "limit"),
        offset: number_param(query, "offset"),
        depth: number_param(query, "depth"),
        fields: string_param(query, "fields"),
        orders: string_param(query, "orders"),
        filters: string_param(query, "filters"),
        q: string_param(query, "q"),
    };

    let mut filters = Vec::new();

    if let Some(category) = string_param(query, "category").filter(|c| !c.is_empty()) {
        filters.push(category_filter(&category));
    }

    if let Some(tag) = string_param(query, "tag").filter(|t| !t.is_empty()) {
        filters.push(tag_filter(&tag));
    }

    if let Some(explicit) = queries.filters.as_ref().filter(|f| !f.is_empty()) {
        filters.push(explicit.clone());
    }

    if !filters.is_empty() {
        queries.filters = Some(filters.join("[and]"));
    }

    queries
}

/// Build the sample fallback query from raw parameters
pub fn build_sample_queries(query: &RawQuery) -> SampleQueries {
    SampleQueries {
        limit: number_param(query, "limit"),
        offset: number_param(query, "offset"),
        orders: string_param(query, "orders"),
        category: string_param(query, "category"),
        tag: string_param(query, "tag"),
    }
}
