//! microCMS service domain normalization

use regex::Regex;
use std::sync::OnceLock;

/// Reduce a user supplied service domain to the bare subdomain microCMS expects
///
/// Accepts full URLs (`https://foo.microcms.io/api/v1`), partially qualified
/// hosts (`foo.microcms.io`) or bare names (`foo`) and returns `foo` for all of
/// them. Empty input stays empty.
pub fn sanitize_service_domain(domain: &str) -> String {
    static RE_PROTOCOL: OnceLock<Regex> = OnceLock::new();
    static RE_SUFFIX: OnceLock<Regex> = OnceLock::new();
    static RE_PATH: OnceLock<Regex> = OnceLock::new();

    let re_protocol = RE_PROTOCOL.get_or_init(|| Regex::new(r"(?i)^https?://").unwrap());
    let re_suffix = RE_SUFFIX.get_or_init(|| Regex::new(r"(?i)\.microcms\.io.*$").unwrap());
    let re_path = RE_PATH.get_or_init(|| Regex::new(r"/.*").unwrap());

    let sanitized = domain.trim();
    let sanitized = re_protocol.replace(sanitized, "");
    let sanitized = re_suffix.replace(&sanitized, "");
    let sanitized = re_path.replace(&sanitized, "");

    sanitized.into_owned()
}

/// Base URL of the content API for a sanitized service domain
pub fn api_base_url(service_domain: &str) -> String {
    format!("https://{service_domain}.microcms.io/api/v1")
}
