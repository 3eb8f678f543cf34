use std::sync::{Arc, OnceLock};

use blogcms_core::domain::sanitize_service_domain;

use super::CmsClient;
use crate::config::CmsConfig;

/// Lazily builds the microCMS client and keeps it for its own lifetime
///
/// The first call to [`ClientFactory::client`] decides once and for all
/// whether a client exists; later calls, from any thread, get the same
/// answer.
#[derive(Debug)]
pub struct ClientFactory {
    config: CmsConfig,
    client: OnceLock<Option<Arc<CmsClient>>>,
}

impl ClientFactory {
    pub fn new(config: CmsConfig) -> Self {
        Self {
            config,
            client: OnceLock::new(),
        }
    }

    /// The cached client, or `None` when credentials are missing
    pub fn client(&self) -> Option<Arc<CmsClient>> {
        self.client.get_or_init(|| self.build()).clone()
    }

    /// Service domain of the cached client, if one was built
    pub fn service_domain(&self) -> Option<String> {
        self.client
            .get()
            .and_then(|client| client.as_ref())
            .map(|client| client.service_domain().to_string())
    }

    fn build(&self) -> Option<Arc<CmsClient>> {
        let service_domain = sanitize_service_domain(&self.config.service_domain);

        if service_domain.is_empty() || self.config.api_key.is_empty() {
            log::warn!("microCMS credentials are not set.");
            return None;
        }

        log::debug!(
            "[microcms] runtime config: service_domain={service_domain}, has_api_key={}",
            !self.config.api_key.is_empty()
        );

        match CmsClient::new(
            &service_domain,
            &self.config.api_key,
            self.config.api_base_url.as_deref(),
        ) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                log::error!("{e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(service_domain: &str, api_key: &str) -> CmsConfig {
        CmsConfig {
            service_domain: service_domain.to_string(),
            api_key: api_key.to_string(),
            api_base_url: None,
        }
    }

    #[test]
    fn test_missing_domain_yields_none() {
        let factory = ClientFactory::new(config("", "key"));
        assert!(factory.client().is_none());
        assert!(factory.service_domain().is_none());
    }

    #[test]
    fn test_missing_api_key_yields_none() {
        let factory = ClientFactory::new(config("blog", ""));
        assert!(factory.client().is_none());
    }

    #[test]
    fn test_domain_that_sanitizes_to_empty_yields_none() {
        let factory = ClientFactory::new(config("https://.microcms.io/api", "key"));
        assert!(factory.client().is_none());
    }

    #[test]
    fn test_invalid_api_key_yields_none() {
        let factory = ClientFactory::new(config("blog", "bad\nkey"));
        assert!(factory.client().is_none());
    }

    #[test]
    fn test_client_uses_sanitized_domain() {
        let factory = ClientFactory::new(config("https://blog.microcms.io/api/v1", "key"));

        assert!(factory.service_domain().is_none());
        let client = factory.client().unwrap();
        assert_eq!(client.service_domain(), "blog");
        assert_eq!(client.base_url(), "https://blog.microcms.io/api/v1");
        assert_eq!(factory.service_domain().as_deref(), Some("blog"));
    }

    #[test]
    fn test_client_is_cached() {
        let factory = ClientFactory::new(config("blog", "key"));

        let first = factory.client().unwrap();
        let second = factory.client().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_concurrent_first_access_builds_once() {
        let factory = Arc::new(ClientFactory::new(config("blog", "key")));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let factory = Arc::clone(&factory);
                std::thread::spawn(move || factory.client().unwrap())
            })
            .collect();

        let clients: Vec<Arc<CmsClient>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(clients.iter().all(|c| Arc::ptr_eq(c, &clients[0])));
    }
}
