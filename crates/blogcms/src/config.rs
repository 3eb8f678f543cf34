use serde::Serialize;

/// What to do when no microCMS client can be built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FallbackPolicy {
    /// Report the upstream as unavailable (HTTP 502)
    Strict,
    /// Serve the bundled sample articles instead
    #[default]
    DegradeToFixture,
}

impl FallbackPolicy {
    /// What callers get while no microCMS client exists
    pub fn missing_client_notice(self) -> &'static str {
        match self {
            FallbackPolicy::Strict => "Article requests will fail until credentials are configured.",
            FallbackPolicy::DegradeToFixture => "Falling back to sample data.",
        }
    }
}

/// Configuration shared by every subcommand
#[derive(Clone, clap::Args)]
pub struct ConfigArgs {
    /// microCMS service domain (a bare name, a host or a full URL)
    #[clap(long, env = "MICROCMS_SERVICE_DOMAIN", global = true, default_value = "")]
    pub service_domain: String,

    /// microCMS API key
    #[clap(long, env = "MICROCMS_API_KEY", global = true, default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// Override the content API base URL (defaults to https://<domain>.microcms.io/api/v1)
    #[clap(long, env = "MICROCMS_API_BASE_URL", global = true)]
    pub api_base_url: Option<String>,

    /// Behavior when microCMS credentials are missing
    #[clap(
        long,
        env = "BLOG_FALLBACK_POLICY",
        global = true,
        value_enum,
        default_value = "degrade-to-fixture"
    )]
    pub fallback_policy: FallbackPolicy,

    /// Site name reported by the site metadata endpoint
    #[clap(long, env = "BLOG_SITE_NAME", global = true, default_value = "microCMS Blog")]
    pub site_name: String,

    /// Site description reported by the site metadata endpoint
    #[clap(
        long,
        env = "BLOG_SITE_DESCRIPTION",
        global = true,
        default_value = "Blog powered by microCMS"
    )]
    pub site_description: String,
}

impl std::fmt::Debug for ConfigArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigArgs")
            .field("service_domain", &self.service_domain)
            .field("has_api_key", &!self.api_key.is_empty())
            .field("api_base_url", &self.api_base_url)
            .field("fallback_policy", &self.fallback_policy)
            .field("site_name", &self.site_name)
            .finish()
    }
}

impl ConfigArgs {
    pub fn cms_config(&self) -> CmsConfig {
        CmsConfig {
            service_domain: self.service_domain.clone(),
            api_key: self.api_key.clone(),
            api_base_url: self.api_base_url.clone(),
        }
    }

    pub fn site_meta(&self) -> SiteMeta {
        SiteMeta {
            site_name: self.site_name.clone(),
            description: self.site_description.clone(),
        }
    }
}

/// Credentials and endpoint for the microCMS content API
#[derive(Clone, Default)]
pub struct CmsConfig {
    pub service_domain: String,
    pub api_key: String,
    pub api_base_url: Option<String>,
}

impl std::fmt::Debug for CmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmsConfig")
            .field("service_domain", &self.service_domain)
            .field("has_api_key", &!self.api_key.is_empty())
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// Public site metadata
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SiteMeta {
    pub site_name: String,
    pub description: String,
}
