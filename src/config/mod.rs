use crate::core::{phone, tags};
use crate::utils::error::{CheckerError, Result};
use crate::utils::validation::{
    validate_digits, validate_no_comma, validate_non_empty_string, validate_range, validate_url,
    Validate,
};
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_REGISTRY_URL: &str = "https://api.nekorekten.com";
pub const DEFAULT_SHOPIFY_API_VERSION: &str = "2025-10";

/// Service configuration. Every option can come from a flag or its
/// environment variable (a `.env` file is loaded before parsing).
#[derive(Debug, Clone, Parser)]
#[command(name = "nekorekten-checker")]
#[command(about = "Flags Shopify orders whose phone has reports in Nekorekten")]
pub struct Config {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    #[arg(long, env = "NEKOREKTEN_API_KEY", hide_env_values = true)]
    pub nekorekten_api_key: Option<String>,

    #[arg(long, env = "NEKOREKTEN_API_URL", default_value = DEFAULT_REGISTRY_URL)]
    pub nekorekten_api_url: String,

    #[arg(long, env = "NEKOREKTEN_SEARCH_MODE", default_value = "all")]
    pub search_mode: String,

    #[arg(long, env = "SHOPIFY_STORE_DOMAIN")]
    pub shopify_store_domain: Option<String>,

    #[arg(long, env = "SHOPIFY_ADMIN_TOKEN", hide_env_values = true)]
    pub shopify_admin_token: Option<String>,

    #[arg(long, env = "SHOPIFY_API_VERSION", default_value = DEFAULT_SHOPIFY_API_VERSION)]
    pub shopify_api_version: String,

    #[arg(long, env = "FLAG_TAG", default_value = tags::DEFAULT_FLAG_TAG)]
    pub flag_tag: String,

    #[arg(long, env = "HOME_COUNTRY_CODE", default_value = phone::DEFAULT_COUNTRY_CODE)]
    pub home_country_code: String,

    /// Timeout applied to each outbound call, in seconds.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    pub request_timeout_secs: u64,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Settings handed to the Nekorekten client.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub search_mode: String,
    pub timeout: Duration,
}

/// Settings handed to the Shopify client.
#[derive(Debug, Clone)]
pub struct ShopifyConfig {
    pub store_domain: Option<String>,
    pub admin_token: Option<String>,
    pub api_version: String,
    pub flag_tag: String,
    pub timeout: Duration,
}

impl ShopifyConfig {
    /// `https://<domain>`, or the domain itself when it already has a scheme.
    pub fn store_base_url(&self) -> Option<String> {
        let domain = self.store_domain.as_deref()?.trim_end_matches('/');
        if domain.contains("://") {
            Some(domain.to_string())
        } else {
            Some(format!("https://{}", domain))
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl Config {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| CheckerError::InvalidConfigValueError {
                field: "host".to_string(),
                value: self.host.clone(),
                reason: format!("Invalid listen address: {}", e),
            })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn registry(&self) -> RegistryConfig {
        RegistryConfig {
            base_url: self.nekorekten_api_url.trim_end_matches('/').to_string(),
            api_key: non_empty(&self.nekorekten_api_key),
            search_mode: self.search_mode.clone(),
            timeout: self.timeout(),
        }
    }

    pub fn shopify(&self) -> ShopifyConfig {
        ShopifyConfig {
            store_domain: non_empty(&self.shopify_store_domain),
            admin_token: non_empty(&self.shopify_admin_token),
            api_version: self.shopify_api_version.clone(),
            flag_tag: self.flag_tag.trim().to_string(),
            timeout: self.timeout(),
        }
    }

    /// Names of secrets that are not set. The service still starts without them.
    pub fn missing_secrets(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if non_empty(&self.nekorekten_api_key).is_none() {
            missing.push("NEKOREKTEN_API_KEY");
        }
        if non_empty(&self.shopify_store_domain).is_none() {
            missing.push("SHOPIFY_STORE_DOMAIN");
        }
        if non_empty(&self.shopify_admin_token).is_none() {
            missing.push("SHOPIFY_ADMIN_TOKEN");
        }
        missing
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<()> {
        validate_url("nekorekten_api_url", &self.nekorekten_api_url)?;
        validate_non_empty_string("search_mode", &self.search_mode)?;
        validate_non_empty_string("shopify_api_version", &self.shopify_api_version)?;
        validate_non_empty_string("flag_tag", &self.flag_tag)?;
        validate_no_comma("flag_tag", &self.flag_tag)?;
        validate_digits("home_country_code", &self.home_country_code, 3)?;
        validate_range("request_timeout_secs", self.request_timeout_secs, 1, 300)?;
        self.socket_addr()?;

        if let Some(base) = self.shopify().store_base_url() {
            validate_url("shopify_store_domain", &base)?;
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}
