use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckerError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Registry responded with status {status}: {body}")]
    RegistryStatusError { status: u16, body: String },

    #[error("Shopify responded with status {status}: {body}")]
    ShopifyStatusError { status: u16, body: String },

    #[error("Shopify is not configured: {field} is missing")]
    ShopifyNotConfigured { field: String },

    #[error("Order payload has no id")]
    MissingOrderId,

    #[error("Order tags must be a string, got {found}")]
    InvalidOrderTags { found: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl CheckerError {
    /// Operator-facing hint for what to change before trying again.
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CheckerError::HttpError(_) => "Check network connectivity to the remote service",
            CheckerError::IoError(_) => "Check that the listen address is free and reachable",
            CheckerError::SerializationError(_) => "Inspect the payload for invalid JSON",
            CheckerError::RegistryStatusError { status, .. } if *status == 401 || *status == 403 => {
                "Verify NEKOREKTEN_API_KEY"
            }
            CheckerError::RegistryStatusError { .. } => "Check the Nekorekten API status",
            CheckerError::ShopifyStatusError { status, .. } if *status == 401 || *status == 403 => {
                "Verify SHOPIFY_ADMIN_TOKEN and its write_orders scope"
            }
            CheckerError::ShopifyStatusError { .. } => {
                "Check SHOPIFY_STORE_DOMAIN and SHOPIFY_API_VERSION"
            }
            CheckerError::ShopifyNotConfigured { .. } => {
                "Set SHOPIFY_STORE_DOMAIN and SHOPIFY_ADMIN_TOKEN in the environment or .env"
            }
            CheckerError::MissingOrderId => "Make sure the webhook topic is orders/create",
            CheckerError::InvalidOrderTags { .. } => {
                "Tag the order by hand; its existing tags were left untouched"
            }
            CheckerError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and restart the service"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckerError>;
