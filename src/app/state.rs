use crate::adapters::{NekorektenClient, ShopifyClient};
use crate::config::Config;
use crate::core::checker::OrderChecker;
use crate::utils::error::Result;
use std::sync::Arc;

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub checker: Arc<OrderChecker>,
}

impl AppState {
    pub fn new(checker: OrderChecker) -> Self {
        Self {
            checker: Arc::new(checker),
        }
    }

    /// Wires the HTTP clients from configuration. Reads no environment itself.
    pub fn from_config(config: &Config) -> Result<Self> {
        let lookup = NekorektenClient::new(config.registry())?;
        let tagger = ShopifyClient::new(config.shopify())?;

        Ok(Self::new(OrderChecker::with_country_code(
            Arc::new(lookup),
            Arc::new(tagger),
            config.home_country_code.clone(),
        )))
    }
}
