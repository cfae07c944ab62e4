pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{NekorektenClient, ShopifyClient};
pub use crate::app::{create_router, start_server, AppState};
pub use crate::config::Config;
pub use crate::core::checker::OrderChecker;
pub use crate::utils::error::{CheckerError, Result};
