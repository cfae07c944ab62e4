// Adapters layer: HTTP clients for the two external systems.

pub mod nekorekten;
pub mod shopify;

pub use nekorekten::NekorektenClient;
pub use shopify::ShopifyClient;
