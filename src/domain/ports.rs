use crate::domain::model::{LookupResult, NormalizedPhone, OrderEvent};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Abuse-report registry keyed by phone number.
#[async_trait]
pub trait ReportLookup: Send + Sync {
    /// Never fails: transport and status errors land in `LookupResult::error`.
    async fn lookup(&self, phone: &NormalizedPhone) -> LookupResult;
}

/// Commerce platform side of the pipeline.
#[async_trait]
pub trait OrderTagger: Send + Sync {
    /// Merges the flag tag into the order's tags and writes them back.
    /// Returns the tag string that was sent.
    async fn add_flag(&self, order: &OrderEvent) -> Result<String>;
}
