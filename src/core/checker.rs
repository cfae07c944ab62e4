use crate::core::phone;
use crate::domain::model::{CheckOutcome, OrderEvent};
use crate::domain::ports::{OrderTagger, ReportLookup};
use std::sync::Arc;

/// Runs one order through lookup and, on a signal, tagging.
///
/// Holds no per-request state; one instance is shared by all webhook tasks.
pub struct OrderChecker {
    lookup: Arc<dyn ReportLookup>,
    tagger: Arc<dyn OrderTagger>,
    country_code: String,
}

impl OrderChecker {
    pub fn new(lookup: Arc<dyn ReportLookup>, tagger: Arc<dyn OrderTagger>) -> Self {
        Self::with_country_code(lookup, tagger, phone::DEFAULT_COUNTRY_CODE)
    }

    pub fn with_country_code(
        lookup: Arc<dyn ReportLookup>,
        tagger: Arc<dyn OrderTagger>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            lookup,
            tagger,
            country_code: country_code.into(),
        }
    }

    pub async fn check(&self, order: &OrderEvent) -> CheckOutcome {
        let order_id = order.display_id();
        let phone = phone::normalize_for(order.phone(), &self.country_code);

        tracing::info!("🔎 Order {}: looking up phone in Nekorekten", order_id);
        tracing::debug!("Order {}: normalized phone '{}'", order_id, phone);

        let result = self.lookup.lookup(&phone).await;

        if let Some(err) = &result.error {
            tracing::warn!(
                "⚠️ Order {}: registry lookup failed, treating as no signal: {}",
                order_id,
                err
            );
            return CheckOutcome::LookupFailed;
        }

        if !result.has_signal {
            if phone.is_empty() {
                return CheckOutcome::NoPhone;
            }
            tracing::info!("✅ Order {}: no reports for this phone", order_id);
            return CheckOutcome::Clear;
        }

        tracing::warn!("🚩 Order {}: reports found, flagging order", order_id);

        match self.tagger.add_flag(order).await {
            Ok(tags) => CheckOutcome::Flagged { tags },
            Err(e) => {
                tracing::error!(
                    "❌ Order {}: could not flag order: {} ({})",
                    order_id,
                    e,
                    e.recovery_suggestion()
                );
                CheckOutcome::FlagFailed
            }
        }
    }
}
