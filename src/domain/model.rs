use crate::utils::error::CheckerError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Subset of a Shopify `orders/create` payload read by the checker.
///
/// Every field is optional; anything else in the payload is ignored.
/// A contact that is not an object counts as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderEvent {
    #[serde(default)]
    pub id: Option<OrderId>,
    /// Kept raw; see [`OrderEvent::tags`].
    #[serde(default, rename = "tags")]
    pub raw_tags: Option<Value>,
    #[serde(default, deserialize_with = "lenient_contact")]
    pub customer: Option<Contact>,
    #[serde(default, deserialize_with = "lenient_contact")]
    pub billing_address: Option<Contact>,
    #[serde(default, deserialize_with = "lenient_contact")]
    pub shipping_address: Option<Contact>,
}

/// Anything in the payload that may carry a phone number.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Contact {
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,
}

impl OrderEvent {
    pub fn from_slice(body: &[u8]) -> crate::utils::error::Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Existing tag string. Absent or `null` means no tags; any other
    /// non-string is an error so a tag update never overwrites tags it
    /// could not read.
    pub fn tags(&self) -> crate::utils::error::Result<Option<&str>> {
        match &self.raw_tags {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(tags)) => Ok(Some(tags.as_str())),
            Some(other) => Err(CheckerError::InvalidOrderTags {
                found: other.to_string(),
            }),
        }
    }

    /// First non-empty phone from customer, billing address, shipping address.
    pub fn phone(&self) -> Option<&str> {
        [&self.customer, &self.billing_address, &self.shipping_address]
            .into_iter()
            .filter_map(|contact| contact.as_ref())
            .filter_map(|contact| contact.phone.as_deref())
            .find(|phone| !phone.is_empty())
    }

    /// Order id for log lines; `-` when the payload had none.
    pub fn display_id(&self) -> String {
        self.id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Opaque order identifier, kept as the JSON value Shopify sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub Value);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_contact<'de, D>(deserializer: D) -> Result<Option<Contact>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(contact @ Value::Object(_)) => serde_json::from_value(contact).ok(),
        _ => None,
    })
}

/// Digits-only phone starting with the country calling code.
/// Empty means the order carried no usable phone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedPhone(String);

impl NormalizedPhone {
    pub(crate) fn new(digits: String) -> Self {
        debug_assert!(digits.chars().all(|c| c.is_ascii_digit()));
        Self(digits)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NormalizedPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a registry lookup. Failures are captured, never raised.
#[derive(Debug)]
pub struct LookupResult {
    pub has_signal: bool,
    pub raw: Option<Value>,
    pub error: Option<CheckerError>,
}

impl LookupResult {
    pub fn skipped() -> Self {
        Self {
            has_signal: false,
            raw: None,
            error: None,
        }
    }

    pub fn found(has_signal: bool, raw: Value) -> Self {
        Self {
            has_signal,
            raw: Some(raw),
            error: None,
        }
    }

    pub fn failed(error: CheckerError) -> Self {
        Self {
            has_signal: false,
            raw: None,
            error: Some(error),
        }
    }
}

/// What the pipeline did with one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    NoPhone,
    Clear,
    LookupFailed,
    Flagged { tags: String },
    FlagFailed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order(value: Value) -> OrderEvent {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_phone_priority_customer_first() {
        let event = order(json!({
            "customer": {"phone": "0888111111"},
            "billing_address": {"phone": "0888222222"},
            "shipping_address": {"phone": "0888333333"}
        }));
        assert_eq!(event.phone(), Some("0888111111"));
    }

    #[test]
    fn test_phone_skips_empty_and_null_entries() {
        let event = order(json!({
            "customer": {"phone": ""},
            "billing_address": null,
            "shipping_address": {"phone": "0888333333"}
        }));
        assert_eq!(event.phone(), Some("0888333333"));

        let event = order(json!({"customer": {"phone": null}, "billing_address": {}}));
        assert_eq!(event.phone(), None);
    }

    #[test]
    fn test_numeric_phone_is_accepted() {
        let event = order(json!({"id": 1, "customer": {"phone": 888123456}}));
        assert_eq!(event.phone(), Some("888123456"));
    }

    #[test]
    fn test_non_object_contact_falls_through_to_next_location() {
        let event = order(json!({
            "customer": "Ivan Petrov",
            "billing_address": ["0888000000"],
            "shipping_address": {"phone": "0888333333"}
        }));
        assert_eq!(event.phone(), Some("0888333333"));

        let event = OrderEvent::from_slice(
            br#"{"customer": 5, "billing_address": {"phone": "0888222222"}}"#,
        )
        .unwrap();
        assert_eq!(event.phone(), Some("0888222222"));
    }

    #[test]
    fn test_tags_accessor() {
        assert_eq!(
            order(json!({"tags": "vip, wholesale"})).tags().unwrap(),
            Some("vip, wholesale")
        );
        assert_eq!(order(json!({"tags": null})).tags().unwrap(), None);
        assert_eq!(order(json!({})).tags().unwrap(), None);
    }

    #[test]
    fn test_wrongly_typed_tags_are_an_error() {
        for tags in [json!(["vip"]), json!(42), json!({"a": 1}), json!(true)] {
            let event = order(json!({"id": 1, "tags": tags.clone()}));
            assert!(
                matches!(event.tags(), Err(CheckerError::InvalidOrderTags { .. })),
                "{tags} should be rejected"
            );
        }
    }

    #[test]
    fn test_order_id_display_strips_quotes() {
        assert_eq!(OrderId(json!(450789469)).to_string(), "450789469");
        assert_eq!(OrderId(json!("gid-123")).to_string(), "gid-123");
        assert_eq!(order(json!({})).display_id(), "-");
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        assert!(matches!(
            OrderEvent::from_slice(b"[1, 2]"),
            Err(CheckerError::SerializationError(_))
        ));
        assert!(OrderEvent::from_slice(b"null").is_err());
        assert!(OrderEvent::from_slice(b"not json").is_err());
        assert!(OrderEvent::from_slice(b"{}").is_ok());
    }
}
