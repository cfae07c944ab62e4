use serde_json::Value;

/// Shapes the registry response has been seen in, checked in this order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseShape<'a> {
    /// Bare list of reports.
    List(&'a [Value]),
    /// Envelope with an `items` list.
    Items(&'a [Value]),
    /// Envelope with only a numeric `count`.
    Count(f64),
    Unrecognized,
}

impl<'a> ResponseShape<'a> {
    pub fn classify(raw: &'a Value) -> Self {
        if let Value::Array(list) = raw {
            return ResponseShape::List(list);
        }
        if let Some(items) = raw.get("items").and_then(Value::as_array) {
            return ResponseShape::Items(items);
        }
        if let Some(count) = raw.get("count").and_then(Value::as_f64) {
            return ResponseShape::Count(count);
        }
        ResponseShape::Unrecognized
    }

    pub fn has_signal(&self) -> bool {
        match self {
            ResponseShape::List(list) | ResponseShape::Items(list) => !list.is_empty(),
            ResponseShape::Count(count) => *count > 0.0,
            ResponseShape::Unrecognized => false,
        }
    }
}

pub fn has_signal(raw: &Value) -> bool {
    ResponseShape::classify(raw).has_signal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_with_items() {
        assert!(has_signal(&json!({"items": [1, 2], "count": 2})));
        assert!(!has_signal(&json!({"items": [], "count": 0})));
    }

    #[test]
    fn test_bare_list() {
        assert!(has_signal(&json!([{"id": "r1", "phone": "359888000002"}])));
        assert!(!has_signal(&json!([])));
    }

    #[test]
    fn test_unrecognized_shapes_have_no_signal() {
        assert!(!has_signal(&json!({})));
        assert!(!has_signal(&json!(null)));
        assert!(!has_signal(&json!("3 reports")));
        assert!(!has_signal(&json!({"count": "3"})));
    }

    #[test]
    fn test_items_tier_wins_over_count() {
        // Empty items decides even when count disagrees.
        assert_eq!(
            ResponseShape::classify(&json!({"items": [], "count": 5})),
            ResponseShape::Items(&[])
        );
        assert!(!has_signal(&json!({"items": [], "count": 5})));
    }

    #[test]
    fn test_count_used_when_items_is_not_a_list() {
        assert!(has_signal(&json!({"count": 1})));
        assert!(has_signal(&json!({"items": null, "count": 3})));
        assert!(!has_signal(&json!({"items": {"a": 1}, "count": 0})));
    }
}
