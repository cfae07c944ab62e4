use crate::domain::model::NormalizedPhone;

pub const DEFAULT_COUNTRY_CODE: &str = "359";

/// Normalizes a raw phone to the Bulgarian international form (`359...`).
pub fn normalize(raw: Option<&str>) -> NormalizedPhone {
    normalize_for(raw, DEFAULT_COUNTRY_CODE)
}

/// Strips everything but digits, drops a leading `00` and swaps a trunk `0`
/// for `country_code`. Numbers in any other shape pass through unchanged.
pub fn normalize_for(raw: Option<&str>, country_code: &str) -> NormalizedPhone {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return NormalizedPhone::default();
    };

    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = digits.strip_prefix("00").unwrap_or(&digits);

    if digits.starts_with(country_code) {
        return NormalizedPhone::new(digits.to_string());
    }

    match digits.strip_prefix('0') {
        Some(national) => NormalizedPhone::new(format!("{}{}", country_code, national)),
        None => NormalizedPhone::new(digits.to_string()),
    }
}
