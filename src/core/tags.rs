pub const DEFAULT_FLAG_TAG: &str = "nekorekten-flagged";

/// Merges `flag` into a Shopify comma-separated tag string.
///
/// Entries are trimmed and empty ones dropped. The flag is matched ignoring
/// ASCII case; an existing occurrence keeps its place and further copies of
/// it are removed, otherwise the flag is appended. Joined with `", "`.
pub fn merge_flag_tag(existing: Option<&str>, flag: &str) -> String {
    let mut tags: Vec<&str> = Vec::new();
    let mut has_flag = false;

    for tag in existing.unwrap_or_default().split(',').map(str::trim) {
        if tag.is_empty() {
            continue;
        }
        if tag.eq_ignore_ascii_case(flag) {
            if has_flag {
                continue;
            }
            has_flag = true;
        }
        tags.push(tag);
    }

    if !has_flag {
        tags.push(flag);
    }

    tags.join(", ")
}
