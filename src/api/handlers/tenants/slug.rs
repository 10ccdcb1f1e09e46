//! Subdomain normalization helpers used by the tenants API.
//!
//! Subdomains are normalized to lowercase `a-z0-9-` with collapsing
//! separators and length bounds enforced by callers.

/// Normalizes user input into a URL-safe subdomain (`a-z0-9-`) within the
/// provided length bounds. Returns `None` when the normalized result is empty
/// or outside `min..=max`. Uniqueness stays the store's concern.
pub(crate) fn normalize_subdomain(input: &str, min: usize, max: usize) -> Option<String> {
    let mut slug = String::new();
    let mut prev_dash = false;
    for ch in input.trim().to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }
    let trimmed = slug.trim_matches('-').to_string();
    if trimmed.is_empty() {
        return None;
    }
    let truncated: String = trimmed.chars().take(max).collect();
    let normalized = truncated.trim_matches('-').to_string();
    if normalized.len() < min || normalized.len() > max {
        return None;
    }
    Some(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_collapses_separators() {
        assert_eq!(
            normalize_subdomain("  Acme  Corp ", 3, 63).as_deref(),
            Some("acme-corp")
        );
        assert_eq!(
            normalize_subdomain("acme..corp", 3, 63).as_deref(),
            Some("acme-corp")
        );
    }

    #[test]
    fn strips_leading_and_trailing_dashes() {
        assert_eq!(normalize_subdomain("--acme--", 3, 63).as_deref(), Some("acme"));
    }

    #[test]
    fn rejects_empty_and_out_of_bounds() {
        assert_eq!(normalize_subdomain("!!", 3, 63), None);
        assert_eq!(normalize_subdomain("ab", 3, 63), None);
        let long = "a".repeat(64);
        assert_eq!(normalize_subdomain(&long, 3, 63).map(|s| s.len()), Some(63));
    }
}
