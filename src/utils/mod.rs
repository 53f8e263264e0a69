//! Small text helpers shared by the modules.

/// Case-insensitive substring test using Unicode lowercasing.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive equality using Unicode lowercasing.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// `Some(trimmed)` for non-blank input.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_match_ignores_case() {
        assert!(contains_ignore_case("The Midnight Library", "midnight"));
        assert!(!contains_ignore_case("Atomic Habits", "library"));
    }

    #[test]
    fn equality_handles_non_ascii() {
        assert!(eq_ignore_case("ÉMILE", "émile"));
    }

    #[test]
    fn blank_values_are_dropped() {
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(Some(" Weir ")), Some("Weir"));
        assert_eq!(non_blank(None), None);
    }
}
