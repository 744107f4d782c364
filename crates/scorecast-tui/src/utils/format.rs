use std::cmp::Ordering;

/// Case-insensitive string comparison for sort columns
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Case-insensitive substring check
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmp_ignore_case() {
        assert_eq!(cmp_ignore_case("apple", "APPLE"), Ordering::Equal);
        assert_eq!(cmp_ignore_case("Apple", "banana"), Ordering::Less);
        assert_eq!(cmp_ignore_case("cherry", "Banana"), Ordering::Greater);
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("VIDYA VIKAS SCHOOL", "vikas"));
        assert!(contains_ignore_case("Solo Recitation", "RECIT"));
        assert!(!contains_ignore_case("Solo Recitation", "quiz"));
        assert!(contains_ignore_case("anything", ""));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello", 10), "Hello");
        assert_eq!(truncate("Hello World", 8), "Hello...");
        assert_eq!(truncate("Hi", 2), "Hi");
        assert_eq!(truncate("abcdef", 3), "abc");
    }
}
