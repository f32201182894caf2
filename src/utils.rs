use regex::Regex;

/// Clamp a string to a maximum number of characters
pub fn clamp_chars(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else {
        value.chars().take(max_chars).collect()
    }
}

/// Format a URL the way a search result displays it (scheme stripped)
pub fn display_url(url: &str) -> String {
    if let Ok(regex) = Regex::new(r"^https?://") {
        regex.replace(url, "").to_string()
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_chars() {
        // Short strings pass through unchanged
        assert_eq!(clamp_chars("hello", 60), "hello");

        // Over-long strings are cut at the character boundary
        let long = "a".repeat(100);
        assert_eq!(clamp_chars(&long, 60).len(), 60);

        // Counting is character-based, not byte-based
        let accented = "é".repeat(10);
        assert_eq!(clamp_chars(&accented, 5).chars().count(), 5);
    }

    #[test]
    fn test_display_url() {
        assert_eq!(display_url("https://example.com/page"), "example.com/page");
        assert_eq!(display_url("http://example.com"), "example.com");

        // Non-http schemes and bare hosts are left alone
        assert_eq!(display_url("ftp://example.com"), "ftp://example.com");
        assert_eq!(display_url("example.com"), "example.com");
    }
}
