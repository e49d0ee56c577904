//! Formatting helpers for rendered values.

/// Inserts thousands separators into an integer.
///
/// ```
/// assert_eq!(flixx_web::format::add_commas(1_234_567), "1,234,567");
/// ```
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn add_commas(n: u64) -> String {
    let digits = n.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats a vote average with one decimal place, e.g. `"7.8 / 10"`.
#[must_use]
#[allow(clippy::module_name_repetitions)]
pub fn format_rating(vote_average: f64) -> String {
    format!("{vote_average:.1} / 10")
}

/// Escapes text for use in HTML content and attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_commas() {
        // Arrange & Act & Assert
        assert_eq!(add_commas(0), "0");
        assert_eq!(add_commas(999), "999");
        assert_eq!(add_commas(1_000), "1,000");
        assert_eq!(add_commas(1_234_567), "1,234,567");
        assert_eq!(add_commas(463_517_383), "463,517,383");
    }

    #[test]
    fn test_format_rating_one_decimal() {
        // Arrange & Act & Assert
        assert_eq!(format_rating(7.84), "7.8 / 10");
        assert_eq!(format_rating(8.216), "8.2 / 10");
        assert_eq!(format_rating(8.667), "8.7 / 10");
        assert_eq!(format_rating(6.0), "6.0 / 10");
        assert_eq!(format_rating(0.0), "0.0 / 10");
    }

    #[test]
    fn test_format_rating_standard_rounding_gives_8_0_for_7_95() {
        // Arrange & Act & Assert
        assert_eq!(format_rating(7.95), "8.0 / 10");
    }

    #[test]
    fn test_escape() {
        // Arrange & Act & Assert
        assert_eq!(escape("Inside Out 2 & Friends"), "Inside Out 2 &amp; Friends");
        assert_eq!(
            escape(r#"<script>"x"</script>"#),
            "&lt;script&gt;&quot;x&quot;&lt;/script&gt;"
        );
        assert_eq!(escape("King's Landing"), "King&#39;s Landing");
    }
}
