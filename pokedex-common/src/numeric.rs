//! Lenient integer parsing for request parameters
//!
//! Query and path values are read the way browsers and older clients send
//! them: leading whitespace is skipped, an optional sign is accepted, and
//! digits are consumed up to the first character that is not one. `"1.0"`,
//! `"6abc"` and `" 25 "` are therefore 1, 6 and 25.

/// Parse the leading decimal integer of `raw`
///
/// Returns `None` when no digit follows the optional sign, or when the value
/// does not fit in an `i64`.
///
/// # Examples
/// ```
/// use pokedex_common::numeric::parse_leading_int;
///
/// assert_eq!(parse_leading_int("1.0"), Some(1));
/// assert_eq!(parse_leading_int("-3rd"), Some(-3));
/// assert_eq!(parse_leading_int("abc"), None);
/// ```
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    let sign_len = trimmed.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }

    let digits_len = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits_len == 0 {
        return None;
    }

    trimmed[..sign_len + digits_len].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_integers() {
        assert_eq!(parse_leading_int("0"), Some(0));
        assert_eq!(parse_leading_int("151"), Some(151));
        assert_eq!(parse_leading_int("+7"), Some(7));
        assert_eq!(parse_leading_int("-2"), Some(-2));
    }

    #[test]
    fn test_trailing_garbage_is_ignored() {
        assert_eq!(parse_leading_int("1.0"), Some(1));
        assert_eq!(parse_leading_int("6abc"), Some(6));
        assert_eq!(parse_leading_int("  25 "), Some(25));
        assert_eq!(parse_leading_int("3e2"), Some(3));
    }

    #[test]
    fn test_no_leading_digits() {
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("   "), None);
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(".5"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("+-1"), None);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(parse_leading_int("99999999999999999999"), None);
    }
}
