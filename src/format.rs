//! Card number normalization and display formatting.
//!
//! Raw card numbers arrive from the form with separator characters typed by
//! the user or inserted by the input mask. This module strips them back to
//! digits and re-groups digits for display following each brand's `gaps`.
//!
//! # Format Conventions
//!
//! - **Visa/Mastercard** (16 digits): `XXXX XXXX XXXX XXXX`
//! - **American Express** (15 digits): `XXXX XXXXXX XXXXX`
//! - **Diners Club** (14 digits): `XXXX XXXXXX XXXX`
//!
//! # Example
//!
//! ```
//! use payform::format::{format_card_number, format_with_separator, strip_separators};
//!
//! assert_eq!(format_card_number("4242424242424242"), "4242 4242 4242 4242");
//! assert_eq!(format_card_number("378282246310005"), "3782 822463 10005");
//! assert_eq!(format_with_separator("4242424242424242", "-"), "4242-4242-4242-4242");
//! assert_eq!(strip_separators("4242 4242 4242 4242"), "4242424242424242");
//! ```

use crate::card::DEFAULT_GAPS;
use crate::detect::classify_digits;

/// Characters the form may place between digits.
pub const SEPARATORS: [char; 2] = [' ', '-'];

/// Returns true if `c` is a non-significant separator.
#[inline]
pub fn is_separator(c: char) -> bool {
    SEPARATORS.contains(&c)
}

/// Extracts digit values (0-9) from raw input, skipping separators.
///
/// Returns `None` as soon as any other character is found.
pub fn extract_digits(input: &str) -> Option<Vec<u8>> {
    let mut digits = Vec::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '0'..='9' => digits.push(c as u8 - b'0'),
            c if is_separator(c) => {}
            _ => return None,
        }
    }
    Some(digits)
}

/// Strips everything but ASCII digits.
///
/// This is the separator-free form the tokenization call expects.
///
/// # Example
///
/// ```
/// use payform::format::strip_separators;
///
/// assert_eq!(strip_separators("4242-4242 4242-4242"), "4242424242424242");
/// ```
pub fn strip_separators(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Returns true if the input contains only digits and separators.
pub fn is_valid_format(input: &str) -> bool {
    input.chars().all(|c| c.is_ascii_digit() || is_separator(c))
}

/// Formats a card number with spaces using the detected brand's grouping.
pub fn format_card_number(input: &str) -> String {
    format_with_separator(input, " ")
}

/// Formats a card number with a custom separator.
///
/// Works on partial input too, so it can re-render the field on every
/// keystroke:
///
/// ```
/// use payform::format::format_with_separator;
///
/// assert_eq!(format_with_separator("42424", " "), "4242 4");
/// assert_eq!(format_with_separator("3782822", " - "), "3782 - 822");
/// ```
pub fn format_with_separator(input: &str, separator: &str) -> String {
    let digits = strip_separators(input);
    if digits.is_empty() {
        return String::new();
    }

    let values: Vec<u8> = digits.bytes().map(|b| b - b'0').collect();
    let gaps = classify_digits(&values)
        .card_type()
        .map(|t| t.gaps)
        .unwrap_or(DEFAULT_GAPS);

    group_digits(&digits, gaps, separator)
}

/// Splits an all-digit string at the given offsets.
fn group_digits(digits: &str, gaps: &[usize], separator: &str) -> String {
    let mut result = String::with_capacity(digits.len() + gaps.len() * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && gaps.contains(&i) {
            result.push_str(separator);
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_visa_16() {
        assert_eq!(
            format_card_number("4111111111111111"),
            "4111 1111 1111 1111"
        );
    }

    #[test]
    fn test_format_visa_19() {
        assert_eq!(
            format_card_number("4111111111111111111"),
            "4111 1111 1111 1111 111"
        );
    }

    #[test]
    fn test_format_amex() {
        assert_eq!(
            format_card_number("378282246310005"),
            "3782 822463 10005"
        );
    }

    #[test]
    fn test_format_diners_14() {
        assert_eq!(
            format_card_number("30569309025904"),
            "3056 930902 5904"
        );
    }

    #[test]
    fn test_format_already_formatted() {
        assert_eq!(
            format_card_number("4111-1111-1111-1111"),
            "4111 1111 1111 1111"
        );
    }

    #[test]
    fn test_format_partial_input() {
        assert_eq!(format_card_number("4"), "4");
        assert_eq!(format_card_number("4111"), "4111");
        assert_eq!(format_card_number("41111"), "4111 1");
        // Not enough digits to detect Amex yet, then Amex layout kicks in
        assert_eq!(format_card_number("3"), "3");
        assert_eq!(format_card_number("3782822"), "3782 822");
        assert_eq!(format_card_number("37828224631"), "3782 822463 1");
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(format_card_number(""), "");
        assert_eq!(format_card_number("   "), "");
    }

    #[test]
    fn test_extract_digits() {
        assert_eq!(extract_digits("42 4-2"), Some(vec![4, 2, 4, 2]));
        assert_eq!(extract_digits(""), Some(vec![]));
        assert_eq!(extract_digits("42a42"), None);
        assert_eq!(extract_digits("4242.4242"), None);
    }

    #[test]
    fn test_strip_separators() {
        assert_eq!(strip_separators("4111 1111 1111 1111"), "4111111111111111");
        assert_eq!(strip_separators("4111-1111-1111-1111"), "4111111111111111");
    }

    #[test]
    fn test_is_valid_format() {
        assert!(is_valid_format("4111111111111111"));
        assert!(is_valid_format("4111 1111 1111 1111"));
        assert!(is_valid_format("4111-1111-1111-1111"));
        assert!(!is_valid_format("4111a111111111111"));
        assert!(!is_valid_format("4111_1111_1111_1111"));
    }
}
