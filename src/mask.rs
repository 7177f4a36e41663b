//! Masking for card numbers that might reach logs or debug output.
//!
//! Only the last four digits are ever shown. Anything with four digits or
//! fewer is masked completely, so a half-typed number never leaks.

/// Masks a raw card number showing only the last 4 digits.
///
/// Separators are ignored and the masked part is grouped in fours.
///
/// # Example
///
/// ```
/// use payform::mask::mask_number;
///
/// assert_eq!(mask_number("4242 4242 4242 4242"), "****-****-****-4242");
/// assert_eq!(mask_number("378282246310005"), "****-****-***0005");
/// assert_eq!(mask_number("424"), "***");
/// ```
pub fn mask_number(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let len = digits.len();

    if len <= 4 {
        return "*".repeat(len);
    }

    let masked_count = len - 4;
    let mut result = String::with_capacity(len + len / 4);

    for i in 0..masked_count {
        if i > 0 && i % 4 == 0 {
            result.push('-');
        }
        result.push('*');
    }

    if masked_count % 4 == 0 {
        result.push('-');
    }

    result.extend(&digits[len - 4..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_16_digits() {
        assert_eq!(mask_number("4111111111111111"), "****-****-****-1111");
        assert_eq!(mask_number("4111-1111-1111-1111"), "****-****-****-1111");
        assert_eq!(mask_number("4111 1111 1111 1111"), "****-****-****-1111");
    }

    #[test]
    fn test_mask_15_digits() {
        let masked = mask_number("378282246310005");
        assert!(masked.ends_with("0005"));
        assert!(!masked.contains("3782"));
    }

    #[test]
    fn test_mask_short_input() {
        assert_eq!(mask_number(""), "");
        assert_eq!(mask_number("4"), "*");
        assert_eq!(mask_number("4242"), "****");
        assert_eq!(mask_number("42424"), "*2424");
    }
}
