//! Luhn (mod 10) checksum validation.
//!
//! The Luhn algorithm detects single-digit typos and most adjacent
//! transpositions in card numbers. Starting from the rightmost digit, every
//! second digit is doubled (subtracting 9 when the result exceeds 9) and the
//! sum of all digits must be a multiple of 10.

use crate::format::extract_digits;

/// Lookup table for doubled digits: double the value, subtract 9 if >= 10.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Fewest digits a checksum-valid number may have.
pub const MIN_CHECKSUM_DIGITS: usize = 2;

/// Checks a raw card number string against the Luhn checksum.
///
/// Spaces and hyphens are ignored. Any other non-digit character, or fewer
/// than two digits, makes the result `false`. Never panics.
///
/// # Example
///
/// ```
/// use payform::is_checksum_valid;
///
/// assert!(is_checksum_valid("4242 4242 4242 4242"));
/// assert!(!is_checksum_valid("4242 4242 4242 4241"));
/// assert!(!is_checksum_valid("0"));
/// ```
pub fn is_checksum_valid(input: &str) -> bool {
    match extract_digits(input) {
        Some(digits) => validate(&digits),
        None => false,
    }
}

/// Validates a slice of digit values (0-9) with the Luhn algorithm.
///
/// # Example
///
/// ```
/// use payform::luhn::validate;
///
/// let digits = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert!(validate(&digits));
///
/// let invalid = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2];
/// assert!(!validate(&invalid));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.len() < MIN_CHECKSUM_DIGITS {
        return false;
    }

    compute_checksum(digits) % 10 == 0
}

/// Computes the Luhn sum (not reduced modulo 10) for a sequence of digits.
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u64 {
    // Position 0 is the rightmost (check) digit and is never doubled.
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 1 {
                DOUBLE_TABLE[digit as usize] as u64
            } else {
                digit as u64
            }
        })
        .sum()
}

/// Computes the check digit that makes `digits` followed by it Luhn-valid.
///
/// # Example
///
/// ```
/// use payform::luhn::generate_check_digit;
///
/// let partial = [4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4];
/// assert_eq!(generate_check_digit(&partial), 2);
/// ```
#[inline]
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Each existing digit moves one position left once the check digit is
    // appended, so the parity of doubling flips.
    let sum: u64 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 0 {
                DOUBLE_TABLE[digit as usize] as u64
            } else {
                digit as u64
            }
        })
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}
