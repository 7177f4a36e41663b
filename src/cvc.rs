//! Security code (CVC/CID) validation.
//!
//! The label and length of the security code depend on the card brand:
//!
//! - **CID** - American Express, 4 digits printed on the front
//! - **CVC** - Visa, Mastercard and Diners Club, 3 digits on the back
//!
//! Until the brand is known, the form shows `CVC` and accepts 3 or 4 digits.
//!
//! # Example
//!
//! ```
//! use payform::cvc::{validate_cvc, validate_cvc_for_brand};
//! use payform::CardBrand;
//!
//! assert!(validate_cvc("123").is_ok());
//! assert!(validate_cvc("1234").is_ok());
//!
//! assert!(validate_cvc_for_brand("1234", CardBrand::Amex).is_ok());
//! assert!(validate_cvc_for_brand("1234", CardBrand::Visa).is_err());
//! ```

use crate::CardBrand;
use std::fmt;
use zeroize::Zeroize;

/// Shortest accepted security code.
pub const MIN_CVC_DIGITS: usize = 3;

/// Longest accepted security code.
pub const MAX_CVC_DIGITS: usize = 4;

/// A validated security code.
#[derive(Clone)]
pub struct ValidatedCvc {
    digits: [u8; MAX_CVC_DIGITS],
    length: u8,
}

impl ValidatedCvc {
    /// Returns the code as a string.
    ///
    /// Only meant for building the tokenization request; never log it.
    pub fn as_string(&self) -> String {
        self.digits()
            .iter()
            .map(|&d| (b'0' + d) as char)
            .collect()
    }

    /// Returns the number of digits.
    #[inline]
    pub const fn length(&self) -> usize {
        self.length as usize
    }

    /// Returns the code digits as a slice.
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.length as usize]
    }
}

impl fmt::Debug for ValidatedCvc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedCvc")
            .field("value", &"***")
            .field("length", &self.length)
            .finish()
    }
}

impl fmt::Display for ValidatedCvc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", "*".repeat(self.length as usize))
    }
}

impl Drop for ValidatedCvc {
    fn drop(&mut self) {
        self.digits.zeroize();
    }
}

/// Errors that can occur during security code validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CvcError {
    /// The input is empty.
    #[error("security code is empty")]
    Empty,
    /// The code contains a non-digit character.
    #[error("invalid character '{character}' at position {position}")]
    InvalidCharacter {
        /// The invalid character found.
        character: char,
        /// Position of the invalid character.
        position: usize,
    },
    /// The code is not 3 or 4 digits long.
    #[error("security code must be 3 or 4 digits, got {length}")]
    InvalidLength {
        /// Number of characters provided.
        length: usize,
    },
    /// The code length doesn't match the card brand.
    #[error("{brand} cards require a {expected} digit {label}, got {length}")]
    WrongLengthForBrand {
        /// The card brand.
        brand: CardBrand,
        /// Field label for this brand.
        label: &'static str,
        /// Number of digits provided.
        length: usize,
        /// Digits the brand requires.
        expected: usize,
    },
}

/// Validates a security code of 3 or 4 ASCII digits.
pub fn validate_cvc(input: &str) -> Result<ValidatedCvc, CvcError> {
    if input.is_empty() {
        return Err(CvcError::Empty);
    }

    let mut digits = [0u8; MAX_CVC_DIGITS];
    let mut count = 0;

    for (position, c) in input.chars().enumerate() {
        if !c.is_ascii_digit() {
            digits.zeroize();
            return Err(CvcError::InvalidCharacter {
                character: c,
                position,
            });
        }
        if count >= MAX_CVC_DIGITS {
            digits.zeroize();
            return Err(CvcError::InvalidLength {
                length: input.chars().count(),
            });
        }
        digits[count] = c as u8 - b'0';
        count += 1;
    }

    if count < MIN_CVC_DIGITS {
        digits.zeroize();
        return Err(CvcError::InvalidLength { length: count });
    }

    Ok(ValidatedCvc {
        digits,
        length: count as u8,
    })
}

/// Validates a security code against the brand's required length.
///
/// `CardBrand::Unknown` accepts either length.
pub fn validate_cvc_for_brand(input: &str, brand: CardBrand) -> Result<ValidatedCvc, CvcError> {
    let cvc = validate_cvc(input)?;

    if let Some(card_type) = brand.card_type() {
        if cvc.length() != card_type.code.size {
            return Err(CvcError::WrongLengthForBrand {
                brand,
                label: card_type.code.name,
                length: cvc.length(),
                expected: card_type.code.size,
            });
        }
    }

    Ok(cvc)
}

/// Checks if a string is a valid security code (3 or 4 digits).
#[inline]
pub fn is_cvc_valid(input: &str) -> bool {
    validate_cvc(input).is_ok()
}

/// Checks if a string is a valid security code for a specific brand.
#[inline]
pub fn is_cvc_valid_for_brand(input: &str, brand: CardBrand) -> bool {
    validate_cvc_for_brand(input, brand).is_ok()
}
