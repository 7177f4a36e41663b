//! # payform
//!
//! Card validation core for a payment form.
//!
//! ## Features
//!
//! - Brand classification from the leading digits, usable while typing
//! - Luhn checksum validation
//! - `MM/YY` expiry validation against the current UTC month
//! - Brand-aware security code (CVC/CID) validation
//! - Whole-form validation producing a tokenization request
//! - Brand-aware display grouping and masking
//! - Multiple interfaces: library, CLI, REST API, WASM
//!
//! ## Quick Start
//!
//! ```rust
//! use payform::{classify, is_checksum_valid, is_expiry_valid_at, CardBrand, YearMonth};
//!
//! assert_eq!(classify("4242 4242 4242 4242"), CardBrand::Visa);
//! assert_eq!(classify("3782"), CardBrand::Amex);
//! assert_eq!(classify("9"), CardBrand::Unknown);
//!
//! assert!(is_checksum_valid("4242 4242 4242 4242"));
//! assert!(!is_checksum_valid("4242 4242 4242 4241"));
//!
//! let now = YearMonth::new(2020, 1).unwrap();
//! assert!(is_expiry_valid_at("02/20", now));
//! assert!(!is_expiry_valid_at("12/19", now));
//! ```
//!
//! ## Form Submission
//!
//! ```rust
//! use payform::{CardForm, CheckoutConfig, Field, YearMonth};
//!
//! let now = YearMonth::new(2026, 10).unwrap();
//! let config = CheckoutConfig::default();
//!
//! let form = CardForm::new("5555 5555 5555 4444", "Ada Lovelace", "08/29", "321");
//! let request = form.validate_at(&config, now).unwrap();
//! assert_eq!(request.currency, "USD");
//!
//! let form = CardForm::new("5555 5555 5555 4444", "", "08/20", "321");
//! let errors = form.validate_at(&config, now).unwrap_err();
//! assert!(errors.has(Field::CardName));
//! assert!(errors.has(Field::ExpDate));
//! ```
//!
//! ## Card Formatting
//!
//! ```rust
//! use payform::format;
//!
//! assert_eq!(format::format_card_number("4242424242424242"), "4242 4242 4242 4242");
//! assert_eq!(format::format_card_number("378282246310005"), "3782 822463 10005");
//! assert_eq!(format::strip_separators("4242-4242 4242"), "424242424242");
//! ```
//!
//! ## Supported Card Brands
//!
//! | Brand | Prefix | Length | Code |
//! |-------|--------|--------|------|
//! | Visa | 4 | 13, 16, 19 | CVC, 3 |
//! | Mastercard | 51-55, 2221-2720 | 16 | CVC, 3 |
//! | American Express | 34, 37 | 15 | CID, 4 |
//! | Diners Club | 300-305, 36, 38 | 14, 16, 19 | CVC, 3 |
//!
//! Anything else classifies as [`CardBrand::Unknown`].
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `cli` | Command-line tool |
//! | `server` | REST API with Swagger UI |
//! | `wasm` | WebAssembly support |
//!
//! ## Security
//!
//! - Form values and token payloads are zeroized on drop
//! - `Debug` output masks card numbers and never shows security codes
//! - Log events only carry masked card numbers
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod card;
pub mod config;
pub mod cvc;
pub mod detect;
pub mod expiry;
pub mod form;
pub mod format;
pub mod luhn;
pub mod mask;

#[cfg(feature = "wasm")]
mod wasm;

// Re-export main types at crate root
pub use card::{CardBrand, CardType, SecurityCode, CARD_TYPES, MAX_CARD_DIGITS, MIN_CARD_DIGITS};
pub use config::{CheckoutConfig, ConfigError};
pub use detect::{classify, classify_with};
pub use expiry::{is_expiry_valid, is_expiry_valid_at, YearMonth};
pub use form::{
    CardForm, Field, FieldError, FormErrors, TestScenario, TokenCard, TokenRequest,
};
pub use luhn::is_checksum_valid;

#[cfg(test)]
mod tests {
    use super::*;

    const VISA: &str = "4242 4242 4242 4242";
    const VISA_13: &str = "4222222222222";
    const MASTERCARD: &str = "5555 5555 5555 4444";
    const MASTERCARD_2: &str = "2223 0031 2200 3222";
    const AMEX: &str = "3782 822463 10005";
    const DINERS: &str = "3056 930902 5904";

    fn jan_2020() -> YearMonth {
        YearMonth::new(2020, 1).unwrap()
    }

    #[test]
    fn test_classify_canonical_numbers() {
        assert_eq!(classify(VISA), CardBrand::Visa);
        assert_eq!(classify(VISA_13), CardBrand::Visa);
        assert_eq!(classify(MASTERCARD), CardBrand::Mastercard);
        assert_eq!(classify(MASTERCARD_2), CardBrand::Mastercard);
        assert_eq!(classify(AMEX), CardBrand::Amex);
        assert_eq!(classify(DINERS), CardBrand::DinersClub);
    }

    #[test]
    fn test_classify_while_typing() {
        assert_eq!(classify(""), CardBrand::Unknown);
        assert_eq!(classify("4"), CardBrand::Visa);
        assert_eq!(classify("5"), CardBrand::Unknown);
        assert_eq!(classify("55"), CardBrand::Mastercard);
        assert_eq!(classify("37"), CardBrand::Amex);
        assert_eq!(classify("222"), CardBrand::Unknown);
        assert_eq!(classify("2221"), CardBrand::Mastercard);
    }

    #[test]
    fn test_checksum_canonical_numbers() {
        for number in [VISA, VISA_13, MASTERCARD, MASTERCARD_2, AMEX, DINERS] {
            assert!(is_checksum_valid(number), "{}", number);
        }
        assert!(!is_checksum_valid("4242 4242 4242 4241"));
        assert!(!is_checksum_valid(""));
        assert!(!is_checksum_valid("0"));
        assert!(is_checksum_valid("00"));
    }

    #[test]
    fn test_expiry_reference_cases() {
        let now = jan_2020();
        assert!(is_expiry_valid_at("02/20", now));
        assert!(is_expiry_valid_at("01/20", now));
        assert!(is_expiry_valid_at("12/20", now));
        assert!(!is_expiry_valid_at("12/19", now));
        assert!(!is_expiry_valid_at("", now));
        assert!(!is_expiry_valid_at("0120", now));
    }

    #[test]
    fn test_security_code_follows_brand() {
        assert_eq!(classify(AMEX).security_code().name, "CID");
        assert_eq!(classify(AMEX).security_code().size, 4);
        assert_eq!(classify(VISA).security_code().name, "CVC");
        assert_eq!(classify(MASTERCARD).security_code().name, "CVC");
        assert_eq!(classify("").security_code(), SecurityCode::DEFAULT);
    }

    #[test]
    fn test_submit_flow() {
        let now = YearMonth::new(2026, 10).unwrap();
        let form = CardForm::new(AMEX, "Grace Hopper", "11/27", "1234");
        let request = form.validate_at(&CheckoutConfig::default(), now).unwrap();
        assert_eq!(request.card.number(), "378282246310005");
    }

    #[test]
    fn test_public_types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CardBrand>();
        assert_send_sync::<CardType>();
        assert_send_sync::<YearMonth>();
        assert_send_sync::<CheckoutConfig>();
        assert_send_sync::<FieldError>();
    }
}
