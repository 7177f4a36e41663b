//! Card brand identities and their static metadata.
//!
//! This module provides the `CardBrand` enum for identifying card networks
//! and the `CardType` records that describe each network: the leading-digit
//! patterns used for classification, accepted lengths, display grouping and
//! the security code the form should ask for.
//!
//! The records live in an immutable table, [`CARD_TYPES`], ordered by
//! classification priority.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported card brands.
///
/// `Unknown` is the sentinel returned when no brand pattern matches, including
/// for empty or partial input that is not yet long enough to disambiguate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    /// Visa - Prefix 4, lengths 13, 16, 19
    Visa,
    /// Mastercard - Prefix 51-55, 2221-2720, length 16
    Mastercard,
    /// American Express - Prefix 34, 37, length 15
    Amex,
    /// Diners Club - Prefix 36, 38, 300-305, lengths 14, 16, 19
    #[serde(rename = "diners")]
    DinersClub,
    /// No brand pattern matched.
    Unknown,
}

impl CardBrand {
    /// Every known brand, in classification priority order.
    pub const KNOWN: [CardBrand; 4] = [
        CardBrand::Visa,
        CardBrand::Mastercard,
        CardBrand::Amex,
        CardBrand::DinersClub,
    ];

    /// Returns the static metadata for this brand, `None` for `Unknown`.
    pub fn card_type(&self) -> Option<&'static CardType> {
        CARD_TYPES.iter().find(|t| t.brand == *self)
    }

    /// Returns true unless this is the `Unknown` sentinel.
    #[inline]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Returns the valid lengths for this card brand.
    ///
    /// `Unknown` accepts any length between [`MIN_CARD_DIGITS`] and
    /// [`MAX_CARD_DIGITS`].
    pub fn valid_lengths(&self) -> &'static [u8] {
        match self.card_type() {
            Some(card_type) => card_type.lengths,
            None => &ANY_LENGTH,
        }
    }

    /// Returns true if the given length is valid for this brand.
    #[inline]
    pub fn is_valid_length(&self, length: usize) -> bool {
        self.valid_lengths().iter().any(|&l| l as usize == length)
    }

    /// Returns the security code descriptor the form should ask for.
    ///
    /// Falls back to a three digit `CVC` while the brand is unknown.
    pub fn security_code(&self) -> SecurityCode {
        self.card_type()
            .map(|t| t.code)
            .unwrap_or(SecurityCode::DEFAULT)
    }

    /// Returns a human-readable name for the card brand.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::Amex => "American Express",
            Self::DinersClub => "Diners Club",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns the short identifier used by the form's brand display.
    #[inline]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Amex => "amex",
            Self::DinersClub => "diners",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when parsing a brand name fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown card brand '{0}'")]
pub struct ParseBrandError(pub String);

impl FromStr for CardBrand {
    type Err = ParseBrandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "visa" => Ok(Self::Visa),
            "mastercard" | "mc" => Ok(Self::Mastercard),
            "amex" | "american express" => Ok(Self::Amex),
            "diners" | "dinersclub" | "diners club" => Ok(Self::DinersClub),
            "unknown" => Ok(Self::Unknown),
            _ => Err(ParseBrandError(s.to_string())),
        }
    }
}

/// Label and length of the card's security code field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SecurityCode {
    /// Field label, e.g. `CVC` or `CID`.
    pub name: &'static str,
    /// Number of digits.
    pub size: usize,
}

impl SecurityCode {
    /// Descriptor used before a brand has been recognised.
    pub const DEFAULT: SecurityCode = SecurityCode {
        name: "CVC",
        size: 3,
    };
}

/// A fixed prefix or a numeric range over the first `width` digits.
///
/// `PrefixRange::exact(34, 2)` matches numbers starting with `34`;
/// `PrefixRange::range(2221, 2720, 4)` matches `2221` through `2720`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixRange {
    low: u32,
    high: u32,
    width: u8,
}

impl PrefixRange {
    /// A single fixed prefix of `width` digits.
    pub const fn exact(prefix: u32, width: u8) -> Self {
        Self {
            low: prefix,
            high: prefix,
            width,
        }
    }

    /// An inclusive range of `width`-digit prefixes.
    pub const fn range(low: u32, high: u32, width: u8) -> Self {
        Self { low, high, width }
    }

    /// Number of leading digits this pattern inspects.
    #[inline]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    /// Returns true if the leading digits fall within this pattern.
    ///
    /// Input shorter than the pattern width never matches, even when it is a
    /// prefix of a matching number.
    pub fn matches(&self, digits: &[u8]) -> bool {
        let width = self.width();
        if digits.len() < width {
            return false;
        }
        let lead = digits[..width]
            .iter()
            .fold(0u32, |acc, &d| acc * 10 + d as u32);
        (self.low..=self.high).contains(&lead)
    }
}

/// Static description of one card brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardType {
    /// The brand this record describes.
    pub brand: CardBrand,
    /// Leading-digit patterns, any of which identifies the brand.
    pub patterns: &'static [PrefixRange],
    /// Accepted total digit counts.
    pub lengths: &'static [u8],
    /// Digit offsets after which a display separator is inserted.
    pub gaps: &'static [usize],
    /// Security code field descriptor.
    pub code: SecurityCode,
}

impl CardType {
    /// Returns true if any of this brand's patterns matches the digits.
    #[inline]
    pub fn matches(&self, digits: &[u8]) -> bool {
        self.patterns.iter().any(|p| p.matches(digits))
    }
}

/// Maximum number of digits in a card number.
pub const MAX_CARD_DIGITS: usize = 19;

/// Minimum number of digits in a card number.
pub const MIN_CARD_DIGITS: usize = 13;

const ANY_LENGTH: [u8; 7] = [13, 14, 15, 16, 17, 18, 19];

/// Grouping used for brands without their own layout.
pub const DEFAULT_GAPS: &[usize] = &[4, 8, 12, 16];

/// Built-in brand table, in classification priority order.
pub static CARD_TYPES: [CardType; 4] = [
    CardType {
        brand: CardBrand::Visa,
        patterns: &[PrefixRange::exact(4, 1)],
        lengths: &[13, 16, 19],
        gaps: DEFAULT_GAPS,
        code: SecurityCode::DEFAULT,
    },
    CardType {
        brand: CardBrand::Mastercard,
        patterns: &[PrefixRange::range(51, 55, 2), PrefixRange::range(2221, 2720, 4)],
        lengths: &[16],
        gaps: DEFAULT_GAPS,
        code: SecurityCode {
            name: "CVC",
            size: 3,
        },
    },
    CardType {
        brand: CardBrand::Amex,
        patterns: &[PrefixRange::exact(34, 2), PrefixRange::exact(37, 2)],
        lengths: &[15],
        gaps: &[4, 10],
        code: SecurityCode {
            name: "CID",
            size: 4,
        },
    },
    CardType {
        brand: CardBrand::DinersClub,
        patterns: &[
            PrefixRange::exact(36, 2),
            PrefixRange::exact(38, 2),
            PrefixRange::range(300, 305, 3),
        ],
        lengths: &[14, 16, 19],
        gaps: &[4, 10],
        code: SecurityCode::DEFAULT,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_brand_valid_lengths() {
        assert!(CardBrand::Visa.is_valid_length(16));
        assert!(CardBrand::Visa.is_valid_length(13));
        assert!(CardBrand::Visa.is_valid_length(19));
        assert!(!CardBrand::Visa.is_valid_length(15));

        assert!(CardBrand::Amex.is_valid_length(15));
        assert!(!CardBrand::Amex.is_valid_length(16));

        assert!(CardBrand::Mastercard.is_valid_length(16));
        assert!(!CardBrand::Mastercard.is_valid_length(15));

        assert!(CardBrand::DinersClub.is_valid_length(14));
    }

    #[test]
    fn test_unknown_accepts_any_card_length() {
        assert!(CardBrand::Unknown.is_valid_length(MIN_CARD_DIGITS));
        assert!(CardBrand::Unknown.is_valid_length(MAX_CARD_DIGITS));
        assert!(!CardBrand::Unknown.is_valid_length(12));
        assert!(!CardBrand::Unknown.is_valid_length(20));
    }

    #[test]
    fn test_card_brand_names() {
        assert_eq!(CardBrand::Visa.name(), "Visa");
        assert_eq!(CardBrand::Amex.name(), "American Express");
        assert_eq!(CardBrand::Mastercard.to_string(), "Mastercard");
        assert_eq!(CardBrand::DinersClub.slug(), "diners");
    }

    #[test]
    fn test_security_codes() {
        assert_eq!(CardBrand::Amex.security_code().name, "CID");
        assert_eq!(CardBrand::Amex.security_code().size, 4);
        assert_eq!(CardBrand::Mastercard.security_code().name, "CVC");
        assert_eq!(CardBrand::Visa.security_code().size, 3);
        assert_eq!(CardBrand::Visa.security_code().name, "CVC");
        assert_eq!(CardBrand::DinersClub.security_code().name, "CVC");
        assert_eq!(CardBrand::Unknown.security_code(), SecurityCode::DEFAULT);
    }

    #[test]
    fn test_parse_brand() {
        assert_eq!("visa".parse::<CardBrand>(), Ok(CardBrand::Visa));
        assert_eq!("MC".parse::<CardBrand>(), Ok(CardBrand::Mastercard));
        assert_eq!("Diners Club".parse::<CardBrand>(), Ok(CardBrand::DinersClub));
        assert!("discover".parse::<CardBrand>().is_err());
    }

    #[test]
    fn test_slug_parses_back() {
        for brand in CardBrand::KNOWN.iter().chain([CardBrand::Unknown].iter()) {
            assert_eq!(brand.slug().parse::<CardBrand>(), Ok(*brand));
        }
    }

    #[test]
    fn test_prefix_range_matching() {
        let range = PrefixRange::range(2221, 2720, 4);
        assert!(range.matches(&[2, 2, 2, 1]));
        assert!(range.matches(&[2, 7, 2, 0, 9]));
        assert!(!range.matches(&[2, 7, 2, 1]));
        assert!(!range.matches(&[2, 2, 2, 0]));
        // Too few digits to decide
        assert!(!range.matches(&[2, 5]));
    }

    #[test]
    fn test_table_order_and_lookup() {
        let brands: Vec<CardBrand> = CARD_TYPES.iter().map(|t| t.brand).collect();
        assert_eq!(brands, CardBrand::KNOWN.to_vec());
        assert!(CardBrand::Unknown.card_type().is_none());
        assert_eq!(CardBrand::Amex.card_type().map(|t| t.gaps), Some(&[4, 10][..]));
    }

    #[test]
    fn test_serde_uses_slugs() {
        let json = serde_json::to_string(&CardBrand::DinersClub).unwrap();
        assert_eq!(json, "\"diners\"");
        let brand: CardBrand = serde_json::from_str("\"amex\"").unwrap();
        assert_eq!(brand, CardBrand::Amex);
    }

    #[test]
    fn test_card_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CardBrand>();
        assert_send_sync::<CardType>();
    }
}
