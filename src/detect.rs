//! Card brand classification from leading digits.
//!
//! The Issuer Identification Number (IIN) at the start of a card number
//! identifies the card network. Classification walks an ordered table of
//! brand rules and returns the first brand whose pattern matches, so it
//! works on the partial number the user has typed so far.
//!
//! Brands are checked in table order: Visa, Mastercard, American Express,
//! Diners Club. A pattern only matches once the input has at least as many
//! digits as the pattern is wide; until then the result is
//! [`CardBrand::Unknown`].

use crate::card::{CardBrand, CardType, CARD_TYPES};
use crate::format::extract_digits;

/// Classifies a raw (possibly partial) card number.
///
/// Separators are stripped first. Empty input, input with foreign
/// characters and unmatched prefixes all yield `CardBrand::Unknown`.
///
/// # Example
///
/// ```
/// use payform::{classify, CardBrand};
///
/// assert_eq!(classify("4242 42"), CardBrand::Visa);
/// assert_eq!(classify("37"), CardBrand::Amex);
/// assert_eq!(classify("2221"), CardBrand::Mastercard);
/// assert_eq!(classify("222"), CardBrand::Unknown);
/// assert_eq!(classify(""), CardBrand::Unknown);
/// ```
#[inline]
pub fn classify(input: &str) -> CardBrand {
    classify_with(&CARD_TYPES, input)
}

/// Classifies a raw card number against a caller-supplied rule table.
///
/// Rules are evaluated in slice order and the first match wins.
pub fn classify_with(rules: &[CardType], input: &str) -> CardBrand {
    detect_card_type_with(rules, input)
        .map(|t| t.brand)
        .unwrap_or(CardBrand::Unknown)
}

/// Returns the full metadata record for the classified brand.
///
/// # Example
///
/// ```
/// use payform::detect::detect_card_type;
///
/// let amex = detect_card_type("3782 822463 10005").unwrap();
/// assert_eq!(amex.code.name, "CID");
/// assert_eq!(amex.code.size, 4);
/// assert!(detect_card_type("9").is_none());
/// ```
#[inline]
pub fn detect_card_type(input: &str) -> Option<&'static CardType> {
    detect_card_type_with(&CARD_TYPES, input)
}

/// Like [`detect_card_type`], against a caller-supplied rule table.
pub fn detect_card_type_with<'a>(rules: &'a [CardType], input: &str) -> Option<&'a CardType> {
    let digits = extract_digits(input)?;
    match_rules(rules, &digits)
}

/// Classifies already-extracted digit values (0-9).
#[inline]
pub fn classify_digits(digits: &[u8]) -> CardBrand {
    match_rules(&CARD_TYPES, digits)
        .map(|t| t.brand)
        .unwrap_or(CardBrand::Unknown)
}

fn match_rules<'a>(rules: &'a [CardType], digits: &[u8]) -> Option<&'a CardType> {
    if digits.is_empty() {
        return None;
    }
    rules.iter().find(|rule| rule.matches(digits))
}
