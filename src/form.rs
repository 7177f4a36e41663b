//! Card form submission.
//!
//! [`CardForm`] holds the raw values typed into the payment form. Validating
//! it runs every field rule, collects all failures at once so the form can
//! flag each field, and on success produces the [`TokenRequest`] the
//! tokenization call consumes.
//!
//! Per field, the first failing rule wins:
//!
//! | Field | Rules, in order |
//! |-------|-----------------|
//! | card number | required, digits and separators only, length for brand, Luhn checksum |
//! | card name | required |
//! | expiry | required, `MM/YY`, not elapsed |
//! | cvc | required, 3-4 digits, length for brand |
//!
//! # Example
//!
//! ```
//! use payform::{CardForm, CheckoutConfig};
//! use payform::expiry::YearMonth;
//!
//! let form = CardForm::new("4242 4242 4242 4242", "Ada Lovelace", "12/30", "123");
//! let now = YearMonth::new(2026, 10).unwrap();
//! let request = form.validate_at(&CheckoutConfig::default(), now).unwrap();
//!
//! assert_eq!(request.card.number(), "4242424242424242");
//! assert_eq!(request.card.expiry_month(), "12");
//! assert_eq!(request.card.expiry_year(), "30");
//! ```

use crate::card::CardBrand;
use crate::config::CheckoutConfig;
use crate::cvc::{validate_cvc_for_brand, CvcError};
use crate::detect::classify;
use crate::expiry::{self, ExpiryError, YearMonth};
use crate::format::{extract_digits, strip_separators};
use crate::luhn;
use crate::mask::mask_number;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Raw payment form values, exactly as typed.
#[derive(Clone, Default, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct CardForm {
    /// Card number, possibly with spaces from the input mask.
    pub card_number: String,
    /// Cardholder name.
    pub card_name: String,
    /// Expiry as `MM/YY`.
    pub exp_date: String,
    /// Security code.
    pub cvc: String,
}

impl CardForm {
    /// Creates a form from raw field values.
    pub fn new(
        card_number: impl Into<String>,
        card_name: impl Into<String>,
        exp_date: impl Into<String>,
        cvc: impl Into<String>,
    ) -> Self {
        Self {
            card_number: card_number.into(),
            card_name: card_name.into(),
            exp_date: exp_date.into(),
            cvc: cvc.into(),
        }
    }

    /// Brand classified from the card number typed so far.
    #[inline]
    pub fn brand(&self) -> CardBrand {
        classify(&self.card_number)
    }

    /// Label for the security code field, e.g. `CID` once Amex is detected.
    #[inline]
    pub fn security_code_label(&self) -> &'static str {
        self.brand().security_code().name
    }

    /// Validates every field against the current UTC month.
    pub fn validate(&self, config: &CheckoutConfig) -> Result<TokenRequest, FormErrors> {
        self.validate_at(config, YearMonth::now())
    }

    /// Validates every field, judging the expiry against `now`.
    pub fn validate_at(
        &self,
        config: &CheckoutConfig,
        now: YearMonth,
    ) -> Result<TokenRequest, FormErrors> {
        let brand = self.brand();

        let number = check_card_number(&self.card_number, brand);
        let name = check_card_name(&self.card_name);
        let expiry = check_expiry(&self.exp_date, now);
        let cvc = check_cvc(&self.cvc, brand);

        match (number, name, expiry, cvc) {
            (Ok(number), Ok(name), Ok(expiry), Ok(cvc)) => {
                tracing::debug!(
                    brand = %brand,
                    card = %mask_number(&self.card_number),
                    "card form accepted"
                );
                Ok(TokenRequest {
                    amount: config.amount(),
                    currency: config.currency.clone(),
                    card: TokenCard {
                        name,
                        number,
                        cvc,
                        expiry_month: expiry.month_str(),
                        expiry_year: expiry.year_str(),
                    },
                })
            }
            (number, name, expiry, cvc) => {
                let errors: Vec<FieldError> = [number.err(), name.err(), expiry.err(), cvc.err()]
                    .into_iter()
                    .flatten()
                    .collect();
                tracing::debug!(
                    brand = %brand,
                    card = %mask_number(&self.card_number),
                    errors = errors.len(),
                    "card form rejected"
                );
                Err(FormErrors(errors))
            }
        }
    }
}

impl fmt::Debug for CardForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardForm")
            .field("card_number", &mask_number(&self.card_number))
            .field("card_name", &self.card_name)
            .field("exp_date", &self.exp_date)
            .field("cvc", &"***")
            .finish()
    }
}

fn check_card_number(raw: &str, brand: CardBrand) -> Result<String, FieldError> {
    if raw.trim().is_empty() {
        return Err(FieldError::CardNumberRequired);
    }

    let mut digits = extract_digits(raw).ok_or(FieldError::CardNumberMalformed)?;
    let length = digits.len();
    let checksum_ok = luhn::validate(&digits);
    digits.zeroize();

    if !brand.is_valid_length(length) {
        return Err(FieldError::CardNumberIncomplete { brand, length });
    }
    if !checksum_ok {
        return Err(FieldError::CardNumberChecksum);
    }

    Ok(strip_separators(raw))
}

fn check_card_name(raw: &str) -> Result<String, FieldError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(FieldError::CardNameRequired);
    }
    Ok(name.to_string())
}

fn check_expiry(raw: &str, now: YearMonth) -> Result<expiry::ExpiryDate, FieldError> {
    if raw.trim().is_empty() {
        return Err(FieldError::ExpiryRequired);
    }
    if !expiry::is_well_formed(raw) {
        return Err(FieldError::ExpiryMalformed);
    }

    expiry::validate_expiry_at(raw, now).map_err(|e| match e {
        ExpiryError::Expired { .. } => FieldError::ExpiryElapsed,
        _ => FieldError::ExpiryMalformed,
    })
}

fn check_cvc(raw: &str, brand: CardBrand) -> Result<String, FieldError> {
    if raw.trim().is_empty() {
        return Err(FieldError::CvcRequired);
    }
    validate_cvc_for_brand(raw, brand)
        .map(|cvc| cvc.as_string())
        .map_err(FieldError::CvcInvalid)
}

/// The form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Card number.
    CardNumber,
    /// Cardholder name.
    CardName,
    /// Expiry date.
    ExpDate,
    /// Security code.
    Cvc,
}

impl Field {
    /// Form input name, as used in the JSON body.
    pub const fn name(&self) -> &'static str {
        match self {
            Field::CardNumber => "cardNumber",
            Field::CardName => "cardName",
            Field::ExpDate => "expDate",
            Field::Cvc => "cvc",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// Card number left empty.
    #[error("card number is required")]
    CardNumberRequired,
    /// Card number contains characters other than digits and separators.
    #[error("card number may only contain digits and spaces")]
    CardNumberMalformed,
    /// Digit count is not one the brand issues.
    #[error("card number is incomplete ({length} digits for {brand})")]
    CardNumberIncomplete {
        /// Brand classified from the prefix.
        brand: CardBrand,
        /// Digits typed.
        length: usize,
    },
    /// Luhn checksum failed.
    #[error("card number is incorrect")]
    CardNumberChecksum,
    /// Cardholder name left blank.
    #[error("cardholder name is required")]
    CardNameRequired,
    /// Expiry left empty.
    #[error("expiry date is required")]
    ExpiryRequired,
    /// Expiry is not `MM/YY`.
    #[error("expiry date must be MM/YY")]
    ExpiryMalformed,
    /// Expiry month has elapsed.
    #[error("card has expired")]
    ExpiryElapsed,
    /// Security code left empty.
    #[error("security code is required")]
    CvcRequired,
    /// Security code has the wrong shape for the brand.
    #[error("security code is incomplete: {0}")]
    CvcInvalid(#[source] CvcError),
}

impl FieldError {
    /// The field this error belongs to.
    pub const fn field(&self) -> Field {
        match self {
            Self::CardNumberRequired
            | Self::CardNumberMalformed
            | Self::CardNumberIncomplete { .. }
            | Self::CardNumberChecksum => Field::CardNumber,
            Self::CardNameRequired => Field::CardName,
            Self::ExpiryRequired | Self::ExpiryMalformed | Self::ExpiryElapsed => Field::ExpDate,
            Self::CvcRequired | Self::CvcInvalid(_) => Field::Cvc,
        }
    }
}

/// All field errors from one validation pass, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    /// The error for `field`, if it failed.
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field() == field)
    }

    /// Returns true if `field` failed.
    pub fn has(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    /// Iterates over the errors in field order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

impl IntoIterator for FormErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Gateway sandbox outcomes the preset test forms exercise.
///
/// Every preset passes local validation. The outcome only differs once the
/// sandbox gateway processes the token request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestScenario {
    /// The charge is approved.
    Approved,
    /// The gateway refuses to issue a token.
    DeclinedOnToken,
    /// A token is issued but the charge is declined.
    Declined,
}

impl TestScenario {
    /// Every scenario, in the order the form lists them.
    pub const ALL: [TestScenario; 3] = [
        TestScenario::Approved,
        TestScenario::DeclinedOnToken,
        TestScenario::Declined,
    ];

    /// Button label shown next to the form.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Approved => "Approved transaction",
            Self::DeclinedOnToken => "Declined on token request",
            Self::Declined => "Declined transaction",
        }
    }

    /// Form values that trigger this outcome in the sandbox.
    pub fn form(&self) -> CardForm {
        let number = match self {
            Self::Approved => "5451 9515 7492 5480",
            Self::DeclinedOnToken => "4574 4412 1519 0335",
            Self::Declined => "4349 0030 0004 7015",
        };
        CardForm::new(number, "John Doe", "12/30", "123")
    }
}

/// Payload for the external tokenization call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    /// Charge amount in major units.
    pub amount: f64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Card details.
    pub card: TokenCard,
}

/// Card details as the gateway expects them: digits only, expiry split.
#[derive(Clone, Serialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct TokenCard {
    name: String,
    number: String,
    cvc: String,
    expiry_month: String,
    expiry_year: String,
}

impl TokenCard {
    /// Cardholder name, trimmed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Card number without separators.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Security code.
    pub fn cvc(&self) -> &str {
        &self.cvc
    }

    /// Two-digit expiry month.
    pub fn expiry_month(&self) -> &str {
        &self.expiry_month
    }

    /// Two-digit expiry year.
    pub fn expiry_year(&self) -> &str {
        &self.expiry_year
    }
}

impl fmt::Debug for TokenCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCard")
            .field("name", &self.name)
            .field("number", &mask_number(&self.number))
            .field("cvc", &"***")
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .finish()
    }
}
