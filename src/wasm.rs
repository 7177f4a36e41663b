//! WebAssembly bindings for the browser payment form.
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init, { classify, isChecksumValid, isExpiryValid, formatCardNumber } from 'payform';
//!
//! await init();
//!
//! // Re-render the number field and its brand logo on every keystroke
//! input.value = formatCardNumber(input.value);
//! logo.src = `/brands/${classify(input.value)}.svg`;
//!
//! // Field rules
//! isChecksumValid("4242 4242 4242 4242");  // true
//! isExpiryValid("12/30");                  // true
//!
//! // Whole form
//! const errors = validateForm("4242 4242 4242 4242", "Ada", "12/30", "123");
//! if (errors.length === 0) { submit(); }
//! ```

#![cfg(feature = "wasm")]

use crate::{CardForm, CheckoutConfig};
use wasm_bindgen::prelude::*;

/// Classifies a (partial) card number and returns the brand slug:
/// `visa`, `mastercard`, `amex`, `diners` or `unknown`.
#[wasm_bindgen]
pub fn classify(card_number: &str) -> String {
    crate::classify(card_number).slug().to_string()
}

/// Returns true if the card number passes the Luhn checksum.
#[wasm_bindgen(js_name = isChecksumValid)]
pub fn is_checksum_valid(card_number: &str) -> bool {
    crate::is_checksum_valid(card_number)
}

/// Returns true if the `MM/YY` expiry has not elapsed.
#[wasm_bindgen(js_name = isExpiryValid)]
pub fn is_expiry_valid(date: &str) -> bool {
    crate::is_expiry_valid(date)
}

/// Groups the digits for display using the brand's layout.
#[wasm_bindgen(js_name = formatCardNumber)]
pub fn format_card_number(card_number: &str) -> String {
    crate::format::format_card_number(card_number)
}

/// Label for the security code field (`CVC` or `CID`).
#[wasm_bindgen(js_name = securityCodeLabel)]
pub fn security_code_label(card_number: &str) -> String {
    crate::classify(card_number).security_code().name.to_string()
}

/// Number of digits the security code field expects.
#[wasm_bindgen(js_name = securityCodeSize)]
pub fn security_code_size(card_number: &str) -> usize {
    crate::classify(card_number).security_code().size
}

/// Result of validating a single field.
#[wasm_bindgen]
pub struct FieldResult {
    field: String,
    message: String,
}

#[wasm_bindgen]
impl FieldResult {
    /// Form field name (`cardNumber`, `cardName`, `expDate`, `cvc`).
    #[wasm_bindgen(getter)]
    pub fn field(&self) -> String {
        self.field.clone()
    }

    /// Human-readable message.
    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

/// Validates the whole form and returns one `FieldResult` per failing field.
///
/// An empty array means the form can be submitted.
#[wasm_bindgen(js_name = validateForm)]
pub fn validate_form(card_number: &str, card_name: &str, exp_date: &str, cvc: &str) -> js_sys::Array {
    let results = js_sys::Array::new();
    let form = CardForm::new(card_number, card_name, exp_date, cvc);

    if let Err(errors) = form.validate(&CheckoutConfig::default()) {
        for error in errors.iter() {
            let result = FieldResult {
                field: error.field().name().to_string(),
                message: error.to_string(),
            };
            results.push(&JsValue::from(result));
        }
    }

    results
}
