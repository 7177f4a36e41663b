//! Fuzz target for whole-form validation.
//!
//! Tests that form validation never panics and that accepted forms always
//! produce a clean tokenization payload.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use payform::{is_checksum_valid, CardForm, CheckoutConfig, YearMonth};

#[derive(Debug, Arbitrary)]
struct FormInput {
    card_number: String,
    card_name: String,
    exp_date: String,
    cvc: String,
    year: u8,
    month: u8,
}

fuzz_target!(|input: FormInput| {
    let now = match YearMonth::new(2000 + i32::from(input.year % 100), u32::from(input.month % 12) + 1) {
        Some(now) => now,
        None => return,
    };

    let form = CardForm::new(input.card_number, input.card_name, input.exp_date, input.cvc);
    let _ = format!("{:?}", form);

    match form.validate_at(&CheckoutConfig::default(), now) {
        Ok(request) => {
            let number = request.card.number();
            assert!(number.bytes().all(|b| b.is_ascii_digit()));
            assert!(is_checksum_valid(number));
            assert_eq!(request.card.expiry_month().len(), 2);
            assert_eq!(request.card.expiry_year().len(), 2);
        }
        Err(errors) => {
            assert!(!errors.is_empty());
            let _ = errors.to_string();
        }
    }
});
