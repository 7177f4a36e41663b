//! Fuzz target for expiry date parsing.
//!
//! Tests that expiry parsing never panics on arbitrary input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use payform::{expiry, is_expiry_valid, is_expiry_valid_at, YearMonth};

fuzz_target!(|input: (&str, u8, u8)| {
    let (data, year, month) = input;

    let _ = expiry::parse_expiry(data);
    let _ = expiry::validate_expiry(data);
    let _ = is_expiry_valid(data);

    if let Some(now) = YearMonth::new(2000 + i32::from(year % 100), u32::from(month % 12) + 1) {
        let valid = is_expiry_valid_at(data, now);
        if valid {
            assert!(expiry::parse_expiry(data).is_ok());
        }
    }

    if let Ok(exp) = expiry::parse_expiry(data) {
        let _ = exp.is_elapsed();
        let _ = exp.month_str();
        let _ = exp.year_str();
        let _ = exp.to_string();
    }
});
