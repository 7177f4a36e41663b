//! Fuzz target for card formatting and masking.
//!
//! Tests that formatting functions never panic on arbitrary input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use payform::{format, mask};

fuzz_target!(|data: &str| {
    let _ = format::format_with_separator(data, "-");
    let _ = format::format_with_separator(data, "");
    let _ = format::is_valid_format(data);
    let _ = format::extract_digits(data);

    // Formatting preserves the digits
    let formatted = format::format_card_number(data);
    let stripped = format::strip_separators(&formatted);
    let original_digits = format::strip_separators(data);
    assert_eq!(stripped, original_digits, "Format roundtrip should preserve digits");

    // Masking reveals at most four digits
    let masked = mask::mask_number(data);
    let visible = masked.chars().filter(|c| c.is_ascii_digit()).count();
    assert!(visible <= 4, "mask revealed {} digits", visible);
});
