//! Fuzz target for the Luhn checksum.
//!
//! Tests that checksum functions never panic and maintain invariants.

#![no_main]

use libfuzzer_sys::fuzz_target;
use payform::{is_checksum_valid, luhn};

fuzz_target!(|data: &[u8]| {
    // Raw bytes as text
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = is_checksum_valid(text);
    }

    // Clamp values to valid digit range
    let digits: Vec<u8> = data.iter().map(|&b| b % 10).collect();

    let valid = luhn::validate(&digits);
    if digits.len() < luhn::MIN_CHECKSUM_DIGITS {
        assert!(!valid, "fewer than two digits must fail");
    }

    let text: String = digits.iter().map(|&d| (b'0' + d) as char).collect();
    assert_eq!(is_checksum_valid(&text), valid, "string and digit paths disagree");

    if !digits.is_empty() {
        let check = luhn::generate_check_digit(&digits);
        assert!(check <= 9, "Check digit should be 0-9");

        let mut with_check = digits.clone();
        with_check.push(check);
        assert!(luhn::validate(&with_check), "Adding check digit should make valid");
    }
});
