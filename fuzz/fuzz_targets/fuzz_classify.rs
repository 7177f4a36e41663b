//! Fuzz target for brand classification.
//!
//! Classification must never panic and must ignore separators.

#![no_main]

use libfuzzer_sys::fuzz_target;
use payform::{classify, detect, format};

fuzz_target!(|data: &str| {
    let brand = classify(data);
    let _ = brand.security_code();
    let _ = detect::detect_card_type(data);

    // Only digits and separators can classify; stripping separators keeps the brand
    if format::is_valid_format(data) {
        let digits = format::strip_separators(data);
        assert_eq!(classify(&digits), brand, "separators changed the brand");
    }
});
