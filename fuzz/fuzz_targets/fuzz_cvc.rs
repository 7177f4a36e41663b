//! Fuzz target for security code validation.
//!
//! Tests that security code functions never panic on arbitrary input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use payform::{cvc, CardBrand};

fuzz_target!(|data: &str| {
    let _ = cvc::validate_cvc(data);
    let _ = cvc::is_cvc_valid(data);

    for brand in CardBrand::KNOWN.into_iter().chain([CardBrand::Unknown]) {
        let _ = cvc::validate_cvc_for_brand(data, brand);
        let _ = cvc::is_cvc_valid_for_brand(data, brand);
    }

    if let Ok(validated) = cvc::validate_cvc(data) {
        assert_eq!(validated.as_string(), data);
        let debug = format!("{:?}", validated);
        assert!(!debug.contains(data), "debug output leaked the code");
        let _ = format!("{}", validated);
    }
});
