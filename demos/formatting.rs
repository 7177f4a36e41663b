//! Card number formatting example.
//!
//! Run with: `cargo run --example formatting`

use payform::{format, mask};

fn main() {
    println!("=== Card Number Formatting ===\n");

    // -------------------------------------------------------------------------
    // Auto-formatting based on brand
    // -------------------------------------------------------------------------
    println!("--- Auto-formatting (brand-aware) ---\n");

    let cards = [
        ("4242424242424242", "Visa (4-4-4-4)"),
        ("5555555555554444", "Mastercard (4-4-4-4)"),
        ("378282246310005", "Amex (4-6-5)"),
        ("30569309025904", "Diners Club (4-6-4)"),
        ("4111111111111111111", "Visa 19 (4-4-4-4-3)"),
    ];

    for (number, description) in cards {
        println!("  {}", description);
        println!("    Input:  {}", number);
        println!("    Output: {}", format::format_card_number(number));
        println!("    Masked: {}", mask::mask_number(number));
        println!();
    }

    // -------------------------------------------------------------------------
    // As-you-type formatting
    // -------------------------------------------------------------------------
    println!("--- As-you-type ---\n");

    let typed = "378282246310005";
    for end in 1..=typed.len() {
        println!("    {:15} -> {}", &typed[..end], format::format_card_number(&typed[..end]));
    }
    println!();

    // -------------------------------------------------------------------------
    // Custom separators
    // -------------------------------------------------------------------------
    println!("--- Custom Separators ---\n");

    let number = "4242424242424242";
    for sep in [" ", "-", " - "] {
        println!(
            "    Separator '{}': {}",
            sep,
            format::format_with_separator(number, sep)
        );
    }
    println!();

    // -------------------------------------------------------------------------
    // Stripping separators
    // -------------------------------------------------------------------------
    println!("--- Stripping Separators ---\n");

    for input in ["4242 4242 4242 4242", "4242-4242-4242-4242", "4242.4242"] {
        println!(
            "    {:22} -> {:18} (valid format: {})",
            input,
            format::strip_separators(input),
            format::is_valid_format(input)
        );
    }
}
