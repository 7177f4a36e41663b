//! Basic card validation example.
//!
//! Run with: `cargo run --example basic`

use payform::{classify, is_checksum_valid, is_expiry_valid, CardBrand};

fn main() {
    println!("=== Basic Card Validation ===\n");

    // Example 1: Classify while typing
    let typed = "3782 822463 10005";
    println!("Typing: {}", typed);
    let mut prefix = String::new();
    for c in typed.chars() {
        prefix.push(c);
        if c == ' ' {
            continue;
        }
        let brand = classify(&prefix);
        println!(
            "  {:18} -> {:16} ({})",
            prefix,
            brand.name(),
            brand.security_code().name
        );
    }
    println!();

    // Example 2: Checksum
    let test_cards = [
        ("4242 4242 4242 4242", "Visa"),
        ("5555 5555 5555 4444", "Mastercard"),
        ("3782 822463 10005", "Amex"),
        ("3056 930902 5904", "Diners Club"),
        ("4242 4242 4242 4241", "Invalid (bad checksum)"),
        ("4242.4242.4242.4242", "Invalid (foreign separator)"),
    ];

    println!("Checksum checks:");
    for (number, description) in test_cards {
        println!(
            "  {:20} - {:28}: {}",
            number,
            description,
            if is_checksum_valid(number) { "VALID" } else { "INVALID" }
        );
    }
    println!();

    // Example 3: Expiry against the current month
    println!("Expiry checks:");
    for date in ["12/99", "01/20", "13/99", "1/30", "garbage"] {
        println!(
            "  {:8}: {}",
            date,
            if is_expiry_valid(date) { "VALID" } else { "INVALID" }
        );
    }
    println!();

    // Example 4: Supported brands
    println!("Supported card brands:");
    for brand in CardBrand::KNOWN {
        let lengths: Vec<String> = brand
            .valid_lengths()
            .iter()
            .map(|l| l.to_string())
            .collect();
        let code = brand.security_code();
        println!(
            "  {:16} - Lengths: {:10} {}: {} digits",
            brand.name(),
            lengths.join(", "),
            code.name,
            code.size
        );
    }
}
