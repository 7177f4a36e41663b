//! Whole-form checkout example.
//!
//! Run with: `cargo run --example checkout`
//!
//! The charge comes from `PAYFORM_AMOUNT_CENTS` and `PAYFORM_CURRENCY` when set.

use payform::{CardForm, CheckoutConfig, Field, TestScenario};

fn main() {
    println!("=== Checkout ===\n");

    let config = match CheckoutConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    println!(
        "Charging {} {}\n",
        config.display_amount(),
        config.currency
    );

    let mut forms: Vec<(&str, CardForm)> = TestScenario::ALL
        .iter()
        .map(|scenario| (scenario.label(), scenario.form()))
        .collect();
    forms.push((
        "Wrong security code length",
        CardForm::new("3782 822463 10005", "Grace Hopper", "11/29", "123"),
    ));
    forms.push(("Half-filled form", CardForm::new("4242 4242", "", "01/20", "")));

    for (label, form) in &forms {
        println!("{}", label);
        println!("  Form: {:?}", form);
        println!("  Brand: {} ({})", form.brand().name(), form.security_code_label());

        match form.validate(&config) {
            Ok(request) => match serde_json::to_string_pretty(&request) {
                Ok(json) => println!("  Token request:\n{}", json),
                Err(e) => println!("  Could not encode request: {}", e),
            },
            Err(errors) => {
                for field in [Field::CardNumber, Field::CardName, Field::ExpDate, Field::Cvc] {
                    if let Some(error) = errors.get(field) {
                        println!("  {:10} {}", field.name(), error);
                    }
                }
            }
        }
        println!();
    }
}
