//! CLI tool for payment form validation.
//!
//! # Usage
//!
//! ```bash
//! # Classify a (partial) card number
//! payform classify 3782
//!
//! # Check the Luhn checksum
//! payform checksum "4242 4242 4242 4242"
//!
//! # Check an expiry date
//! payform expiry 12/30
//!
//! # Check a security code for a brand
//! payform cvc 1234 --brand amex
//!
//! # Format a card number for display
//! payform format 378282246310005
//!
//! # Validate a whole form and print the token request
//! payform submit --number "4242 4242 4242 4242" --name "Ada Lovelace" --expiry 12/30 --cvc 123
//! ```
//!
//! Exits with status 0 when the input is valid and 1 otherwise.

use clap::{Parser, Subcommand, ValueEnum};
use payform::{
    classify, cvc, expiry, format, is_checksum_valid, mask, CardBrand, CardForm, CheckoutConfig,
};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "payform")]
#[command(author, version, about = "Payment form card validation tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the card brand from a (partial) number
    Classify {
        /// Card number, or the digits typed so far
        card_number: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Check the Luhn checksum of a card number
    Checksum {
        /// Card number (spaces and dashes allowed)
        card_number: String,
    },

    /// Check that an MM/YY expiry has not elapsed
    Expiry {
        /// Expiry date as MM/YY
        date: String,
    },

    /// Validate a security code
    Cvc {
        /// Security code to validate
        code: String,

        /// Card brand (affects required length)
        #[arg(short, long)]
        brand: Option<BrandArg>,
    },

    /// Format a card number using the brand's grouping
    Format {
        /// Card number to format
        card_number: String,

        /// Separator to use
        #[arg(short, long, default_value = " ")]
        separator: String,
    },

    /// Validate a whole form and print the tokenization request as JSON
    Submit {
        /// Card number
        #[arg(long)]
        number: String,

        /// Cardholder name
        #[arg(long)]
        name: String,

        /// Expiry date as MM/YY
        #[arg(long)]
        expiry: String,

        /// Security code
        #[arg(long)]
        cvc: String,

        /// Charge amount in cents (overrides PAYFORM_AMOUNT_CENTS)
        #[arg(long)]
        amount_cents: Option<u64>,

        /// Currency code (overrides PAYFORM_CURRENCY)
        #[arg(long)]
        currency: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum BrandArg {
    Visa,
    Mastercard,
    Amex,
    Diners,
}

impl From<BrandArg> for CardBrand {
    fn from(arg: BrandArg) -> Self {
        match arg {
            BrandArg::Visa => CardBrand::Visa,
            BrandArg::Mastercard => CardBrand::Mastercard,
            BrandArg::Amex => CardBrand::Amex,
            BrandArg::Diners => CardBrand::DinersClub,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let valid = match cli.command {
        Commands::Classify {
            card_number,
            output,
        } => cmd_classify(&card_number, output),
        Commands::Checksum { card_number } => cmd_checksum(&card_number),
        Commands::Expiry { date } => cmd_expiry(&date),
        Commands::Cvc { code, brand } => cmd_cvc(&code, brand.map(Into::into)),
        Commands::Format {
            card_number,
            separator,
        } => cmd_format(&card_number, &separator),
        Commands::Submit {
            number,
            name,
            expiry,
            cvc,
            amount_cents,
            currency,
        } => cmd_submit(
            CardForm::new(number, name, expiry, cvc),
            amount_cents,
            currency,
        ),
    };

    process::exit(if valid { 0 } else { 1 });
}

fn cmd_classify(card_number: &str, output: OutputFormat) -> bool {
    let brand = classify(card_number);
    let code = brand.security_code();

    match output {
        OutputFormat::Text => {
            println!("Brand: {}", brand.name());
            if brand.is_known() {
                println!("Valid Lengths: {:?}", brand.valid_lengths());
            }
            println!("Security Code: {} ({} digits)", code.name, code.size);
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "brand": brand,
                "name": brand.name(),
                "lengths": brand.valid_lengths(),
                "code": code,
            });
            println!("{}", value);
        }
    }

    brand.is_known()
}

fn cmd_checksum(card_number: &str) -> bool {
    let valid = is_checksum_valid(card_number);
    println!("Luhn check: {}", if valid { "PASS" } else { "FAIL" });
    valid
}

fn cmd_expiry(date: &str) -> bool {
    match expiry::validate_expiry(date) {
        Ok(exp) => {
            println!("Valid: yes");
            println!("Month: {}", exp.month_str());
            println!("Year: {}", exp.full_year());
            true
        }
        Err(e) => {
            println!("Valid: no");
            println!("Error: {}", e);
            false
        }
    }
}

fn cmd_cvc(code: &str, brand: Option<CardBrand>) -> bool {
    let result = match brand {
        Some(b) => cvc::validate_cvc_for_brand(code, b),
        None => cvc::validate_cvc(code),
    };

    match result {
        Ok(validated) => {
            println!("Valid: yes");
            println!("Length: {} digits", validated.length());
            true
        }
        Err(e) => {
            println!("Valid: no");
            println!("Error: {}", e);
            false
        }
    }
}

fn cmd_format(card_number: &str, separator: &str) -> bool {
    if !format::is_valid_format(card_number) {
        eprintln!("Error: card number may only contain digits, spaces and dashes");
        return false;
    }
    println!("{}", format::format_with_separator(card_number, separator));
    true
}

fn cmd_submit(form: CardForm, amount_cents: Option<u64>, currency: Option<String>) -> bool {
    let mut config = match CheckoutConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return false;
        }
    };
    if let Some(amount_cents) = amount_cents {
        config.amount_cents = amount_cents;
    }
    if let Some(currency) = currency {
        config = match config.with_currency(&currency) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                return false;
            }
        };
    }

    tracing::info!(card = %mask::mask_number(&form.card_number), "submitting card form");

    match form.validate(&config) {
        Ok(request) => match serde_json::to_string_pretty(&request) {
            Ok(json) => {
                println!("{}", json);
                true
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                false
            }
        },
        Err(errors) => {
            for error in errors.iter() {
                println!("{}: {}", error.field(), error);
            }
            false
        }
    }
}
