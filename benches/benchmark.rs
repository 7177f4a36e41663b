//! Benchmarks for payform.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use payform::{
    classify, format, is_checksum_valid, is_expiry_valid_at, luhn, CardForm, CheckoutConfig,
    YearMonth,
};

const VISA_16: &str = "4242424242424242";
const VISA_16_FORMATTED: &str = "4242 4242 4242 4242";
const MASTERCARD_2SERIES: &str = "2223000048400011";
const AMEX: &str = "378282246310005";

const VISA_DIGITS: [u8; 16] = [4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2];

/// Benchmark brand classification
fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    group.bench_function("visa_first_digit", |b| b.iter(|| classify(black_box("4"))));

    group.bench_function("visa_16_formatted", |b| {
        b.iter(|| classify(black_box(VISA_16_FORMATTED)))
    });

    // Walks past Visa and the 51-55 range before matching
    group.bench_function("mastercard_2series", |b| {
        b.iter(|| classify(black_box(MASTERCARD_2SERIES)))
    });

    group.bench_function("unknown", |b| b.iter(|| classify(black_box("9999"))));

    group.finish();
}

/// Benchmark the Luhn checksum
fn bench_checksum(c: &mut Criterion) {
    let mut group = c.benchmark_group("checksum");

    group.bench_function("visa_16_raw", |b| {
        b.iter(|| is_checksum_valid(black_box(VISA_16)))
    });

    group.bench_function("visa_16_formatted", |b| {
        b.iter(|| is_checksum_valid(black_box(VISA_16_FORMATTED)))
    });

    group.bench_function("amex_15", |b| b.iter(|| is_checksum_valid(black_box(AMEX))));

    group.bench_function("digits_only", |b| {
        b.iter(|| luhn::validate(black_box(&VISA_DIGITS)))
    });

    for size in [16usize, 1_000, 100_000] {
        let input = "0".repeat(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("zeros", size), &input, |b, input| {
            b.iter(|| is_checksum_valid(black_box(input)))
        });
    }

    group.finish();
}

/// Benchmark expiry validation
fn bench_expiry(c: &mut Criterion) {
    let mut group = c.benchmark_group("expiry");
    let now = YearMonth::new(2026, 10).unwrap_or_else(YearMonth::now);

    group.bench_function("valid", |b| {
        b.iter(|| is_expiry_valid_at(black_box("12/30"), now))
    });

    group.bench_function("elapsed", |b| {
        b.iter(|| is_expiry_valid_at(black_box("01/20"), now))
    });

    group.bench_function("malformed", |b| {
        b.iter(|| is_expiry_valid_at(black_box("garbage"), now))
    });

    group.bench_function("clock", |b| {
        b.iter(|| payform::is_expiry_valid(black_box("12/30")))
    });

    group.finish();
}

/// Benchmark display formatting and whole-form validation
fn bench_form(c: &mut Criterion) {
    let mut group = c.benchmark_group("form");
    let config = CheckoutConfig::default();
    let now = YearMonth::new(2026, 10).unwrap_or_else(YearMonth::now);

    group.bench_function("format_visa", |b| {
        b.iter(|| format::format_card_number(black_box(VISA_16)))
    });

    group.bench_function("format_amex", |b| {
        b.iter(|| format::format_card_number(black_box(AMEX)))
    });

    let valid = CardForm::new(VISA_16_FORMATTED, "Ada Lovelace", "12/30", "123");
    group.bench_function("validate_accepted", |b| {
        b.iter(|| black_box(&valid).validate_at(&config, now))
    });

    let invalid = CardForm::new("4242 4242", "", "01/20", "1");
    group.bench_function("validate_rejected", |b| {
        b.iter(|| black_box(&invalid).validate_at(&config, now))
    });

    group.finish();
}

criterion_group!(benches, bench_classify, bench_checksum, bench_expiry, bench_form);
criterion_main!(benches);
