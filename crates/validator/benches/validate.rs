//! Benchmarks for rule evaluation throughput.
//!
//! Covers the common paths: single field rules, grouped fields, rules decoded
//! from JSON, and the full-mode report that collects every failure.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use serde_json::{Value, json};
use std::hint::black_box;
use validate_it::prelude::*;

fn signup_rules() -> Vec<Rule> {
    vec![
        Rule::new("username").with_len_range(3, 20),
        Rule::new("password").with_min_len(8).with_empty(false),
        Rule::new("email")
            .with_custom("isEmail", predicates::email)
            .with_message("isEmail", "Invalid email"),
        Rule::group(["from", "to"])
            .with_custom("validInterval", |value, _| {
                let from = value.member(0).and_then(Value::as_i64);
                let to = value.member(1).and_then(Value::as_i64);
                matches!((from, to), (Some(from), Some(to)) if from < to)
            })
            .with_message("validInterval", "Invalid interval"),
    ]
}

// ============================================================================
// Passing vs failing subjects
// ============================================================================

fn bench_signup(c: &mut Criterion) {
    let rules = signup_rules();
    let valid = json!({
        "username": "vladko",
        "password": "correct horse",
        "email": "vladko@example.com",
        "from": 0,
        "to": 100
    });
    let invalid = json!({
        "username": "vl",
        "password": "",
        "email": "vladko@",
        "from": 100
    });

    let mut group = c.benchmark_group("signup");
    group.bench_function("valid", |b| {
        b.iter(|| validate(black_box(Some(&valid)), &rules, &ValidateOptions::NONE));
    });
    group.bench_function("invalid_short", |b| {
        b.iter(|| validate(black_box(Some(&invalid)), &rules, &ValidateOptions::NONE));
    });

    let full = ValidateOptions::new().with_short(false).with_find_first(false);
    group.bench_function("invalid_full", |b| {
        b.iter(|| validate(black_box(Some(&invalid)), &rules, &full));
    });
    group.finish();
}

// ============================================================================
// Rule decoding
// ============================================================================

fn bench_json_rules(c: &mut Criterion) {
    let raw = json!([
        {"name": "username", "len": [3, 20]},
        {"name": "password", "len": 8, "empty": false},
        {"name": ["from", "to"], "required": false}
    ]);
    let subject = json!({"username": "vladko", "password": "correct horse"});

    c.bench_function("json_rules/decode", |b| {
        b.iter(|| Rule::list_from_json(black_box(&raw)));
    });
    c.bench_function("json_rules/validate_it", |b| {
        b.iter(|| validate_it(Some(&subject), black_box(&raw), None));
    });
}

// ============================================================================
// Group fan-out
// ============================================================================

fn bench_group_width(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_width");
    for width in [2usize, 8, 32] {
        let names: Vec<String> = (0..width).map(|i| format!("f{i}")).collect();
        let rule = Rule::group(names).with_custom("never", |_, _| false);
        let subject = Value::Object(
            (0..width).map(|i| (format!("f{i}"), json!(i))).collect(),
        );
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, _| {
            b.iter(|| validate_it(Some(&subject), black_box(rule.clone()), None));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_signup, bench_json_rules, bench_group_width);
criterion_main!(benches);
