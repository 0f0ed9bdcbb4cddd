//! Parser performance benchmarks.
//!
//! Run with: cargo bench -p ptaledger-parser

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use ptaledger_parser::{parse, parse_transaction};

/// Generate a synthetic ledger with N transactions.
fn generate_ledger(num_transactions: usize) -> String {
    let mut lines = vec![
        "2024-01-01 \"Opening balance\"".to_string(),
        "  Assets:Banking:HDFC  100000.00INR".to_string(),
        "  Equity:Opening".to_string(),
        String::new(),
    ];

    let categories = ["Food:Lunch", "Food:Dinner", "Groceries", "Transport"];
    let payees = ["Store A", "Store B", "Cafe", "Fuel \"pump\"", "Supermarket"];
    let mut day = 1;
    let mut month = 1;
    let mut year = 2024;

    for i in 0..num_transactions {
        let category = categories[i % categories.len()];
        let payee = payees[i % payees.len()].replace('"', "\\\"");
        let amount = format!("{}.{:02}", 10 + i % 100, i % 97);

        lines.push(format!("{year:04}-{month:02}-{day:02} \"{payee}\""));
        lines.push(format!("  Expenses:{category}  {amount}INR"));
        if i % 3 == 0 {
            lines.push(format!("  Assets:Banking:HDFC  -{amount}INR"));
        } else {
            lines.push("  Assets:Banking:HDFC".to_string());
        }
        lines.push(String::new());

        day += 1;
        if day > 28 {
            day = 1;
            month += 1;
            if month > 12 {
                month = 1;
                year += 1;
            }
        }
    }

    lines.join("\n")
}

fn bench_parse_transaction(c: &mut Criterion) {
    let block = "2023-08-10 \"Dinner\"\n Expenses:Food:Dinner 150.00INR\n Assets:Banking:HDFC\n";

    c.bench_function("parse_transaction", |b| {
        b.iter(|| parse_transaction(black_box(block)));
    });
}

fn bench_parse_large(c: &mut Criterion) {
    let ledger = generate_ledger(1000);
    let bytes = ledger.len();

    let mut group = c.benchmark_group("parse_large");
    group.throughput(Throughput::Bytes(bytes as u64));

    group.bench_function("1000_transactions", |b| {
        b.iter(|| parse(black_box(&ledger)));
    });

    group.finish();
}

fn bench_parse_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_scaling");

    for size in [10, 100, 1000, 5000] {
        let ledger = generate_ledger(size);
        group.throughput(Throughput::Bytes(ledger.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &ledger, |b, ledger| {
            b.iter(|| parse(black_box(ledger)));
        });
    }

    group.finish();
}

fn bench_parse_and_index(c: &mut Criterion) {
    let ledger = generate_ledger(1000);

    c.bench_function("parse_and_index_1000", |b| {
        b.iter(|| {
            parse(black_box(&ledger))
                .map(ptaledger_parser::Ledger::into_index)
                .ok()
        });
    });
}

criterion_group!(
    benches,
    bench_parse_transaction,
    bench_parse_large,
    bench_parse_scaling,
    bench_parse_and_index
);
criterion_main!(benches);
