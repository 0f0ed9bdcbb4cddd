//! Query executor performance benchmarks.
//!
//! Run with: cargo bench -p ptaledger-query

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::NaiveDate;
use ptaledger_core::{Account, AccountIndex, Amount, Posting, Transaction};
use ptaledger_query::{parse as parse_query, Executor};
use rust_decimal_macros::dec;

/// Generate a sample index for benchmarking.
fn generate_index(num_transactions: usize) -> AccountIndex {
    let mut transactions = Vec::with_capacity(num_transactions);

    let categories = ["Food:Lunch", "Food:Dinner", "Groceries", "Transport"];
    let banks = ["Assets:Banking:HDFC", "Assets:Banking:Axis"];

    let mut day = 1u32;
    let mut month = 1u32;
    let mut year = 2024i32;

    for i in 0..num_transactions {
        let category = categories[i % categories.len()];
        let bank = banks[i % banks.len()];
        let amount = dec!(10.00) + rust_decimal::Decimal::from(i as i32 % 100);

        let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();

        let txn = Transaction::new(date, format!("Transaction {i}"))
            .with_posting(Posting::new(
                Account::new(format!("Expenses:{category}")).unwrap(),
                Amount::new(amount, "INR"),
            ))
            .with_posting(Posting::new(
                Account::new(bank).unwrap(),
                Amount::new(-amount, "INR"),
            ));

        transactions.push(txn);

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

    AccountIndex::build(transactions)
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_query", |b| {
        b.iter(|| parse_query(black_box("balance from:2024-01-01 to:2024-06-30 Expenses:Food")));
    });
}

fn bench_balance(c: &mut Criterion) {
    let index = generate_index(1000);

    let mut group = c.benchmark_group("query_balance");
    group.throughput(Throughput::Elements(1000));

    for (name, text) in [
        ("all", "balance"),
        ("account", "balance Expenses:Food"),
        ("date_range", "balance from:2024-02-01 to:2024-03-31"),
    ] {
        let query = parse_query(text).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| Executor::new(black_box(&index)).execute(black_box(&query)));
        });
    }

    group.finish();
}

fn bench_query_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_scaling");

    for size in [100, 500, 1000, 5000] {
        let index = generate_index(size);
        let query = parse_query("balance from:2024-01-01 Assets").unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &index, |b, index| {
            b.iter(|| Executor::new(black_box(index)).execute(black_box(&query)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_balance, bench_query_scaling);
criterion_main!(benches);
