//! Full pipeline benchmarks (parse -> index -> query).
//!
//! These benchmarks measure end-to-end performance of rendering a note's
//! query blocks against a ledger.
//!
//! Run with: cargo bench -p ptaledger

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use ptaledger::document::query_blocks;
use ptaledger_parser::parse;
use ptaledger_query::{parse as parse_query, Executor};

/// Generate a ledger with N transactions.
fn generate_ledger(num_transactions: usize) -> String {
    let mut lines = vec![
        "2020-01-01 \"Opening balance\"".to_string(),
        "  Assets:Banking:HDFC  100000.00INR".to_string(),
        "  Assets:Banking:Axis  50000.00INR".to_string(),
        "  Equity:Opening".to_string(),
        String::new(),
    ];

    let categories = ["Food:Lunch", "Food:Dinner", "Groceries", "Transport", "Utilities"];
    let banks = ["Assets:Banking:HDFC", "Assets:Banking:Axis"];
    let mut day = 2;
    let mut month = 1;
    let mut year = 2020;

    for i in 0..num_transactions {
        let category = categories[i % categories.len()];
        let bank = banks[i % banks.len()];
        let amount = format!("{}.{:02}", 5 + i % 200, i % 100);

        lines.push(format!("{year:04}-{month:02}-{day:02} \"Transaction {i}\""));
        lines.push(format!("  Expenses:{category}  {amount}INR"));
        lines.push(format!("  {bank}"));
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

const NOTE: &str = "# Budget

```pta
balance Assets
```

```pta
bal from:2020-03-01 to:2020-06-30 Expenses
```

```pta
balance Expenses:Food
```
";

fn run_note(ledger: &str) -> usize {
    let Ok(parsed) = parse(ledger) else {
        return 0;
    };
    let index = parsed.into_index();
    let executor = Executor::new(&index);
    query_blocks(NOTE, "pta")
        .into_iter()
        .filter_map(|block| parse_query(block.body).ok())
        .map(|query| executor.execute(&query).len())
        .sum()
}

fn bench_pipeline(c: &mut Criterion) {
    let ledger = generate_ledger(1000);

    let mut group = c.benchmark_group("pipeline");
    group.throughput(Throughput::Bytes(ledger.len() as u64));

    group.bench_function("render_note_1000", |b| {
        b.iter(|| run_note(black_box(&ledger)));
    });

    group.finish();
}

fn bench_pipeline_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_scaling");

    for size in [100, 1000, 5000] {
        let ledger = generate_ledger(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &ledger, |b, ledger| {
            b.iter(|| run_note(black_box(ledger)));
        });
    }

    group.finish();
}

fn bench_query_blocks(c: &mut Criterion) {
    let note = NOTE.repeat(200);
    c.bench_function("query_blocks_600", |b| {
        b.iter(|| query_blocks(black_box(&note), "pta").len());
    });
}

criterion_group!(
    benches,
    bench_pipeline,
    bench_pipeline_scaling,
    bench_query_blocks
);
criterion_main!(benches);
