use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use spendwise_core::core::services::{
    summary_service::{category_totals, multi_select_totals},
    CategoryRegistry, SummaryService,
};
use spendwise_core::domain::transaction::{Transaction, TransactionKind};

const CATEGORIES: [&str; 6] = ["food", "transport", "shopping", "bills", "health", "other"];

fn build_sample(txn_count: usize) -> Vec<Transaction> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    (0..txn_count)
        .map(|idx| {
            let kind = if idx % 7 == 0 {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };
            Transaction::stamped(
                format!("id{idx}"),
                50.0 + (idx % 100) as f64,
                None,
                CATEGORIES[idx % CATEGORIES.len()].to_string(),
                kind,
                start + Duration::hours((idx % 2000) as i64),
            )
        })
        .collect()
}

fn bench_aggregation(c: &mut Criterion) {
    let txns = build_sample(black_box(10_000));
    let categories = CategoryRegistry::new();
    let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    let selected = vec!["food".to_string(), "bills".to_string()];

    c.bench_function("category_totals_10k", |b| {
        b.iter(|| black_box(category_totals(&txns)))
    });

    c.bench_function("multi_select_totals_10k", |b| {
        b.iter(|| black_box(multi_select_totals(&txns, selected.as_slice())))
    });

    c.bench_function("dashboard_10k", |b| {
        b.iter(|| {
            black_box(SummaryService::dashboard(
                &txns,
                &categories,
                today,
                Some(1500.0),
                &selected,
            ))
        })
    });
}

criterion_group!(benches, bench_aggregation);
criterion_main!(benches);
