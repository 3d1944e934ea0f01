use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use formguide::columns::ColumnMapping;
use formguide::sample_feed::build_sample_table;
use formguide::scoring::{self, ScoreWeights};
use formguide::table::DataTable;

fn bench_resolve_and_derive(c: &mut Criterion) {
    let table = build_sample_table(25);
    c.bench_function("resolve_and_derive", |b| {
        b.iter(|| {
            let mut mapping = ColumnMapping::resolve(black_box(&table));
            mapping.derive_missing(&table);
            black_box(mapping);
        })
    });
}

fn bench_score_and_rank(c: &mut Criterion) {
    let table = build_sample_table(25);
    let mut mapping = ColumnMapping::resolve(&table);
    mapping.derive_missing(&table);
    let weights = ScoreWeights::default();
    c.bench_function("score_and_rank", |b| {
        b.iter(|| {
            let report = scoring::score_teams(black_box(&table), &mapping, &weights);
            let ranked = scoring::rank_top(&table, 0, &report.scores, 20);
            black_box(ranked.len());
        })
    });
}

fn bench_csv_parse(c: &mut Criterion) {
    let table = build_sample_table(25);
    let body = table_to_csv(&table);
    c.bench_function("csv_parse", |b| {
        b.iter(|| {
            let parsed = formguide::table::parse_csv(black_box(&body)).unwrap();
            black_box(parsed.row_count());
        })
    });
}

fn table_to_csv(table: &DataTable) -> String {
    let mut out = table
        .columns()
        .iter()
        .map(|c| c.name.clone())
        .collect::<Vec<_>>()
        .join(",");
    out.push('\n');
    for row in 0..table.row_count() {
        let line = table
            .columns()
            .iter()
            .enumerate()
            .map(|(col, _)| table.cell(col, row).unwrap_or_default().to_string())
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

criterion_group!(
    benches,
    bench_resolve_and_derive,
    bench_score_and_rank,
    bench_csv_parse
);
criterion_main!(benches);
