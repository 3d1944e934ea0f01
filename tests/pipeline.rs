use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use formguide::columns::{self, CanonMetric, ColumnMapping};
use formguide::posts;
use formguide::report;
use formguide::sample_feed;
use formguide::scoring::{self, ScoreMethod, ScoreWeights};
use formguide::table::{self, Column, DataTable};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn make_table(cols: &[(&str, &[&str])]) -> DataTable {
    DataTable::new(
        cols.iter()
            .map(|(name, cells)| Column {
                name: name.to_string(),
                cells: cells.iter().map(|c| c.to_string()).collect(),
            })
            .collect(),
    )
}

#[test]
fn fixture_csv_parses_into_columns() {
    let table = table::parse_csv(&read_fixture("team_statistics.csv")).expect("fixture parses");
    assert_eq!(table.columns().len(), 14);
    assert_eq!(table.row_count(), 6);
    assert_eq!(table.columns()[0].name, "TEAM");
    assert!(!table.columns()[0].is_numeric());
    assert!(table.columns()[1].is_numeric());
    assert_eq!(table.numeric_cell(5, 0), 24.0);
}

#[test]
fn dedupe_keeps_the_first_occurrence() {
    let mut table = table::parse_csv(&read_fixture("team_statistics.csv")).expect("fixture parses");
    let id_col = columns::resolve_identifier(&table).expect("identifier resolves");
    assert_eq!(id_col, 0);

    // The fixture repeats Arsenal in a different casing on the last row.
    table.dedupe_by(id_col);
    assert_eq!(table.row_count(), 5);
    assert_eq!(table.cell(0, 0), Some("Arsenal"));
    assert_eq!(table.numeric_cell(5, 0), 24.0);
    assert_eq!(table.cell(0, 4), Some("Fulham"));
}

#[test]
fn identifier_falls_back_to_name_like_then_first_column() {
    let named = make_table(&[("points", &["3"]), ("Club Name", &["A"])]);
    assert_eq!(columns::resolve_identifier(&named), Some(1));

    let bare = make_table(&[("points", &["3"]), ("city", &["London"])]);
    assert_eq!(columns::resolve_identifier(&bare), Some(0));

    let empty = DataTable::new(Vec::new());
    assert_eq!(columns::resolve_identifier(&empty), None);
}

#[test]
fn fixture_ranks_by_performance_score() {
    let mut table = table::parse_csv(&read_fixture("team_statistics.csv")).expect("fixture parses");
    let id_col = columns::resolve_identifier(&table).expect("identifier resolves");
    table.dedupe_by(id_col);

    let mut mapping = ColumnMapping::resolve(&table);
    mapping.derive_missing(&table);
    let report = scoring::score_teams(&table, &mapping, &ScoreWeights::default());
    assert_eq!(report.method, ScoreMethod::Weighted);

    let ranked = scoring::rank_top(&table, id_col, &report.scores, 3);
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].name, "Arsenal");
    assert_eq!(ranked[1].name, "Liverpool");
    assert_eq!(ranked[2].name, "Chelsea");
    assert!(ranked[0].score > ranked[1].score);
}

#[test]
fn generated_posts_round_trip_through_the_reader() {
    let table = table::parse_csv(&read_fixture("team_statistics.csv")).expect("fixture parses");
    let mut mapping = ColumnMapping::resolve(&table);
    mapping.derive_missing(&table);
    let score_report = scoring::score_teams(&table, &mapping, &ScoreWeights::default());
    let ranked = scoring::rank_top(&table, 0, &score_report.scores, 3);

    let dir = tempfile::tempdir().expect("tempdir");
    let date = NaiveDate::from_ymd_opt(2026, 8, 6).expect("valid date");
    let written =
        report::write_posts(dir.path(), date, &ranked, &mapping, &table).expect("posts write");
    assert_eq!(written.len(), 3);
    report::write_summary_post(dir.path(), date, &ranked, table.row_count(), "fixture")
        .expect("summary writes");

    let index = posts::load_posts(dir.path());
    assert!(index.errors.is_empty());
    assert_eq!(index.posts.len(), 4);

    let arsenal = posts::find_by_slug(&index.posts, "2026-08-06-arsenal-analysis")
        .expect("arsenal post present");
    assert_eq!(arsenal.team, "Arsenal");
    assert_eq!(arsenal.rank, Some(1));
    let score = arsenal.performance_score.expect("score parsed");
    assert!((score - ranked[0].score).abs() < 0.01);
    assert!(arsenal.is_team_post());
    assert!(arsenal.content.contains("# Arsenal - Performance Analysis"));

    let summary = index
        .posts
        .iter()
        .find(|p| p.title.contains("Summary"))
        .expect("summary present");
    assert!(!summary.is_team_post());
    assert!(summary.content.contains("1. **Arsenal**"));

    let teams = posts::team_rankings(&index.posts);
    assert_eq!(teams.len(), 3);
    assert_eq!(teams[0].team, "Arsenal");

    let hits = posts::search(&index.posts, "LIVERPOOL");
    assert!(hits.iter().any(|p| p.team == "Liverpool"));
    assert!(posts::search(&index.posts, "").is_empty());
}

#[test]
fn listing_sorts_newest_first() {
    let dir = tempfile::tempdir().expect("tempdir");
    for (name, date, rank) in [("old", "2026-08-01", 1), ("new", "2026-08-05", 2)] {
        let raw = format!(
            "---\ntitle: \"Team Analysis: {name}\"\ndate: {date}\nrank: {rank}\nteam: \"{name}\"\nperformance_score: 1.00\n---\n\nbody\n"
        );
        fs::write(dir.path().join(format!("{date}-{name}-analysis.md")), raw).expect("write post");
    }

    let mut all = posts::load_posts(dir.path()).posts;
    posts::sort_for_listing(&mut all);
    assert_eq!(all[0].team, "new");
    assert_eq!(all[1].team, "old");
}

#[test]
fn sample_feed_supports_the_weighted_path() {
    let table = sample_feed::build_sample_table(10);
    assert_eq!(table.row_count(), 10);

    let mut mapping = ColumnMapping::resolve(&table);
    mapping.derive_missing(&table);
    assert!(mapping.is_bound(CanonMetric::ScoringStrength));

    let report = scoring::score_teams(&table, &mapping, &ScoreWeights::default());
    assert_eq!(report.method, ScoreMethod::Weighted);
    assert!(report.scores.iter().all(|s| s.is_finite()));

    let id_col = columns::resolve_identifier(&table).expect("identifier resolves");
    assert_eq!(id_col, 0);
    let ranked = scoring::rank_top(&table, id_col, &report.scores, 20);
    assert_eq!(ranked.len(), 10);
}
