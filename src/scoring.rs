use crate::columns::{CanonMetric, ColumnMapping};
use crate::table::DataTable;

/// Weights of the composite performance score. Passed into the
/// calculator as one immutable value rather than read from globals.
#[derive(Debug, Clone, Copy)]
pub struct ScoreWeights {
    pub win_rate: f64,
    pub goal_difference: f64,
    pub goals_per_match: f64,
    pub scoring_strength: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            win_rate: 0.40,
            goal_difference: 0.25,
            goals_per_match: 0.20,
            scoring_strength: 0.15,
        }
    }
}

/// Which scoring path produced the scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreMethod {
    /// Weighted sum of canonical metrics.
    Weighted,
    /// Min–max normalization over the leading numeric columns.
    Normalized,
    /// No numeric data at all; scores are the row indices.
    RowIndex,
}

/// Scores plus how they were obtained. `degenerate` flags outcomes the
/// caller should warn about: every score 0, or row-index scores.
#[derive(Debug, Clone)]
pub struct ScoreReport {
    pub scores: Vec<f64>,
    pub method: ScoreMethod,
    pub degenerate: bool,
}

/// Number of {played, won, goals for, goals against} columns that must
/// resolve for the weighted path to run.
const BASIC_METRICS: &[CanonMetric] = &[
    CanonMetric::MatchesPlayed,
    CanonMetric::MatchesWon,
    CanonMetric::GoalsFor,
    CanonMetric::GoalsAgainst,
];
const MIN_BASIC_BOUND: usize = 3;

/// How many leading numeric columns the fallback path considers.
const FALLBACK_COLUMNS: usize = 5;

/// Produce one composite score per row. Total function: missing or
/// unparseable inputs degrade to zero contributions, never errors.
pub fn score_teams(table: &DataTable, mapping: &ColumnMapping, weights: &ScoreWeights) -> ScoreReport {
    let basic_bound = BASIC_METRICS
        .iter()
        .filter(|m| mapping.is_bound(**m))
        .count();

    if basic_bound >= MIN_BASIC_BOUND {
        weighted_scores(table, mapping, weights)
    } else {
        normalized_scores(table)
    }
}

fn weighted_scores(table: &DataTable, mapping: &ColumnMapping, weights: &ScoreWeights) -> ScoreReport {
    // Component availability is a property of the mapping, fixed for
    // the whole table. An unbound scoring_strength is proxied by
    // goals_scored_per_match at the scoring_strength weight, on top of
    // its own contribution; the published methodology counts it twice
    // in that case.
    let mut components: Vec<(CanonMetric, f64)> = Vec::new();
    if mapping.is_bound(CanonMetric::WinRate) {
        components.push((CanonMetric::WinRate, weights.win_rate));
    }
    if mapping.is_bound(CanonMetric::GoalDifference) {
        components.push((CanonMetric::GoalDifference, weights.goal_difference));
    }
    if mapping.is_bound(CanonMetric::GoalsScoredPerMatch) {
        components.push((CanonMetric::GoalsScoredPerMatch, weights.goals_per_match));
    }
    if mapping.is_bound(CanonMetric::ScoringStrength) {
        components.push((CanonMetric::ScoringStrength, weights.scoring_strength));
    } else if mapping.is_bound(CanonMetric::GoalsScoredPerMatch) {
        components.push((CanonMetric::GoalsScoredPerMatch, weights.scoring_strength));
    }

    if components.is_empty() {
        return ScoreReport {
            scores: vec![0.0; table.row_count()],
            method: ScoreMethod::Weighted,
            degenerate: true,
        };
    }

    let scores: Vec<f64> = (0..table.row_count())
        .map(|row| {
            components
                .iter()
                .map(|(metric, weight)| mapping.value(table, *metric, row).unwrap_or(0.0) * weight)
                .sum()
        })
        .collect();

    let degenerate = scores.iter().all(|s| *s == 0.0);
    ScoreReport {
        scores,
        method: ScoreMethod::Weighted,
        degenerate,
    }
}

fn normalized_scores(table: &DataTable) -> ScoreReport {
    let rows = table.row_count();
    let selected: Vec<usize> = table
        .numeric_column_indices()
        .into_iter()
        .take(FALLBACK_COLUMNS)
        .collect();

    if selected.is_empty() {
        // Stable but meaningless ordering; callers surface this as a
        // warning rather than treating it as a real score.
        return ScoreReport {
            scores: (0..rows).map(|row| row as f64).collect(),
            method: ScoreMethod::RowIndex,
            degenerate: true,
        };
    }

    let mut scores = vec![0.0f64; rows];
    let mut contributed = false;
    for (position, col) in selected.iter().enumerate() {
        let values: Vec<f64> = (0..rows).map(|row| table.numeric_cell(*col, row)).collect();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max <= min {
            // Zero variance carries no ranking signal; the column keeps
            // its weight slot but contributes nothing.
            continue;
        }
        let weight = 0.5f64.powi(position as i32);
        for (row, value) in values.iter().enumerate() {
            scores[row] += (value - min) / (max - min) * weight;
        }
        contributed = true;
    }

    ScoreReport {
        scores,
        method: ScoreMethod::Normalized,
        degenerate: !contributed,
    }
}

/// One entry of the ranked output handed to the report writer.
#[derive(Debug, Clone)]
pub struct RankedTeam {
    /// 1-based rank.
    pub rank: usize,
    /// Row in the source table.
    pub row: usize,
    pub name: String,
    pub score: f64,
}

/// Total-order rows by score descending and keep the top `top_n`.
/// Ties keep first-seen order; fewer rows than `top_n` returns all.
pub fn rank_top(table: &DataTable, id_col: usize, scores: &[f64], top_n: usize) -> Vec<RankedTeam> {
    let mut order: Vec<usize> = (0..table.row_count().min(scores.len())).collect();
    order.sort_by(|a, b| scores[*b].total_cmp(&scores[*a]));
    order.truncate(top_n);

    order
        .into_iter()
        .enumerate()
        .map(|(pos, row)| RankedTeam {
            rank: pos + 1,
            row,
            name: table.cell(id_col, row).unwrap_or_default().trim().to_string(),
            score: scores[row],
        })
        .collect()
}
