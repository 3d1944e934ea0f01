use std::collections::HashMap;

use crate::table::DataTable;

/// Canonical metric keys the scorer understands, independent of how the
/// input feed spells its column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonMetric {
    WinRate,
    GoalDifference,
    GoalsScoredPerMatch,
    ScoringStrength,
    MatchesPlayed,
    MatchesWon,
    MatchesDrawn,
    MatchesLost,
    GoalsFor,
    GoalsAgainst,
    GoalsConcededPerMatch,
}

impl CanonMetric {
    pub const ALL: &'static [CanonMetric] = &[
        CanonMetric::WinRate,
        CanonMetric::GoalDifference,
        CanonMetric::GoalsScoredPerMatch,
        CanonMetric::ScoringStrength,
        CanonMetric::MatchesPlayed,
        CanonMetric::MatchesWon,
        CanonMetric::MatchesDrawn,
        CanonMetric::MatchesLost,
        CanonMetric::GoalsFor,
        CanonMetric::GoalsAgainst,
        CanonMetric::GoalsConcededPerMatch,
    ];

    /// Accepted input spellings, scanned in order; all lowercase.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            CanonMetric::WinRate => &["win_rate", "win rate", "winrate", "win_pct", "win %", "win_percentage"],
            CanonMetric::GoalDifference => &["goal_difference", "goal difference", "goal_diff", "gd"],
            CanonMetric::GoalsScoredPerMatch => &[
                "goals_scored_per_match",
                "goals scored per match",
                "goals_per_match",
                "goals per match",
                "gspm",
            ],
            CanonMetric::ScoringStrength => &["scoring_strength", "scoring strength", "attack_strength"],
            CanonMetric::MatchesPlayed => &["matches_played", "matches played", "played", "games_played", "mp"],
            CanonMetric::MatchesWon => &["matches_won", "matches won", "won", "wins", "w"],
            CanonMetric::MatchesDrawn => &["matches_drawn", "matches drawn", "drawn", "draws", "d"],
            CanonMetric::MatchesLost => &["matches_lost", "matches lost", "lost", "losses", "l"],
            CanonMetric::GoalsFor => &["goals_for", "goals for", "goals_scored", "goals scored", "gf"],
            CanonMetric::GoalsAgainst => &["goals_against", "goals against", "goals_conceded", "goals conceded", "ga"],
            CanonMetric::GoalsConcededPerMatch => &[
                "goals_conceded_per_match",
                "goals conceded per match",
                "conceded_per_match",
                "gcpm",
            ],
        }
    }
}

const IDENTIFIER_ALIASES: &[&str] = &["team", "team_name", "team name", "name", "club", "squad"];

/// Where a canonical metric's values come from: a raw input column, or
/// a column synthesized by the deriver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnRef {
    Source(usize),
    Derived(usize),
}

/// Resolved association from canonical metric to concrete column.
/// Built once per dataset and read-only afterwards; each metric binds
/// at most one column.
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    bound: HashMap<CanonMetric, ColumnRef>,
    derived: Vec<Vec<f64>>,
}

impl ColumnMapping {
    /// Scan the table's column names against each metric's alias list.
    /// First alias hit wins; metrics with no matching column stay
    /// unbound (downstream treats absence as "metric unavailable").
    pub fn resolve(table: &DataTable) -> Self {
        let lowered: Vec<String> = table
            .columns()
            .iter()
            .map(|c| c.name.trim().to_lowercase())
            .collect();

        let mut bound = HashMap::new();
        for metric in CanonMetric::ALL {
            'alias: for alias in metric.aliases() {
                for (idx, name) in lowered.iter().enumerate() {
                    if name == alias {
                        bound.insert(*metric, ColumnRef::Source(idx));
                        break 'alias;
                    }
                }
            }
        }

        Self {
            bound,
            derived: Vec::new(),
        }
    }

    pub fn is_bound(&self, metric: CanonMetric) -> bool {
        self.bound.contains_key(&metric)
    }

    /// Numeric value of a metric for one row. `None` means the metric
    /// is unbound; bound-but-unparseable cells read as 0.
    pub fn value(&self, table: &DataTable, metric: CanonMetric, row: usize) -> Option<f64> {
        match self.bound.get(&metric)? {
            ColumnRef::Source(col) => Some(table.numeric_cell(*col, row)),
            ColumnRef::Derived(idx) => Some(self.derived.get(*idx)?.get(row).copied().unwrap_or(0.0)),
        }
    }

    /// Compute still-unbound metrics whose prerequisites are bound and
    /// attach them as synthetic columns. Already-bound entries are never
    /// overwritten.
    ///
    /// The divide guard substitutes 1 for a played count of 0; that is
    /// the source dataset's convention, carried as-is.
    pub fn derive_missing(&mut self, table: &DataTable) {
        use CanonMetric::*;

        if !self.is_bound(WinRate) && self.is_bound(MatchesWon) && self.is_bound(MatchesPlayed) {
            let values = self.compute_rows(table, |m, row| {
                let played = guard_played(m.value(table, MatchesPlayed, row).unwrap_or(0.0));
                m.value(table, MatchesWon, row).unwrap_or(0.0) / played * 100.0
            });
            self.attach_derived(WinRate, values);
        }

        if !self.is_bound(GoalDifference) && self.is_bound(GoalsFor) && self.is_bound(GoalsAgainst) {
            let values = self.compute_rows(table, |m, row| {
                m.value(table, GoalsFor, row).unwrap_or(0.0)
                    - m.value(table, GoalsAgainst, row).unwrap_or(0.0)
            });
            self.attach_derived(GoalDifference, values);
        }

        if !self.is_bound(GoalsScoredPerMatch)
            && self.is_bound(GoalsFor)
            && self.is_bound(MatchesPlayed)
        {
            let values = self.compute_rows(table, |m, row| {
                let played = guard_played(m.value(table, MatchesPlayed, row).unwrap_or(0.0));
                m.value(table, GoalsFor, row).unwrap_or(0.0) / played
            });
            self.attach_derived(GoalsScoredPerMatch, values);
        }
    }

    fn compute_rows(&self, table: &DataTable, f: impl Fn(&Self, usize) -> f64) -> Vec<f64> {
        (0..table.row_count()).map(|row| f(self, row)).collect()
    }

    fn attach_derived(&mut self, metric: CanonMetric, values: Vec<f64>) {
        let idx = self.derived.len();
        self.derived.push(values);
        self.bound.insert(metric, ColumnRef::Derived(idx));
    }
}

fn guard_played(played: f64) -> f64 {
    if played == 0.0 { 1.0 } else { played }
}

/// Locate the team-identifier column. Falls back to any column whose
/// name contains "team" or "name", then to the first column.
pub fn resolve_identifier(table: &DataTable) -> Option<usize> {
    if table.columns().is_empty() {
        return None;
    }
    let lowered: Vec<String> = table
        .columns()
        .iter()
        .map(|c| c.name.trim().to_lowercase())
        .collect();

    for alias in IDENTIFIER_ALIASES {
        if let Some(idx) = lowered.iter().position(|name| name == alias) {
            return Some(idx);
        }
    }
    if let Some(idx) = lowered
        .iter()
        .position(|name| name.contains("team") || name.contains("name"))
    {
        return Some(idx);
    }
    Some(0)
}
