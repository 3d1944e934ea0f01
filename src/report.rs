use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::columns::{CanonMetric, ColumnMapping};
use crate::scoring::RankedTeam;
use crate::table::DataTable;

/// One written post, reported back to the caller.
#[derive(Debug, Clone)]
pub struct PostFile {
    pub path: PathBuf,
    pub team: String,
    pub rank: usize,
}

/// Team name reduced to a filename slug: alphanumerics kept, runs of
/// whitespace become a single hyphen, everything else dropped.
pub fn sanitize_filename(team_name: &str) -> String {
    let filtered: String = team_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();
    filtered
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Render one team post. Returns the filename slug and the markdown
/// document, frontmatter included.
pub fn build_team_post(
    team: &RankedTeam,
    mapping: &ColumnMapping,
    table: &DataTable,
    date: NaiveDate,
) -> (String, String) {
    let metric = |m: CanonMetric| mapping.value(table, m, team.row);
    let slug = sanitize_filename(&team.name);

    let mut content = String::new();
    let _ = write!(
        content,
        "---\n\
         title: \"Team Analysis: {name}\"\n\
         date: {date}\n\
         rank: {rank}\n\
         team: \"{name}\"\n\
         performance_score: {score:.2}\n\
         ---\n\n\
         # {name} - Performance Analysis\n\n\
         **Rank:** #{rank} of top performing teams\n\n\
         ## Key Statistics\n",
        name = team.name,
        date = date.format("%Y-%m-%d"),
        rank = team.rank,
        score = team.score,
    );

    let mut match_lines = String::new();
    push_stat(&mut match_lines, "Matches Played", metric(CanonMetric::MatchesPlayed), Fmt::Count);
    push_stat(&mut match_lines, "Matches Won", metric(CanonMetric::MatchesWon), Fmt::Count);
    push_stat(&mut match_lines, "Matches Drawn", metric(CanonMetric::MatchesDrawn), Fmt::Count);
    push_stat(&mut match_lines, "Matches Lost", metric(CanonMetric::MatchesLost), Fmt::Count);
    push_stat(&mut match_lines, "Win Rate", metric(CanonMetric::WinRate), Fmt::Percent);
    if !match_lines.is_empty() {
        let _ = write!(content, "\n### Match Performance\n{match_lines}");
    }

    let mut goal_lines = String::new();
    push_stat(&mut goal_lines, "Goals For", metric(CanonMetric::GoalsFor), Fmt::Count);
    push_stat(&mut goal_lines, "Goals Against", metric(CanonMetric::GoalsAgainst), Fmt::Count);
    push_stat(&mut goal_lines, "Goal Difference", metric(CanonMetric::GoalDifference), Fmt::Signed);
    push_stat(
        &mut goal_lines,
        "Goals Scored per Match",
        metric(CanonMetric::GoalsScoredPerMatch),
        Fmt::Rate,
    );
    push_stat(
        &mut goal_lines,
        "Goals Conceded per Match",
        metric(CanonMetric::GoalsConcededPerMatch),
        Fmt::Rate,
    );
    if !goal_lines.is_empty() {
        let _ = write!(content, "\n### Goal Statistics\n{goal_lines}");
    }

    let mut perf_lines = String::new();
    let _ = writeln!(perf_lines, "- **Performance Score:** {:.2}", team.score);
    push_stat(
        &mut perf_lines,
        "Scoring Strength",
        metric(CanonMetric::ScoringStrength),
        Fmt::Rate,
    );
    let _ = write!(content, "\n### Performance Metrics\n{perf_lines}");

    let _ = write!(
        content,
        "\n## Analysis\n\n\
         {name} ranks #{rank} among top performing teams with a performance score of {score:.2}.\n",
        name = team.name,
        rank = team.rank,
        score = team.score,
    );

    let mut strengths = String::new();
    if let Some(win_rate) = metric(CanonMetric::WinRate)
        && win_rate > 60.0
    {
        let _ = writeln!(
            strengths,
            "- **High Win Rate**: With a {win_rate:.1}% win rate, {} demonstrates consistent winning performance.",
            team.name
        );
    }
    if let Some(diff) = metric(CanonMetric::GoalDifference)
        && diff > 0.0
    {
        let _ = writeln!(
            strengths,
            "- **Positive Goal Difference**: A goal difference of {diff:+.0} shows strong defensive and offensive balance."
        );
    }
    if let Some(scored) = metric(CanonMetric::GoalsScoredPerMatch)
        && scored > 1.5
    {
        let _ = writeln!(
            strengths,
            "- **Strong Attack**: Averaging {scored:.2} goals per match demonstrates potent offensive capabilities."
        );
    }
    if let Some(conceded) = metric(CanonMetric::GoalsConcededPerMatch)
        && conceded < 1.0
    {
        let _ = writeln!(
            strengths,
            "- **Solid Defense**: Conceding only {conceded:.2} goals per match shows defensive strength."
        );
    }
    if !strengths.is_empty() {
        let _ = write!(content, "\n### Strengths\n\n{strengths}");
    }

    content.push_str(
        "\n### Scoring Methodology\n\n\
         This team's composite score weighs win rate (40%), goal difference (25%),\n\
         goals scored per match (20%) and scoring strength (15%).\n\n\
         *Data sourced from match statistics and performance analytics.*\n",
    );

    (slug, content)
}

/// Write one post per ranked team into `dir`, creating it if needed.
pub fn write_posts(
    dir: &Path,
    date: NaiveDate,
    ranked: &[RankedTeam],
    mapping: &ColumnMapping,
    table: &DataTable,
) -> Result<Vec<PostFile>> {
    fs::create_dir_all(dir).with_context(|| format!("create posts dir {}", dir.display()))?;

    let mut written = Vec::with_capacity(ranked.len());
    for team in ranked {
        let (slug, content) = build_team_post(team, mapping, table, date);
        let path = dir.join(format!("{}-{slug}-analysis.md", date.format("%Y-%m-%d")));
        fs::write(&path, content).with_context(|| format!("write post {}", path.display()))?;
        written.push(PostFile {
            path,
            team: team.name.clone(),
            rank: team.rank,
        });
    }
    Ok(written)
}

/// Write the summary post listing every ranked team.
pub fn write_summary_post(
    dir: &Path,
    date: NaiveDate,
    ranked: &[RankedTeam],
    total_teams: usize,
    source_url: &str,
) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("create posts dir {}", dir.display()))?;

    let day = date.format("%Y-%m-%d");
    let mut content = format!(
        "---\n\
         title: \"Top {n} Performing Teams - Summary\"\n\
         date: {day}\n\
         ---\n\n\
         # Top {n} Performing Teams Analysis\n\n\
         Generated on {day}\n\n\
         ## Rankings\n\n",
        n = ranked.len(),
    );
    for team in ranked {
        let _ = writeln!(
            content,
            "{}. **{}** - Performance Score: {:.2}",
            team.rank, team.name, team.score
        );
    }
    let _ = write!(
        content,
        "\n## Methodology\n\n\
         Teams are ranked using a composite performance score calculated from:\n\
         - Win Rate (40% weight)\n\
         - Goal Difference (25% weight)\n\
         - Goals Scored per Match (20% weight)\n\
         - Scoring Strength (15% weight)\n\n\
         Total teams analyzed: {total_teams}\n\
         Data source: {source_url}\n",
    );

    let path = dir.join(format!("{day}-top-{}-teams-summary.md", ranked.len()));
    fs::write(&path, content).with_context(|| format!("write summary {}", path.display()))?;
    Ok(path)
}

enum Fmt {
    Count,
    Rate,
    Percent,
    Signed,
}

fn push_stat(out: &mut String, label: &str, value: Option<f64>, fmt: Fmt) {
    let Some(value) = value else {
        return;
    };
    let rendered = match fmt {
        Fmt::Count => format!("{value:.0}"),
        Fmt::Rate => format!("{value:.2}"),
        Fmt::Percent => format!("{value:.1}%"),
        Fmt::Signed => format!("{value:+.0}"),
    };
    let _ = writeln!(out, "- **{label}:** {rendered}");
}

#[cfg(test)]
mod tests {
    use super::sanitize_filename;

    #[test]
    fn sanitize_filename_slugs() {
        assert_eq!(sanitize_filename("Manchester United"), "manchester-united");
        assert_eq!(sanitize_filename("  Real   Madrid C.F. "), "real-madrid-cf");
        assert_eq!(sanitize_filename("1. FC Köln"), "1-fc-kln");
    }
}
