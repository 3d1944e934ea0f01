use rand::Rng;

use crate::table::{Column, DataTable};

const SAMPLE_TEAMS: &[&str] = &[
    "Arsenal",
    "Aston Villa",
    "Bournemouth",
    "Brentford",
    "Brighton",
    "Chelsea",
    "Crystal Palace",
    "Everton",
    "Fulham",
    "Liverpool",
    "Manchester City",
    "Manchester United",
    "Newcastle United",
    "Nottingham Forest",
    "Tottenham Hotspur",
    "West Ham United",
    "Wolves",
    "Leeds United",
    "Burnley",
    "Sunderland",
    "Real Madrid",
    "Barcelona",
    "Atletico Madrid",
    "Bayern Munich",
    "Borussia Dortmund",
];

/// Offline stand-in for the remote stats feed: a coherent random table
/// with the same column vocabulary the published dataset uses.
pub fn build_sample_table(teams: usize) -> DataTable {
    let mut rng = rand::thread_rng();
    let count = teams.clamp(1, SAMPLE_TEAMS.len());

    let mut names = Vec::with_capacity(count);
    let mut played_col = Vec::with_capacity(count);
    let mut won_col = Vec::with_capacity(count);
    let mut drawn_col = Vec::with_capacity(count);
    let mut lost_col = Vec::with_capacity(count);
    let mut gf_col = Vec::with_capacity(count);
    let mut ga_col = Vec::with_capacity(count);
    let mut win_rate_col = Vec::with_capacity(count);
    let mut gd_col = Vec::with_capacity(count);
    let mut gspm_col = Vec::with_capacity(count);
    let mut gcpm_col = Vec::with_capacity(count);
    let mut strength_col = Vec::with_capacity(count);

    for name in SAMPLE_TEAMS.iter().take(count) {
        let played: u32 = rng.gen_range(20..=38);
        let won: u32 = rng.gen_range(0..=played);
        let drawn: u32 = rng.gen_range(0..=(played - won));
        let lost = played - won - drawn;
        let goals_for: u32 = won * 2 + drawn + rng.gen_range(0..=10);
        let goals_against: u32 = lost * 2 + drawn + rng.gen_range(0..=10);

        let win_rate = won as f64 / played as f64 * 100.0;
        let gspm = goals_for as f64 / played as f64;
        let gcpm = goals_against as f64 / played as f64;
        let strength = gspm * rng.gen_range(0.8..1.2);

        names.push(name.to_string());
        played_col.push(played.to_string());
        won_col.push(won.to_string());
        drawn_col.push(drawn.to_string());
        lost_col.push(lost.to_string());
        gf_col.push(goals_for.to_string());
        ga_col.push(goals_against.to_string());
        win_rate_col.push(format!("{win_rate:.2}"));
        gd_col.push((goals_for as i64 - goals_against as i64).to_string());
        gspm_col.push(format!("{gspm:.2}"));
        gcpm_col.push(format!("{gcpm:.2}"));
        strength_col.push(format!("{strength:.2}"));
    }

    DataTable::new(vec![
        Column { name: "TEAM".to_string(), cells: names },
        Column { name: "matches_played".to_string(), cells: played_col },
        Column { name: "matches_won".to_string(), cells: won_col },
        Column { name: "matches_drawn".to_string(), cells: drawn_col },
        Column { name: "matches_lost".to_string(), cells: lost_col },
        Column { name: "goals_for".to_string(), cells: gf_col },
        Column { name: "goals_against".to_string(), cells: ga_col },
        Column { name: "win_rate".to_string(), cells: win_rate_col },
        Column { name: "goal_difference".to_string(), cells: gd_col },
        Column { name: "goals_scored_per_match".to_string(), cells: gspm_col },
        Column { name: "goals_conceded_per_match".to_string(), cells: gcpm_col },
        Column { name: "scoring_strength".to_string(), cells: strength_col },
    ])
}
