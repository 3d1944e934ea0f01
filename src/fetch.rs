use std::time::Duration;

use anyhow::{Context, Result};

use crate::http::{fetch_text_cached, http_client};
use crate::table::{self, DataTable};

/// Published dataset of finished-match team statistics.
pub const DEFAULT_STATS_URL: &str =
    "https://raw.githubusercontent.com/JOSPHATT/Finished_Matches_dash_statistics/refs/heads/main/team_statistics.csv";

/// Download the stats CSV and parse it into a table.
pub fn fetch_team_table(url: &str, max_age: Duration) -> Result<DataTable> {
    let client = http_client()?;
    let body = fetch_text_cached(client, url, max_age)
        .with_context(|| format!("fetch team statistics from {url}"))?;
    table::parse_csv(&body).context("parse team statistics csv")
}
