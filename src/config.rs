use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::fetch::DEFAULT_STATS_URL;

/// Generator knobs, read once from the environment (`.env` is loaded
/// by the binaries before this runs).
#[derive(Debug, Clone)]
pub struct GenConfig {
    pub stats_url: String,
    pub posts_dir: PathBuf,
    pub top_n: usize,
    pub sample_feed: bool,
    pub stats_refresh: Duration,
}

impl GenConfig {
    pub fn from_env() -> Self {
        let stats_url = env::var("STATS_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STATS_URL.to_string());
        let posts_dir = env::var("POSTS_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("posts"));
        let top_n = env::var("TOP_N")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(20)
            .max(1);
        let sample_feed = env::var("SAMPLE_FEED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let stats_refresh = Duration::from_secs(
            env::var("STATS_REFRESH_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(3600),
        );
        Self {
            stats_url,
            posts_dir,
            top_n,
            sample_feed,
            stats_refresh,
        }
    }
}
