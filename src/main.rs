use anyhow::{Context, Result, anyhow};
use chrono::Local;

use formguide::columns::{self, ColumnMapping};
use formguide::config::GenConfig;
use formguide::report;
use formguide::sample_feed;
use formguide::scoring::{self, ScoreMethod, ScoreWeights};
use formguide::{fetch, posts};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cfg = GenConfig::from_env();

    println!("Fetching team statistics...");
    let mut table = if cfg.sample_feed {
        println!("SAMPLE_FEED=1: using synthetic offline data");
        sample_feed::build_sample_table(25)
    } else {
        fetch::fetch_team_table(&cfg.stats_url, cfg.stats_refresh)?
    };
    println!(
        "Loaded {} teams across {} columns",
        table.row_count(),
        table.columns().len()
    );

    let id_col = columns::resolve_identifier(&table)
        .ok_or_else(|| anyhow!("dataset has no columns"))?;
    let before = table.row_count();
    table.dedupe_by(id_col);
    if table.row_count() < before {
        println!("Dropped {} duplicate rows", before - table.row_count());
    }

    let mut mapping = ColumnMapping::resolve(&table);
    mapping.derive_missing(&table);

    let score_report = scoring::score_teams(&table, &mapping, &ScoreWeights::default());
    match score_report.method {
        ScoreMethod::Weighted => {}
        ScoreMethod::Normalized => {
            println!("Core metrics unavailable; scoring via column normalization")
        }
        ScoreMethod::RowIndex => {
            eprintln!("[WARN] No numeric columns found; scores are row positions")
        }
    }
    if score_report.degenerate {
        eprintln!("[WARN] Degenerate scoring: rankings carry no performance signal");
    }

    let ranked = scoring::rank_top(&table, id_col, &score_report.scores, cfg.top_n);
    println!("Top {} teams selected", ranked.len());

    let date = Local::now().date_naive();
    let written = report::write_posts(&cfg.posts_dir, date, &ranked, &mapping, &table)
        .context("write team posts")?;
    for post in &written {
        println!("Generated post #{}: {} -> {}", post.rank, post.team, post.path.display());
    }

    let source = if cfg.sample_feed {
        "synthetic sample feed"
    } else {
        cfg.stats_url.as_str()
    };
    let summary_path =
        report::write_summary_post(&cfg.posts_dir, date, &ranked, table.row_count(), source)
            .context("write summary post")?;
    println!("Summary post created: {}", summary_path.display());

    let index = posts::load_posts(&cfg.posts_dir);
    println!(
        "Completed: {} posts written, {} now in {}",
        written.len() + 1,
        index.posts.len(),
        cfg.posts_dir.display()
    );
    for err in &index.errors {
        eprintln!("[WARN] Unreadable post: {err}");
    }

    Ok(())
}
