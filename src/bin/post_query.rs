use std::path::PathBuf;

use anyhow::{Result, anyhow};

use formguide::posts::{self, Post};

const USAGE: &str = "usage: post_query [--posts-dir=DIR] [--json] <list|teams|show SLUG|search QUERY>";

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = std::env::args().skip(1).collect::<Vec<_>>();

    let posts_dir = parse_posts_dir_arg(&args)
        .or_else(|| std::env::var("POSTS_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("posts"));
    let json = args.iter().any(|a| a == "--json");

    let mut positional: Vec<&String> = Vec::new();
    let mut skip_next = false;
    for arg in &args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--posts-dir" {
            skip_next = true;
            continue;
        }
        if !arg.starts_with("--") {
            positional.push(arg);
        }
    }
    let Some(command) = positional.first() else {
        return Err(anyhow!(USAGE));
    };

    let index = posts::load_posts(&posts_dir);
    for err in &index.errors {
        eprintln!("[WARN] skipped: {err}");
    }

    match command.as_str() {
        "list" => {
            let mut all = index.posts;
            posts::sort_for_listing(&mut all);
            emit(&all, json, "no posts found");
        }
        "teams" => {
            let teams: Vec<Post> = posts::team_rankings(&index.posts)
                .into_iter()
                .cloned()
                .collect();
            emit(&teams, json, "no team posts found");
        }
        "show" => {
            let slug = positional
                .get(1)
                .ok_or_else(|| anyhow!("show needs a post slug\n{USAGE}"))?;
            let post = posts::find_by_slug(&index.posts, slug.as_str())
                .ok_or_else(|| anyhow!("no post with slug {slug}"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(post)?);
            } else {
                println!("{}", post.content);
            }
        }
        "search" => {
            let query = positional
                .get(1)
                .ok_or_else(|| anyhow!("search needs a query\n{USAGE}"))?;
            let hits: Vec<Post> = posts::search(&index.posts, query.as_str())
                .into_iter()
                .cloned()
                .collect();
            emit(&hits, json, "no matches");
        }
        other => return Err(anyhow!("unknown command {other}\n{USAGE}")),
    }

    Ok(())
}

fn emit(list: &[Post], json: bool, empty_msg: &str) {
    if json {
        match serde_json::to_string_pretty(list) {
            Ok(out) => println!("{out}"),
            Err(err) => eprintln!("[WARN] json encode failed: {err}"),
        }
        return;
    }
    if list.is_empty() {
        println!("{empty_msg}");
        return;
    }
    for post in list {
        match post.rank {
            Some(rank) => println!(
                "{}  #{:<3} {:<30} score={:<8} {}",
                post.date,
                rank,
                post.team,
                post.performance_score
                    .map(|s| format!("{s:.2}"))
                    .unwrap_or_else(|| "-".to_string()),
                post.slug
            ),
            None => println!("{}  {:<36} {}", post.date, post.title, post.slug),
        }
    }
}

fn parse_posts_dir_arg(args: &[String]) -> Option<PathBuf> {
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix("--posts-dir=") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == "--posts-dir" {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}
