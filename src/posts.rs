use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

/// One generated report loaded back from disk.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub filename: String,
    pub slug: String,
    pub title: String,
    pub date: String,
    pub team: String,
    pub rank: Option<u32>,
    pub performance_score: Option<f64>,
    pub content: String,
}

impl Post {
    /// Team analysis posts only; the run summary carries no team.
    pub fn is_team_post(&self) -> bool {
        !self.team.is_empty()
            && self.team != "Unknown"
            && !self.title.to_lowercase().contains("summary")
    }
}

/// Result of scanning a posts directory. Unreadable or malformed files
/// land in `errors` instead of failing the whole listing.
#[derive(Debug, Default)]
pub struct PostIndex {
    pub posts: Vec<Post>,
    pub errors: Vec<String>,
}

/// Split a `---`-fenced frontmatter header off a markdown document.
/// Returns the `key: value` map and the remaining body; documents
/// without a header yield an empty map.
pub fn parse_frontmatter(content: &str) -> (HashMap<String, String>, &str) {
    if !content.starts_with("---") {
        return (HashMap::new(), content);
    }
    let mut parts = content.splitn(3, "---");
    parts.next();
    let Some(header) = parts.next() else {
        return (HashMap::new(), content);
    };
    let Some(body) = parts.next() else {
        return (HashMap::new(), content);
    };

    let mut meta = HashMap::new();
    for line in header.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim().trim_matches('"');
        if !key.is_empty() {
            meta.insert(key.to_string(), value.to_string());
        }
    }
    (meta, body.trim_start_matches('\n'))
}

/// Load every `*.md` under `dir`. A missing directory is an empty
/// index, not an error.
pub fn load_posts(dir: &Path) -> PostIndex {
    let mut index = PostIndex::default();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return index,
    };

    for entry in entries {
        let Ok(entry) = entry else { continue };
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        match fs::read_to_string(&path) {
            Ok(raw) => index.posts.push(post_from_markdown(&path, &raw)),
            Err(err) => index
                .errors
                .push(format!("{}: {err}", path.display())),
        }
    }
    index
}

fn post_from_markdown(path: &Path, raw: &str) -> Post {
    let (meta, body) = parse_frontmatter(raw);
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let slug = filename.trim_end_matches(".md").to_string();

    let get = |key: &str| meta.get(key).cloned().unwrap_or_default();
    Post {
        slug,
        filename,
        title: non_empty_or(get("title"), "Untitled"),
        date: get("date"),
        team: non_empty_or(get("team"), "Unknown"),
        rank: meta.get("rank").and_then(|v| v.parse().ok()),
        performance_score: meta.get("performance_score").and_then(|v| v.parse().ok()),
        content: body.to_string(),
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

/// Listing order: newest date first, then by rank (summary posts,
/// which carry no rank, sort ahead of ranked ones within a date).
pub fn sort_for_listing(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        let ka = (a.date.as_str(), a.rank.unwrap_or(999));
        let kb = (b.date.as_str(), b.rank.unwrap_or(999));
        kb.cmp(&ka)
    });
}

/// Team posts ordered by performance score, best first.
pub fn team_rankings(posts: &[Post]) -> Vec<&Post> {
    let mut teams: Vec<&Post> = posts.iter().filter(|p| p.is_team_post()).collect();
    teams.sort_by(|a, b| {
        let sa = a.performance_score.unwrap_or(0.0);
        let sb = b.performance_score.unwrap_or(0.0);
        sb.total_cmp(&sa)
    });
    teams
}

pub fn find_by_slug<'a>(posts: &'a [Post], slug: &str) -> Option<&'a Post> {
    posts.iter().find(|p| p.slug == slug)
}

/// Case-insensitive substring search over title, team and body.
pub fn search<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    posts
        .iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&query)
                || p.team.to_lowercase().contains(&query)
                || p.content.to_lowercase().contains(&query)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_frontmatter;

    #[test]
    fn frontmatter_absent_returns_body() {
        let (meta, body) = parse_frontmatter("# Just a heading\n");
        assert!(meta.is_empty());
        assert_eq!(body, "# Just a heading\n");
    }

    #[test]
    fn frontmatter_strips_quotes() {
        let raw = "---\ntitle: \"Team Analysis: Arsenal\"\nrank: 3\n---\n\nBody here\n";
        let (meta, body) = parse_frontmatter(raw);
        assert_eq!(meta.get("title").map(String::as_str), Some("Team Analysis: Arsenal"));
        assert_eq!(meta.get("rank").map(String::as_str), Some("3"));
        assert_eq!(body, "Body here\n");
    }
}
