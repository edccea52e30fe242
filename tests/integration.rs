use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn sitesearch_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sitesearch"))
}

fn setup_test_env(config_content: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let config_dir = tmp.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let config_path = config_dir.join("sitesearch.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn default_env() -> (TempDir, PathBuf) {
    setup_test_env(
        r#"[search]
min_query_chars = 2
max_results = 6

[related]
max_results = 3

[server]
bind = "127.0.0.1:7341"
"#,
    )
}

fn run_sitesearch(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = sitesearch_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run sitesearch binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn json_results(stdout: &str) -> Vec<serde_json::Value> {
    let v: serde_json::Value = serde_json::from_str(stdout)
        .unwrap_or_else(|e| panic!("stdout is not JSON ({}): {}", e, stdout));
    v.as_array().expect("expected a JSON array").clone()
}

#[test]
fn test_search_prints_ranked_results() {
    let (_tmp, config_path) = default_env();

    let (stdout, stderr, success) = run_sitesearch(&config_path, &["search", "chronic pain"]);
    assert!(success, "search failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.starts_with("1. ["));
    assert!(stdout.contains("Chronic Pain Conditions"));
    assert!(stdout.contains("url: conditions.html"));
}

#[test]
fn test_search_json_output() {
    let (_tmp, config_path) = default_env();

    let (stdout, _, success) = run_sitesearch(&config_path, &["search", "fibromyalgia", "--json"]);
    assert!(success);
    let results = json_results(&stdout);
    assert!(!results.is_empty());
    assert!(results.len() <= 6);
    assert!(results
        .iter()
        .any(|r| r["url"] == "conditions.html" && r["score"].as_u64().unwrap() >= 3));
    for r in &results {
        assert!(r.get("title").is_some());
        assert!(r.get("description").is_some());
        assert!(r.get("category").is_some());
    }
}

#[test]
fn test_search_short_query_has_no_results() {
    let (_tmp, config_path) = default_env();

    let (stdout, _, success) = run_sitesearch(&config_path, &["search", " a "]);
    assert!(success);
    assert!(stdout.contains("No results."));
}

#[test]
fn test_search_respects_configured_max_results() {
    let (_tmp, config_path) = setup_test_env("[search]\nmax_results = 2\n");

    let (stdout, _, success) = run_sitesearch(&config_path, &["search", "pain", "--json"]);
    assert!(success);
    assert_eq!(json_results(&stdout).len(), 2);
}

#[test]
fn test_search_limit_flag() {
    let (_tmp, config_path) = default_env();

    let (stdout, _, success) =
        run_sitesearch(&config_path, &["search", "pain", "--limit", "1", "--json"]);
    assert!(success);
    assert_eq!(json_results(&stdout).len(), 1);
}

#[test]
fn test_search_is_repeatable() {
    let (_tmp, config_path) = default_env();

    let (first, _, _) = run_sitesearch(&config_path, &["search", "fatigue", "--json"]);
    let (second, _, _) = run_sitesearch(&config_path, &["search", "fatigue", "--json"]);
    assert_eq!(first, second);
}

#[test]
fn test_missing_config_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("absent.toml");

    let (stdout, stderr, success) = run_sitesearch(&config_path, &["search", "lupus", "--json"]);
    assert!(success, "stderr={}", stderr);
    let results = json_results(&stdout);
    assert_eq!(results[0]["url"], "conditions/lupus.html");
}

#[test]
fn test_invalid_config_fails() {
    let (_tmp, config_path) = setup_test_env("[search]\nmax_results = 0\n");

    let (_, stderr, success) = run_sitesearch(&config_path, &["search", "pain"]);
    assert!(!success);
    assert!(stderr.contains("search.max_results"));
}

#[test]
fn test_related_lists_same_category() {
    let (_tmp, config_path) = default_env();

    let (stdout, stderr, success) =
        run_sitesearch(&config_path, &["related", "conditions/lupus.html", "--json"]);
    assert!(success, "related failed: stderr={}", stderr);
    let results = json_results(&stdout);
    assert!(!results.is_empty() && results.len() <= 3);
    assert!(results.iter().all(|r| r["url"] != "conditions/lupus.html"));
    assert!(results.iter().any(|r| r["category"] == "Conditions"));
}

#[test]
fn test_related_unknown_page_fails() {
    let (_tmp, config_path) = default_env();

    let (_, stderr, success) = run_sitesearch(&config_path, &["related", "nope.html"]);
    assert!(!success);
    assert!(stderr.contains("page not found"));
}

#[test]
fn test_pages_lists_catalog() {
    let (_tmp, config_path) = default_env();

    let (stdout, _, success) = run_sitesearch(&config_path, &["pages"]);
    assert!(success);
    assert!(stdout.contains("CATEGORY"));
    assert!(stdout.contains("symptom-checker.html"));
    // header + 13 pages
    assert_eq!(stdout.lines().count(), 14);
}

#[test]
fn test_pages_category_filter() {
    let (_tmp, config_path) = default_env();

    let (stdout, _, success) = run_sitesearch(&config_path, &["pages", "--category", "about"]);
    assert!(success);
    assert!(stdout.contains("about.html"));
    assert!(stdout.contains("contact.html"));
    assert!(!stdout.contains("lupus"));
}

#[test]
fn test_categories() {
    let (_tmp, config_path) = default_env();

    let (stdout, _, success) = run_sitesearch(&config_path, &["categories"]);
    assert!(success);
    assert!(stdout.contains("Conditions"));
    assert!(stdout.contains("Hormonal Health"));
}

#[test]
fn test_completions() {
    let (_tmp, config_path) = default_env();

    let (stdout, _, success) = run_sitesearch(&config_path, &["completions", "bash"]);
    assert!(success);
    assert!(stdout.contains("sitesearch"));
}

#[test]
fn test_zero_limit_clamps_to_one() {
    let (_tmp, config_path) = default_env();

    let (stdout, _, success) =
        run_sitesearch(&config_path, &["search", "pain", "--limit", "0", "--json"]);
    assert!(success);
    assert_eq!(json_results(&stdout).len(), 1);

    let (stdout, _, success) = run_sitesearch(
        &config_path,
        &["related", "conditions/lupus.html", "--limit", "0", "--json"],
    );
    assert!(success);
    assert_eq!(json_results(&stdout).len(), 1);
}
