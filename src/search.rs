//! Keyword search over the page catalog.
//!
//! # Scoring Algorithm
//!
//! 1. Reject queries shorter than `min_query_chars` after trimming.
//! 2. Split the query on whitespace and lower-case each token.
//! 3. For every page and every token, add `title_weight` if the token occurs
//!    in the lower-cased title, `description_weight` if it occurs in the
//!    description, and `keywords_weight` if it occurs in the space-joined
//!    keywords. Fields are scored independently.
//! 4. Drop pages scoring 0.
//! 5. Sort by score (desc); ties keep catalog order.
//! 6. Truncate to `max_results`.
//!
//! Matching is plain substring containment: `"fib"` matches `"Fibromyalgia"`.
//! The index holds no per-query state, so repeated calls are independent.

use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use crate::catalog::Catalog;
use crate::config::{Config, SearchConfig};
use crate::models::{PageRecord, ScoredResult};
use crate::related::RelatedParams;

/// Search tuning parameters, decoupled from application config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Queries shorter than this (in characters, after trimming) match nothing.
    pub min_query_chars: usize,
    /// Maximum results to return.
    pub max_results: usize,
    pub title_weight: u32,
    pub description_weight: u32,
    pub keywords_weight: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for SearchParams {
    fn from(cfg: &SearchConfig) -> Self {
        Self {
            min_query_chars: cfg.min_query_chars,
            max_results: cfg.max_results,
            title_weight: cfg.title_weight,
            description_weight: cfg.description_weight,
            keywords_weight: cfg.keywords_weight,
        }
    }
}

/// Read-only search index over an immutable [`Catalog`].
///
/// Cheap to clone and safe to share across threads.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    catalog: Arc<Catalog>,
    params: SearchParams,
    related: RelatedParams,
}

impl SearchIndex {
    pub fn new(catalog: Arc<Catalog>, params: SearchParams, related: RelatedParams) -> Self {
        Self {
            catalog,
            params,
            related,
        }
    }

    /// Index over `catalog` with default parameters.
    pub fn with_defaults(catalog: Catalog) -> Self {
        Self::new(
            Arc::new(catalog),
            SearchParams::default(),
            RelatedParams::default(),
        )
    }

    /// Index over the built-in catalog, tuned by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog = Catalog::builtin()?;
        Ok(Self::new(
            Arc::new(catalog),
            SearchParams::from(&config.search),
            RelatedParams::from(&config.related),
        ))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn related_params(&self) -> &RelatedParams {
        &self.related
    }

    /// Best-matching pages for `query`, capped at `max_results`.
    pub fn search(&self, query: &str) -> Vec<ScoredResult<'_>> {
        self.search_with_limit(query, self.params.max_results)
    }

    /// Like [`search`](Self::search) with a caller-chosen cap. The cap never
    /// exceeds `max_results`.
    pub fn search_with_limit(&self, query: &str, limit: usize) -> Vec<ScoredResult<'_>> {
        if query.trim().chars().count() < self.params.min_query_chars {
            return Vec::new();
        }

        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<ScoredResult<'_>> = self
            .catalog
            .iter()
            .filter_map(|page| {
                let score = score_page(page, &tokens, &self.params);
                (score > 0).then_some(ScoredResult { page, score })
            })
            .collect();

        // sort_by is stable, so equal scores stay in catalog order.
        results.sort_by(|a, b| b.score.cmp(&a.score));
        results.truncate(limit.min(self.params.max_results));

        debug!(query, hits = results.len(), "search");
        results
    }
}

/// Split on whitespace runs and lower-case each token.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Additive score of `page` for already-tokenized query terms.
pub fn score_page(page: &PageRecord, tokens: &[String], params: &SearchParams) -> u32 {
    let title = page.title.to_lowercase();
    let description = page.description.to_lowercase();
    let keywords = page.keyword_text();

    tokens
        .iter()
        .map(|t| {
            let mut s: u32 = 0;
            if title.contains(t.as_str()) {
                s = s.saturating_add(params.title_weight);
            }
            if description.contains(t.as_str()) {
                s = s.saturating_add(params.description_weight);
            }
            if keywords.contains(t.as_str()) {
                s = s.saturating_add(params.keywords_weight);
            }
            s
        })
        .fold(0, u32::saturating_add)
}

/// Clamp a requested limit to `[1, max]`, defaulting to `max`.
pub fn clamp_limit(requested: Option<usize>, max: usize) -> usize {
    requested.unwrap_or(max).clamp(1, max.max(1))
}

/// CLI entry point — runs a search and prints the results to stdout.
pub fn run_search(config: &Config, query: &str, limit: Option<usize>, json: bool) -> Result<()> {
    let index = SearchIndex::from_config(config)?;
    let limit = clamp_limit(limit, index.params().max_results);
    let results = index.search_with_limit(query, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    print_results(&results);
    Ok(())
}

pub(crate) fn print_results(results: &[ScoredResult<'_>]) {
    for (i, r) in results.iter().enumerate() {
        println!(
            "{}. [{}] {} / {}",
            i + 1,
            r.score,
            r.page.category,
            r.page.title
        );
        println!("    url: {}", r.page.url);
        println!("    {}", r.page.description);
        println!();
    }
}
