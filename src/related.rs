//! Related-content suggestions for a page.
//!
//! Every other page in the catalog earns `category_weight` for sharing the
//! source page's category, plus `keyword_weight` for each source keyword it
//! also lists. Comparison is case-insensitive and exact per keyword. Pages
//! scoring 0 are dropped; ties keep catalog order.

use anyhow::Result;
use std::collections::HashSet;

use crate::catalog::{normalize_url, same_category, Catalog};
use crate::config::{Config, RelatedConfig};
use crate::models::{PageRecord, ScoredResult};
use crate::search::{clamp_limit, print_results, SearchIndex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedParams {
    pub max_results: usize,
    pub category_weight: u32,
    pub keyword_weight: u32,
}

impl Default for RelatedParams {
    fn default() -> Self {
        Self::from(&RelatedConfig::default())
    }
}

impl From<&RelatedConfig> for RelatedParams {
    fn from(cfg: &RelatedConfig) -> Self {
        Self {
            max_results: cfg.max_results,
            category_weight: cfg.category_weight,
            keyword_weight: cfg.keyword_weight,
        }
    }
}

/// Pages related to the one at `url`, best first, at most `limit`.
///
/// An unknown `url` yields no suggestions.
pub fn related_pages<'a>(
    catalog: &'a Catalog,
    url: &str,
    params: &RelatedParams,
    limit: usize,
) -> Vec<ScoredResult<'a>> {
    let Some(source) = catalog.find(url) else {
        return Vec::new();
    };
    let source_url = normalize_url(&source.url);
    let keywords: HashSet<String> = source.keywords.iter().map(|k| k.to_lowercase()).collect();

    let mut results: Vec<ScoredResult<'a>> = catalog
        .iter()
        .filter(|p| normalize_url(&p.url) != source_url)
        .filter_map(|page| {
            let score = relatedness(page, &source.category, &keywords, params);
            (score > 0).then_some(ScoredResult { page, score })
        })
        .collect();

    results.sort_by(|a, b| b.score.cmp(&a.score));
    results.truncate(limit);
    results
}

fn relatedness(
    page: &PageRecord,
    category: &str,
    keywords: &HashSet<String>,
    params: &RelatedParams,
) -> u32 {
    let mut score: u32 = 0;
    if same_category(&page.category, category) {
        score = score.saturating_add(params.category_weight);
    }
    let shared = page
        .keywords
        .iter()
        .map(|k| k.to_lowercase())
        .collect::<HashSet<_>>()
        .intersection(keywords)
        .count() as u32;
    score.saturating_add(shared.saturating_mul(params.keyword_weight))
}

impl SearchIndex {
    /// Suggestions for the page at `url`. `limit` defaults to, and is capped
    /// at, the configured `max_results`.
    pub fn related(&self, url: &str, limit: Option<usize>) -> Vec<ScoredResult<'_>> {
        let params = self.related_params();
        let limit = limit
            .unwrap_or(params.max_results)
            .min(params.max_results);
        related_pages(self.catalog(), url, params, limit)
    }
}

/// CLI entry point — prints suggestions for the page at `url`.
pub fn run_related(config: &Config, url: &str, limit: Option<usize>, json: bool) -> Result<()> {
    let index = SearchIndex::from_config(config)?;
    if index.catalog().find(url).is_none() {
        anyhow::bail!("page not found in catalog: {}", url);
    }

    let limit = clamp_limit(limit, index.related_params().max_results);
    let results = index.related(url, Some(limit));

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No related pages.");
        return Ok(());
    }

    print_results(&results);
    Ok(())
}
