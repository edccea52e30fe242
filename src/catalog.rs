//! The fixed set of pages eligible for matching.
//!
//! The built-in catalog is compiled into the binary from
//! `catalog/pages.toml`; updating it means rebuilding and redeploying.
//! A [`Catalog`] is never mutated after construction and is shared between
//! handlers behind an `Arc`.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::warn;

use crate::models::PageRecord;

const BUILTIN_CATALOG: &str = include_str!("../catalog/pages.toml");

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    pages: Vec<PageRecord>,
}

/// A category label with the number of pages filed under it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub pages: usize,
}

/// Ordered, immutable list of site pages.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pages: Vec<PageRecord>,
}

impl Catalog {
    /// Build a catalog from records in the given order.
    ///
    /// Duplicate URLs are logged but accepted; lookups return the first.
    pub fn new(pages: Vec<PageRecord>) -> Self {
        let mut seen = HashSet::new();
        for page in &pages {
            if !seen.insert(normalize_url(&page.url)) {
                warn!(url = %page.url, "duplicate url in catalog");
            }
        }
        Self { pages }
    }

    /// The catalog embedded at build time.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG).context("Failed to parse built-in catalog")
    }

    /// Parse a catalog from a TOML document holding a `[[pages]]` array.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile =
            toml::from_str(content).with_context(|| "Failed to parse catalog TOML")?;

        for (i, page) in file.pages.iter().enumerate() {
            if page.title.trim().is_empty() {
                bail!("catalog page #{} has an empty title", i + 1);
            }
            if page.url.trim().is_empty() {
                bail!("catalog page '{}' has an empty url", page.title);
            }
        }

        Ok(Self::new(file.pages))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PageRecord> {
        self.pages.iter()
    }

    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }

    /// Look up a page by URL. `/about.html`, `./about.html` and
    /// `about.html` all name the same page.
    pub fn find(&self, url: &str) -> Option<&PageRecord> {
        let wanted = normalize_url(url);
        self.pages.iter().find(|p| normalize_url(&p.url) == wanted)
    }

    /// Categories in first-seen order with their page counts.
    pub fn categories(&self) -> Vec<CategoryCount> {
        let mut out: Vec<CategoryCount> = Vec::new();
        for page in &self.pages {
            match out.iter_mut().find(|c| c.name == page.category) {
                Some(c) => c.pages += 1,
                None => out.push(CategoryCount {
                    name: page.category.clone(),
                    pages: 1,
                }),
            }
        }
        out
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a PageRecord;
    type IntoIter = std::slice::Iter<'a, PageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

/// Category labels compare case-insensitively (Unicode-aware), ignoring
/// surrounding whitespace.
pub(crate) fn same_category(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Strip leading `./` and `/` so relative links compare equal.
pub(crate) fn normalize_url(url: &str) -> &str {
    let mut u = url.trim();
    loop {
        if let Some(rest) = u.strip_prefix("./") {
            u = rest;
        } else if let Some(rest) = u.strip_prefix('/') {
            u = rest;
        } else {
            return u;
        }
    }
}
