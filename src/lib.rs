//! # Site Search
//!
//! Keyword search and related-content suggestions over the fixed catalog of
//! pages that make up a static content website.
//!
//! The catalog is compiled into the binary. Search is a pure function over
//! it: no caches, no persistence, safe to call from any thread.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐   ┌──────────────┐
//! │   Catalog    │──▶│  SearchIndex   │──▶│  CLI / HTTP  │
//! │  pages.toml  │   │ search/related │   │ (sitesearch) │
//! └──────────────┘   └────────────────┘   └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! sitesearch search "chronic pain"
//! sitesearch related conditions/lupus.html
//! sitesearch serve                 # GET /search?q=...
//! ```
//!
//! ## Library use
//!
//! ```rust
//! use site_search::catalog::Catalog;
//! use site_search::search::SearchIndex;
//!
//! let index = SearchIndex::with_defaults(Catalog::builtin().unwrap());
//! let results = index.search("fibromyalgia");
//! assert!(results.iter().all(|r| r.score > 0));
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | The embedded page catalog |
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Page and result types |
//! | [`search`] | Keyword scoring and ranking |
//! | [`related`] | Related-content suggestions |
//! | [`pages`] | Catalog listings for the CLI |
//! | [`server`] | JSON HTTP API |

pub mod catalog;
pub mod config;
pub mod models;
pub mod pages;
pub mod related;
pub mod search;
pub mod server;
