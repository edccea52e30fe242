//! Core data models used throughout site search.
//!
//! These types represent the catalog pages and the scored results that flow
//! out of the search and related-content operations.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// A single page of the site, as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Display name of the page.
    pub title: String,
    /// Relative link target, resolved by the host page.
    pub url: String,
    /// One-sentence summary.
    pub description: String,
    /// Grouping label (e.g. `Conditions`, `Resources`).
    pub category: String,
    /// Additional matchable terms, in display order.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl PageRecord {
    /// Keywords lower-cased and joined by single spaces, as matched by search.
    pub fn keyword_text(&self) -> String {
        self.keywords.join(" ").to_lowercase()
    }
}

/// A catalog page paired with the relevance score it earned for one query.
///
/// Borrowed from the index that produced it; results are built per query
/// and dropped after rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredResult<'a> {
    pub page: &'a PageRecord,
    pub score: u32,
}

/// Serializes as the result shape rendered by callers:
/// `{ title, url, description, category, score }`.
impl Serialize for ScoredResult<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ScoredResult", 5)?;
        s.serialize_field("title", &self.page.title)?;
        s.serialize_field("url", &self.page.url)?;
        s.serialize_field("description", &self.page.description)?;
        s.serialize_field("category", &self.page.category)?;
        s.serialize_field("score", &self.score)?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> PageRecord {
        PageRecord {
            title: "Lupus".to_string(),
            url: "conditions/lupus.html".to_string(),
            description: "Joint pain and flares.".to_string(),
            category: "Conditions".to_string(),
            keywords: vec!["Autoimmune".to_string(), "Joint Pain".to_string()],
        }
    }

    #[test]
    fn test_keyword_text_is_lowercased_and_space_joined() {
        assert_eq!(page().keyword_text(), "autoimmune joint pain");
    }

    #[test]
    fn test_scored_result_serializes_without_keywords() {
        let p = page();
        let result = ScoredResult { page: &p, score: 13 };
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["title"], "Lupus");
        assert_eq!(json["url"], "conditions/lupus.html");
        assert_eq!(json["category"], "Conditions");
        assert_eq!(json["score"], 13);
        assert!(json.get("keywords").is_none());
    }
}
