//! Items, pages and page tokens exchanged between a selector and its host.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a selectable entity.
///
/// Backends hand out either numeric or string keys, so both are accepted.
/// Uniqueness is only assumed within one fetch session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Int(i64),
    Str(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Int(id) => write!(f, "{}", id),
            ItemId::Str(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        ItemId::Int(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        ItemId::Str(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId::Str(id.to_string())
    }
}

/// The unit a selector displays and hands back to its host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectableItem {
    pub id: ItemId,
    /// Primary display text
    pub label: String,
    /// Subtitle such as an email, status or code
    #[serde(default)]
    pub secondary_label: Option<String>,
    /// Avatar or image reference
    #[serde(default)]
    pub image_ref: Option<String>,
}

impl SelectableItem {
    pub fn new(id: impl Into<ItemId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            secondary_label: None,
            image_ref: None,
        }
    }

    pub fn with_secondary(mut self, secondary: impl Into<String>) -> Self {
        self.secondary_label = Some(secondary.into());
        self
    }

    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    /// Case-insensitive substring match against the label or secondary label.
    ///
    /// An empty (or whitespace-only) query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.label.to_lowercase().contains(&query)
            || self
                .secondary_label
                .as_ref()
                .is_some_and(|s| s.to_lowercase().contains(&query))
    }
}

/// 1-based page number used as the pagination cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageToken(u32);

impl PageToken {
    pub const FIRST: PageToken = PageToken(1);

    /// Build a token, clamping 0 to the first page.
    #[cfg(test)]
    pub fn new(page: u32) -> Self {
        Self(page.max(1))
    }

    pub fn number(self) -> u32 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn is_first(self) -> bool {
        self == Self::FIRST
    }
}

impl Default for PageToken {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One page returned by a data source. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageResult {
    /// Items in display order
    pub items: Vec<SelectableItem>,
    /// Whether a subsequent page exists
    pub has_more: bool,
    /// Total matching items across all pages (display only)
    pub total_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_label_or_secondary_case_insensitive() {
        let ahmed = SelectableItem::new(1_i64, "Ahmed").with_secondary("ahmed@x.com");
        let sara = SelectableItem::new(2_i64, "Sara").with_secondary("sara@x.com");

        assert!(ahmed.matches("ahm"));
        assert!(ahmed.matches("AHM"));
        assert!(!sara.matches("ahm"));
        assert!(sara.matches("@X.COM"));
        assert!(sara.matches("  "));
    }

    #[test]
    fn test_item_id_deserializes_int_or_string() {
        let ids: Vec<ItemId> = serde_json::from_str(r#"[7, "riyadh"]"#).unwrap();
        assert_eq!(ids, vec![ItemId::Int(7), ItemId::Str("riyadh".to_string())]);
        assert_eq!(ids[1].to_string(), "riyadh");
    }

    #[test]
    fn test_page_token_clamps_and_advances() {
        assert_eq!(PageToken::new(0), PageToken::FIRST);
        assert_eq!(PageToken::FIRST.next().number(), 2);
        assert!(!PageToken::new(3).is_first());
    }
}
