//! Translation table data model
//!
//! A [`TranslationTable`] maps language codes to [`LanguageTree`]s. A tree is
//! a nested mapping whose leaves are translated strings, addressed with dotted
//! keys such as `nav.home`.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::utils::errors::{I18nError, Result};

/// One entry of a language tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationNode {
    Text(String),
    Tree(LanguageTree),
}

/// Nested translations for a single language
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageTree {
    entries: BTreeMap<String, TranslationNode>,
}

impl LanguageTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a leaf string under `key`
    pub fn with_text(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), TranslationNode::Text(value.to_string()));
        self
    }

    /// Add a nested tree under `key`
    pub fn with_tree(mut self, key: &str, tree: LanguageTree) -> Self {
        self.entries.insert(key.to_string(), TranslationNode::Tree(tree));
        self
    }

    /// Resolve a dotted key to its leaf string
    ///
    /// Returns `None` as soon as a segment is missing, when a leaf is reached
    /// before the last segment, or when the path ends on a subtree.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        let mut segments = key.split('.');
        let mut current = self.entries.get(segments.next()?)?;

        for segment in segments {
            current = match current {
                TranslationNode::Tree(tree) => tree.entries.get(segment)?,
                TranslationNode::Text(_) => return None,
            };
        }

        match current {
            TranslationNode::Text(text) => Some(text.as_str()),
            TranslationNode::Tree(_) => None,
        }
    }

    /// Number of leaf strings in the tree
    pub fn leaf_count(&self) -> usize {
        self.entries
            .values()
            .map(|node| match node {
                TranslationNode::Text(_) => 1,
                TranslationNode::Tree(tree) => tree.leaf_count(),
            })
            .sum()
    }

    /// Dotted paths of every leaf, in key order
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        self.collect_keys("", &mut keys);
        keys
    }

    fn collect_keys(&self, prefix: &str, keys: &mut Vec<String>) {
        for (name, node) in &self.entries {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{}.{}", prefix, name)
            };
            match node {
                TranslationNode::Text(_) => keys.push(path),
                TranslationNode::Tree(tree) => tree.collect_keys(&path, keys),
            }
        }
    }

    /// Build a tree from a JSON object
    ///
    /// Numbers and `true` become their string rendering. Null, arrays and the
    /// falsy scalars `0` and `false` are dropped, so their elements stay as
    /// written.
    pub fn from_json(map: &Map<String, Value>) -> Self {
        let mut tree = LanguageTree::new();

        for (key, value) in map {
            let node = match value {
                Value::String(s) => TranslationNode::Text(s.clone()),
                Value::Object(nested) => TranslationNode::Tree(LanguageTree::from_json(nested)),
                Value::Number(n) if n.as_f64() != Some(0.0) => TranslationNode::Text(n.to_string()),
                Value::Bool(true) => TranslationNode::Text("true".to_string()),
                Value::Null | Value::Array(_) | Value::Number(_) | Value::Bool(false) => {
                    debug!(key = %key, "Skipping non-text translation value");
                    continue;
                }
            };
            tree.entries.insert(key.clone(), node);
        }

        tree
    }
}

/// Translations for every language of the site
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    languages: HashMap<String, LanguageTree>,
}

impl TranslationTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the tree of a language
    pub fn with_language(mut self, code: &str, tree: LanguageTree) -> Self {
        self.languages.insert(code.to_string(), tree);
        self
    }

    /// Parse a table from its JSON document
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(&value)
    }

    /// Build a table from a parsed JSON document
    ///
    /// The document must be an object; language entries that are not objects
    /// are skipped.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Value::Object(root) = value else {
            return Err(I18nError::InvalidTable(
                "translation document is not an object".to_string()
            ));
        };

        let mut table = TranslationTable::new();
        for (code, entry) in root {
            match entry {
                Value::Object(map) => {
                    table.languages.insert(code.clone(), LanguageTree::from_json(map));
                }
                _ => warn!(language = %code, "Skipping language entry that is not an object"),
            }
        }

        Ok(table)
    }

    /// Tree of a language, if present
    pub fn get(&self, code: &str) -> Option<&LanguageTree> {
        self.languages.get(code)
    }

    /// Check if a language has a tree
    pub fn contains(&self, code: &str) -> bool {
        self.languages.contains_key(code)
    }

    /// Resolve a dotted key for a language
    pub fn resolve(&self, code: &str, key: &str) -> Option<&str> {
        self.languages.get(code)?.resolve(key)
    }

    /// Language codes, sorted
    pub fn languages(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_tree() -> LanguageTree {
        LanguageTree::new()
            .with_tree("nav", LanguageTree::new().with_text("home", "Home").with_text("what", "What?"))
            .with_text("title", "PatrikLani")
    }

    #[test]
    fn test_resolve_nested_key() {
        let tree = sample_tree();
        assert_eq!(tree.resolve("nav.home"), Some("Home"));
        assert_eq!(tree.resolve("title"), Some("PatrikLani"));
    }

    #[test]
    fn test_resolve_missing_segments() {
        let tree = sample_tree();
        assert_eq!(tree.resolve("nav.missing"), None);
        assert_eq!(tree.resolve("missing.home"), None);
        assert_eq!(tree.resolve("title.deeper"), None);
        assert_eq!(tree.resolve(""), None);
        assert_eq!(tree.resolve("nav."), None);
    }

    #[test]
    fn test_resolve_subtree_is_not_a_leaf() {
        assert_eq!(sample_tree().resolve("nav"), None);
    }

    #[test]
    fn test_keys_and_leaf_count() {
        let tree = sample_tree();
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.keys(), vec!["nav.home", "nav.what", "title"]);
    }

    #[test]
    fn test_from_value_is_lenient_with_leaves() {
        let value = json!({
            "en": {
                "count": 3,
                "flag": true,
                "zero": 0,
                "off": false,
                "nothing": null,
                "list": ["a", "b"],
                "nav": { "home": "Home" }
            },
            "broken": "not a tree"
        });

        let table = TranslationTable::from_value(&value).unwrap();
        assert_eq!(table.languages(), vec!["en"]);
        assert_eq!(table.resolve("en", "count"), Some("3"));
        assert_eq!(table.resolve("en", "flag"), Some("true"));
        assert_eq!(table.resolve("en", "zero"), None);
        assert_eq!(table.resolve("en", "off"), None);
        assert_eq!(table.resolve("en", "nothing"), None);
        assert_eq!(table.resolve("en", "list"), None);
        assert_eq!(table.resolve("en", "nav.home"), Some("Home"));
    }

    #[test]
    fn test_from_value_rejects_non_object_root() {
        let err = TranslationTable::from_value(&json!(["en", "pl"])).unwrap_err();
        assert!(matches!(err, I18nError::InvalidTable(_)));
    }

    #[test]
    fn test_from_json_str_rejects_malformed_content() {
        let err = TranslationTable::from_json_str("{ \"en\": ").unwrap_err();
        assert!(matches!(err, I18nError::Serialization(_)));
    }
}
