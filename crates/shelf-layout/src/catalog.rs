#![forbid(unsafe_code)]

//! The item source the engine reads from.
//!
//! The engine only ever copies the item list and reads attributes. It never
//! writes back into a catalog.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{GroupMap, ItemId};

/// The filter a catalog currently has applied, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterDescriptor {
    Binary { category: String, value: String },
    Grouped { category: String, groups: GroupMap },
}

impl FilterDescriptor {
    pub fn category(&self) -> &str {
        match self {
            Self::Binary { category, .. } | Self::Grouped { category, .. } => category,
        }
    }
}

/// Ordered items plus attribute lookup.
pub trait ItemCatalog {
    /// Every item, in load order. Returns a copy.
    fn items(&self) -> Vec<ItemId>;

    /// Attribute value at a dotted `path`, e.g. `film_info.box_office`.
    fn attribute(&self, id: &ItemId, path: &str) -> Option<Value>;

    fn active_filter(&self) -> Option<&FilterDescriptor>;

    /// Numeric attribute at `path`, or 0 when absent or not a number.
    fn metric(&self, id: &ItemId, path: &str) -> f64 {
        self.attribute(id, path)
            .as_ref()
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }
}

/// Walk a dotted path through nested objects.
pub fn value_at_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(root, |node, segment| node.get(segment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct OneItem(Value);

    impl ItemCatalog for OneItem {
        fn items(&self) -> Vec<ItemId> {
            vec![ItemId::from("film1")]
        }

        fn attribute(&self, _id: &ItemId, path: &str) -> Option<Value> {
            value_at_path(&self.0, path).cloned()
        }

        fn active_filter(&self) -> Option<&FilterDescriptor> {
            None
        }
    }

    #[test]
    fn dotted_paths_walk_objects() {
        let root = json!({ "film_info": { "box_office": 12.5, "title": "Her" } });
        assert_eq!(value_at_path(&root, "film_info.title"), Some(&json!("Her")));
        assert_eq!(value_at_path(&root, "film_info.missing"), None);
        assert_eq!(value_at_path(&root, "film_info.title.deeper"), None);
    }

    #[test]
    fn metric_defaults_to_zero() {
        let catalog = OneItem(json!({ "film_info": { "box_office": 300.0, "name": "x" } }));
        let id = ItemId::from("film1");
        assert_eq!(catalog.metric(&id, "film_info.box_office"), 300.0);
        assert_eq!(catalog.metric(&id, "film_info.name"), 0.0);
        assert_eq!(catalog.metric(&id, "film_info.absent"), 0.0);
    }

    #[test]
    fn descriptor_category() {
        let binary = FilterDescriptor::Binary {
            category: "gender".into(),
            value: "female".into(),
        };
        assert_eq!(binary.category(), "gender");
        let json = serde_json::to_value(&binary).unwrap_or_default();
        assert_eq!(json["kind"], "binary");
    }
}
