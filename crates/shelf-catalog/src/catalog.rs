#![forbid(unsafe_code)]

//! JSON-backed film catalog.
//!
//! The document is `{"characters": [...]}`; each record describes the main
//! character of one film and carries its `film_info` (name, box office) and
//! `character_analysis` (the filterable attributes). One film is generated
//! per record, in document order.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shelf_layout::plan::{ScoredGroup, rank_groups};
use shelf_layout::{FilterDescriptor, GroupMap, ItemCatalog, ItemId, UNKNOWN_GROUP, value_at_path};
use tracing::{debug, warn};

use crate::categories::{self, Category, FILTER_CATEGORIES};
use crate::error::CatalogError;
use crate::film::{Film, FilmUpdate};

/// Path of the film name inside a record.
pub const FILM_NAME_PATH: &str = "film_info.film_name";
/// Optional cover path inside a record.
pub const FILM_IMAGE_PATH: &str = "film_info.image";
/// Default numeric attribute used for group aggregates.
pub const DEFAULT_METRIC_PATH: &str = "film_info.box_office";

/// Result of a binary filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryPartition {
    pub matching: Vec<ItemId>,
    pub non_matching: Vec<ItemId>,
}

/// The film that most often sits in the highest-earning group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub film: Film,
    /// Categories whose top group contained the film.
    pub top_group_count: usize,
    pub total_categories: usize,
}

impl Winner {
    pub fn stats_text(&self) -> String {
        format!(
            "was on the most earning shelf {} out of {} times",
            self.top_group_count, self.total_categories
        )
    }
}

#[derive(Debug, Clone)]
pub struct FilmCatalog {
    films: Vec<Film>,
    records: Vec<Value>,
    /// Lower-cased film name to the first record with that name.
    by_name: HashMap<String, usize>,
    /// Film id to its position in `films`.
    index: HashMap<ItemId, usize>,
    active: Option<FilterDescriptor>,
    metric_path: String,
}

impl FilmCatalog {
    /// Parse a catalog document.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let root: Value = serde_json::from_str(json)?;
        Self::from_value(root)
    }

    /// Read and parse a catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn from_value(mut root: Value) -> Result<Self, CatalogError> {
        let records = match root.get_mut("characters").map(Value::take) {
            Some(Value::Array(records)) => records,
            _ => {
                return Err(CatalogError::MissingField {
                    record: None,
                    field: "characters",
                });
            }
        };

        let mut films = Vec::with_capacity(records.len());
        let mut by_name = HashMap::new();
        let mut index = HashMap::new();
        for (i, record) in records.iter().enumerate() {
            let name = value_at_path(record, FILM_NAME_PATH)
                .and_then(Value::as_str)
                .ok_or(CatalogError::MissingField {
                    record: Some(i),
                    field: FILM_NAME_PATH,
                })?;
            let image = value_at_path(record, FILM_IMAGE_PATH).and_then(Value::as_str);
            match by_name.entry(name.to_lowercase()) {
                Entry::Occupied(_) => {
                    warn!(film = name, "duplicate film name, attributes come from the first record");
                }
                Entry::Vacant(slot) => {
                    slot.insert(i);
                }
            }
            let film = Film::from_record(i, name, image);
            index.insert(film.id.clone(), films.len());
            films.push(film);
        }

        debug!(films = films.len(), "film catalog loaded");
        Ok(Self {
            films,
            records,
            by_name,
            index,
            active: None,
            metric_path: DEFAULT_METRIC_PATH.to_string(),
        })
    }

    /// Use a different numeric attribute for [`ItemCatalog::metric`] and
    /// [`Self::winner`].
    #[must_use]
    pub fn with_metric_path(mut self, path: impl Into<String>) -> Self {
        self.metric_path = path.into();
        self
    }

    pub fn metric_path(&self) -> &str {
        &self.metric_path
    }

    pub fn len(&self) -> usize {
        self.films.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }

    pub fn film(&self, id: &ItemId) -> Option<&Film> {
        self.index.get(id).map(|&i| &self.films[i])
    }

    /// Every film, in load order.
    pub fn films(&self) -> &[Film] {
        &self.films
    }

    /// The record for a film name, compared case-insensitively.
    pub fn character_data(&self, film_name: &str) -> Option<&Value> {
        self.by_name
            .get(&film_name.to_lowercase())
            .map(|&i| &self.records[i])
    }

    /// The fixed category table.
    pub fn filter_categories(&self) -> &'static [Category] {
        FILTER_CATEGORIES
    }

    /// Split films on whether the attribute at `category` equals `value`.
    ///
    /// Films without a record, or whose attribute is not the string `value`,
    /// are non-matching.
    pub fn filter(&mut self, category: &str, value: &str) -> BinaryPartition {
        let path = categories::attribute_path(category);
        let mut partition = BinaryPartition::default();
        for film in &self.films {
            let matches = self
                .character_data(&film.name)
                .and_then(|record| value_at_path(record, &path))
                .and_then(Value::as_str)
                .is_some_and(|v| v == value);
            if matches {
                partition.matching.push(film.id.clone());
            } else {
                partition.non_matching.push(film.id.clone());
            }
        }
        debug!(
            category,
            value,
            matching = partition.matching.len(),
            "films filtered"
        );
        self.active = Some(FilterDescriptor::Binary {
            category: category.to_string(),
            value: value.to_string(),
        });
        partition
    }

    /// Group films by their value at `category`, in first-encountered order.
    pub fn group_by_category(&mut self, category: &str) -> GroupMap {
        let groups = self.groups_for(category);
        debug!(category, groups = groups.len(), "films grouped");
        self.active = Some(FilterDescriptor::Grouped {
            category: category.to_string(),
            groups: groups.clone(),
        });
        groups
    }

    pub fn clear_filter(&mut self) {
        self.active = None;
    }

    /// Apply `update` to a film. Returns false for an unknown id.
    pub fn update_film(&mut self, id: &ItemId, update: FilmUpdate) -> bool {
        let Some(&i) = self.index.get(id) else {
            return false;
        };
        let film = &mut self.films[i];
        if let Some(text) = update.text.filter(|t| !t.is_empty()) {
            film.text = text;
        }
        if let Some(image) = update.image {
            film.image = image;
        }
        true
    }

    /// For every category, find the group with the largest summed metric and
    /// count each film's appearances in those groups. The first film to reach
    /// the highest count wins.
    pub fn winner(&self) -> Option<Winner> {
        let mut counts: IndexMap<ItemId, usize> = IndexMap::new();
        for category in FILTER_CATEGORIES {
            let scored = self
                .groups_for(category.path)
                .into_iter()
                .map(|(key, items)| ScoredGroup::new(key, items, |id| self.metric(id, &self.metric_path)))
                .collect();
            if let Some(top) = rank_groups(scored).into_iter().next() {
                for id in top.items {
                    *counts.entry(id).or_default() += 1;
                }
            }
        }

        let mut best: Option<(&ItemId, usize)> = None;
        for (id, &count) in &counts {
            if best.is_none_or(|(_, max)| count > max) {
                best = Some((id, count));
            }
        }
        let (id, top_group_count) = best?;
        let film = self.film(id)?.clone();
        debug!(film = %film.id, top_group_count, "winner found");
        Some(Winner {
            film,
            top_group_count,
            total_categories: FILTER_CATEGORIES.len(),
        })
    }

    fn groups_for(&self, category: &str) -> GroupMap {
        let path = categories::attribute_path(category);
        let mut groups = GroupMap::new();
        for film in &self.films {
            let key = self
                .character_data(&film.name)
                .and_then(|record| value_at_path(record, &path))
                .and_then(group_key)
                .unwrap_or_else(|| UNKNOWN_GROUP.to_string());
            groups.entry(key).or_default().push(film.id.clone());
        }
        groups
    }
}

/// Key for an attribute value; empty, zero, false and null have none.
fn group_key(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

impl ItemCatalog for FilmCatalog {
    fn items(&self) -> Vec<ItemId> {
        self.films.iter().map(|f| f.id.clone()).collect()
    }

    fn attribute(&self, id: &ItemId, path: &str) -> Option<Value> {
        let film = self.film(id)?;
        let record = self.character_data(&film.name)?;
        value_at_path(record, path).cloned()
    }

    fn active_filter(&self) -> Option<&FilterDescriptor> {
        self.active.as_ref()
    }
}
