#![forbid(unsafe_code)]

//! A film box as the catalog exposes it.

use serde::{Deserialize, Serialize};
use shelf_layout::ItemId;

/// Cover used when no image is known for a film.
pub const DEFAULT_IMAGE: &str = "/cofanetto/default.jpg";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    pub id: ItemId,
    /// Name as it appears in the record's `film_info.film_name`.
    pub name: String,
    /// Text printed on the box spine.
    pub text: String,
    pub image: String,
}

impl Film {
    pub(crate) fn from_record(index: usize, name: &str, image: Option<&str>) -> Self {
        Self {
            id: film_id(index),
            name: name.to_string(),
            text: spine_text(name),
            image: image.unwrap_or(DEFAULT_IMAGE).to_string(),
        }
    }
}

/// Changes applied by [`crate::FilmCatalog::update_film`].
///
/// An empty `text` is ignored; any `image`, even empty, replaces the cover.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmUpdate {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// `film1`, `film2`, ... for records in load order.
pub fn film_id(index: usize) -> ItemId {
    ItemId::new(format!("film{}", index + 1))
}

/// Upper-cased name with everything but ASCII letters and digits removed.
pub fn spine_text(name: &str) -> String {
    name.to_uppercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}
