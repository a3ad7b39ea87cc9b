#![forbid(unsafe_code)]

//! Film catalog for the bookshelf layout engine.
//!
//! [`FilmCatalog`] loads the character analysis document and turns category
//! filters into the partitions [`shelf_layout::LayoutEngine`] lays out:
//!
//! - [`FilmCatalog::filter`] gives a [`BinaryPartition`] for
//!   `apply_binary_partition`
//! - [`FilmCatalog::group_by_category`] gives a [`GroupMap`] for
//!   `apply_group_partition`
//! - [`resolve_command`] maps remote command ids onto those calls

pub mod catalog;
pub mod categories;
pub mod command;
pub mod error;
pub mod film;

pub use catalog::{BinaryPartition, DEFAULT_METRIC_PATH, FilmCatalog, Winner};
pub use categories::{Category, FILTER_CATEGORIES, PRIORITY_ORDER};
pub use command::{Command, RESET_COMMAND, command_id, command_list, resolve_command};
pub use error::CatalogError;
pub use film::{Film, FilmUpdate};
pub use shelf_layout::{FilterDescriptor, GroupMap, ItemCatalog, ItemId};
