//! Serializable views handed to templates and the JSON API.

pub mod categories;
pub mod gallery;
