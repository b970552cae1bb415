//! Well-known keys of the data tree shared between steps.
//!
//! The tree itself is schema-less; these are the names the shipped steps agree on.

/// Top-level mapping of section key to section
pub const SECTIONS: &str = "sections";

/// Per-section fields
pub const TITLE: &str = "title";
pub const DESCRIPTION: &str = "description";
pub const CARDS: &str = "cards";

/// Per-card fields
pub const POKEMON: &str = "pokemon";
pub const ID: &str = "id";
pub const SET: &str = "set";
pub const NUMBER: &str = "number";
/// Species names by language, filled by `fetch_pokemon`
pub const NAMES: &str = "names";
/// TCG card records by language, filled by `enrich_tcg`
pub const TCG: &str = "tcg";
/// Localized display name, filled by `transform_sections`
pub const NAME: &str = "name";
pub const IMAGE: &str = "image";
pub const IMAGE_PATH: &str = "image_path";
