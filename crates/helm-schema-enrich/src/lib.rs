//! Enrich a JSON schema for Helm chart values with documented descriptions and defaults.
//!
//! Documented values are first collected into a [`ValueCommentIndex`], keyed by their dotted
//! key path. [`enrich_schema`] then walks the schema and updates every object node whose key
//! path, with `properties` segments elided, matches an indexed value.

mod enrich;
mod error;
mod index;
pub mod walk;

pub use enrich::enrich_schema;
pub use error::{Error, Result};
pub use index::{ValueCommentIndex, ValueRecord, decode_default, normalize_default_text};
pub use walk::{Visit, for_each_json_key, join_key_path};
