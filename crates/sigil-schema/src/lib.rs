//! # sigil-schema
//!
//! Converts class constructor signatures into config schemas.
//!
//! This crate provides:
//! - [`synthesize`]: the signature-to-schema conversion (type narrowing,
//!   default handling, and the `_target_` provenance field)
//! - [`Schema`]: an immutable, ordered list of [`FieldSpec`]s
//! - [`ConfigNode`]: an instance of a schema, with required-field and
//!   unknown-field checks at construction time
//!
//! ## Architecture
//!
//! Class descriptors are defined in `sigil-core`. This crate turns them into
//! schemas; `sigil-store` publishes those schemas under `(group, name)` keys.

mod error;
mod field;
mod node;
mod schema;
mod synthesize;

pub use error::SchemaError;
pub use field::{FieldDefault, FieldSpec, FieldType};
pub use node::ConfigNode;
pub use schema::{Schema, SchemaBuilder, TARGET_FIELD};
pub use synthesize::{SKIPPED_PARAMETERS, describe, narrow, synthesize};
