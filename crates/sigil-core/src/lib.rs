//! # sigil-core
//!
//! Foundational types shared across all Sigil crates:
//! - Type annotations as declared on constructor parameters, with a parser for
//!   the `typing` notation (`Optional[int]`, `Union[int, str]`, `int | None`)
//! - Class descriptors: the introspected constructor signature of one class
//! - The `Package` trait: a named class collection with an export list
//! - Catalogs: serialized collections of packages, loaded from JSON or TOML
//! - The startup registration plan (root node, bulk groups, single classes)
//! - Cross-cutting error types

pub mod annotation;
pub mod catalog;
pub mod class;
pub mod errors;
pub mod plan;

pub use annotation::Annotation;
pub use catalog::{Catalog, CatalogPackage};
pub use class::{ClassDescriptor, Package, Parameter};
pub use errors::CoreError;
pub use plan::{GroupRegistration, RegistrationPlan, RootNode, SingleRegistration};
