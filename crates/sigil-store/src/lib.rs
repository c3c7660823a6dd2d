//! # sigil-store
//!
//! Registry of config schemas keyed by `(group, name)`, and the registrar that
//! fills it.
//!
//! This crate provides:
//! - [`ConfigStore`]: append-only map from [`ConfigKey`] to synthesized schemas
//! - [`register`] / [`register_one`]: bulk and single-class registration
//! - [`apply_plan`]: the startup sequence (root node, groups, singles)
//! - [`install`] / [`installed`]: publish a populated store process-wide
//!
//! ## Lifecycle
//!
//! A store is built as an owned value during startup, with no locking, then
//! handed to [`install`]. After that it is read-only for the rest of the
//! process.

mod bootstrap;
mod error;
mod global;
mod registrar;
mod store;

pub use bootstrap::{PlanSummary, apply_plan, root_schema};
pub use error::RegistryError;
pub use global::{install, installed};
pub use registrar::{register, register_one};
pub use store::{ConfigKey, ConfigStore};
