//! Settings registry: the catalog of customizable widget settings.
//!
//! This module provides:
//!
//! - [`RawOptionSpec`]: an option contribution, tolerant of missing fields
//! - [`OptionSpec`]: a validated schema entry
//! - [`OptionSpecs`]: the ordered catalog keyed by setting name
//! - [`SettingsRegistry`]: builds the catalog once per request
//!
//! Contributions pass through the options hook chain and are validated at
//! this boundary, so downstream code only ever sees well-formed specs.

pub mod builtin;
#[allow(clippy::module_inception)]
mod registry;
mod spec;

pub use registry::{OptionSpecs, SettingsRegistry};
pub use spec::{AppliesTo, Choice, IdBase, OptionSpec, OptionType, RawOptionSpec};
