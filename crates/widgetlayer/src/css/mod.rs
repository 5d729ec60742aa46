//! CSS generation: rule compilation, stylesheet assembly and minification.
//!
//! This module provides:
//!
//! - [`Scope`] and [`Breakpoints`]: the responsive buckets and their media queries
//! - [`RuleSet`] and [`compile_rules`]: one widget's settings to scoped rules
//! - [`StyleAggregate`] and [`assemble`]: many widgets to one stylesheet
//! - [`prepare_css`]: the sanitize and minify pass
//!
//! The output of [`compile_rules`] is already `selector{declarations}`
//! strings; assembly only concatenates and wraps media queries.

mod assemble;
mod prepare;
mod rules;
mod scope;

pub use assemble::{assemble, StyleAggregate};
pub use prepare::{minify, prepare_css, MINIFY_REPLACEMENTS};
pub use rules::{
    build_rule_set, compile_rules, default_order, pushed_down_order, widget_selector,
    BucketTarget, CompiledRules, RuleSet,
};
pub use scope::{Breakpoints, Scope};
