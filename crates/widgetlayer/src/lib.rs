//! # widgetlayer - widget settings compiled into responsive CSS and classes
//!
//! Page layouts built from widget areas let every widget carry a few
//! declarative styling settings: width per breakpoint, vertical and text
//! alignment, hiding on mobile, reordering. This crate turns those settings
//! into one minified stylesheet and a set of HTML class tokens per widget.
//!
//! ## Pipeline
//!
//! 1. [`SettingsRegistry`](registry::SettingsRegistry): the catalog of known
//!    settings, extensible through [`Hooks`] and configuration
//! 2. [`resolve`]: widgets placed in the tracked areas, in canonical order
//! 3. [`compile_rules`]: one widget's settings to scoped CSS rules
//! 4. [`assemble`]: all widgets merged into a single stylesheet
//! 5. [`compile_classes`]: one widget's settings to class tokens
//!
//! [`WidgetLayer`] wires these together over a [`WidgetStore`].
//!
//! ## Quick start
//!
//! ```rust
//! use widgetlayer::{Instance, LayerConfig, RenderContext, Snapshot, WidgetLayer};
//!
//! let store = Snapshot::new()
//!     .place("home-widgetlayer-1", "text-2")
//!     .store(
//!         "text",
//!         2,
//!         Instance::new()
//!             .with("bayleaf_vert_align", "middle")
//!             .with("bayleaf_text_align", "center"),
//!     );
//!
//! let layer = WidgetLayer::new(LayerConfig::default(), store).with_builtin_extensions();
//! let css = layer.aggregated_stylesheet(&RenderContext::page());
//! assert_eq!(
//!     css,
//!     ".brick .text-2{order:0;text-align:center}\
//!      @media (min-width:768px){.brick .text-2{display:flex;flex-direction:column;justify-content:center}}"
//! );
//! ```
//!
//! ## Scopes
//!
//! Rules are bucketed into five [`Scope`]s, emitted in this order:
//!
//! | Scope | Media query |
//! |-------|-------------|
//! | common | none |
//! | mobile_only | `(max-width: 767px)` |
//! | tablet | `(min-width: 768px)` |
//! | tablet_only | `(min-width: 768px) and (max-width: 1024px)` |
//! | desktop | `(min-width: 1025px)` |
//!
//! The pixel values come from [`Breakpoints`] and can be configured.

pub mod classes;
pub mod config;
pub mod css;
pub mod error;
pub mod escape;
pub mod extensions;
pub mod form;
pub mod hooks;
pub mod instance;
pub mod layer;
pub mod media;
pub mod registry;
pub mod resolve;
pub mod store;
pub mod update;

pub use classes::{compile_classes, FEATURED_IMAGE, FULL_WIDTH_FALLBACK};
pub use config::{LayerConfig, DEFAULT_AREAS, DEFAULT_CONTAINER_CLASS};
pub use css::{
    assemble, build_rule_set, compile_rules, default_order, minify, prepare_css,
    pushed_down_order, widget_selector, BucketTarget, Breakpoints, CompiledRules, RuleSet,
    Scope, StyleAggregate,
};
pub use error::{Error, Result};
pub use extensions::{Divider, Extension, FeaturedImage, PostsGrid};
pub use form::{render_settings_form, FormRenderer, FormTarget};
pub use hooks::{CustomField, Hooks};
pub use instance::Instance;
pub use layer::{RenderContext, WidgetLayer, WidgetParams};
pub use media::{MediaLibrary, NoMedia};
pub use registry::{OptionSpec, OptionSpecs, OptionType, RawOptionSpec, SettingsRegistry};
pub use resolve::{find_occurrence, resolve, resolve_area, WidgetOccurrence};
pub use store::{parse_widget_id, RegisteredWidget, Snapshot, WidgetStore};
pub use update::sanitize_instance;
