//! Read-only access to persisted widget placement and settings.
//!
//! The host platform owns widget storage. This crate reads it through the
//! [`WidgetStore`] trait and never writes to it. [`Snapshot`] is an in-memory
//! implementation that can be deserialized from YAML or JSON, which is what
//! tests and offline tooling use.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::load_file;
use crate::error::Result;
use crate::instance::Instance;

/// How a widget id is registered with the host platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredWidget {
    /// Widget type identifier, e.g. `"text"`.
    pub id_base: String,
    /// Instance number encoded in the id, if any.
    pub number: Option<u64>,
}

/// Read-only widget storage.
pub trait WidgetStore {
    /// Widget ids stored in an area, in stored order.
    fn area_widgets(&self, area: &str) -> Option<&[String]>;

    /// Registration of a widget id, or `None` if it is no longer registered.
    fn registered(&self, widget_id: &str) -> Option<RegisteredWidget>;

    /// All stored instances of a widget type, keyed by instance number.
    fn instances(&self, id_base: &str) -> Option<&BTreeMap<u64, Instance>>;
}

/// Splits a widget id such as `"text-3"` into its id base and instance number.
///
/// # Example
///
/// ```rust
/// use widgetlayer::parse_widget_id;
///
/// assert_eq!(parse_widget_id("text-3"), Some(("text", 3)));
/// assert_eq!(parse_widget_id("mc4wp_form_widget-12"), Some(("mc4wp_form_widget", 12)));
/// assert_eq!(parse_widget_id("search"), None);
/// ```
pub fn parse_widget_id(widget_id: &str) -> Option<(&str, u64)> {
    let (base, number) = widget_id.rsplit_once('-')?;
    if base.is_empty() {
        return None;
    }
    Some((base, number.parse().ok()?))
}

/// In-memory widget storage.
///
/// ```yaml
/// sidebars:
///   home-widgetlayer-1: [text-2, bayleaf_blank_widget-1]
/// widgets:
///   text:
///     2: { title: Welcome, bayleaf_width: "6" }
///   bayleaf_blank_widget:
///     1: { bayleaf_blank_widget_height: "3" }
/// ```
///
/// A widget id is registered when its id base has an entry under `widgets`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Area id to ordered widget ids.
    #[serde(default)]
    pub sidebars: BTreeMap<String, Vec<String>>,
    /// Id base to instances keyed by number.
    #[serde(default)]
    pub widgets: BTreeMap<String, BTreeMap<u64, Instance>>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a snapshot from YAML.
    pub fn from_yaml(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Parses a snapshot from JSON.
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Loads a snapshot from a `.yaml`, `.yml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_file(path.as_ref())
    }

    /// Appends a widget id to an area.
    pub fn place(mut self, area: impl Into<String>, widget_id: impl Into<String>) -> Self {
        self.sidebars
            .entry(area.into())
            .or_default()
            .push(widget_id.into());
        self
    }

    /// Stores an instance of a widget type, registering the type.
    pub fn store(mut self, id_base: impl Into<String>, number: u64, instance: Instance) -> Self {
        self.widgets
            .entry(id_base.into())
            .or_default()
            .insert(number, instance);
        self
    }

    /// Registers a widget type without storing instances.
    pub fn register(mut self, id_base: impl Into<String>) -> Self {
        self.widgets.entry(id_base.into()).or_default();
        self
    }
}

impl WidgetStore for Snapshot {
    fn area_widgets(&self, area: &str) -> Option<&[String]> {
        self.sidebars.get(area).map(|ids| ids.as_slice())
    }

    fn registered(&self, widget_id: &str) -> Option<RegisteredWidget> {
        if let Some((base, number)) = parse_widget_id(widget_id) {
            if self.widgets.contains_key(base) {
                return Some(RegisteredWidget {
                    id_base: base.to_string(),
                    number: Some(number),
                });
            }
        }
        self.widgets
            .contains_key(widget_id)
            .then(|| RegisteredWidget {
                id_base: widget_id.to_string(),
                number: None,
            })
    }

    fn instances(&self, id_base: &str) -> Option<&BTreeMap<u64, Instance>> {
        self.widgets.get(id_base)
    }
}
