//! Option spec types: the declarative schema of one widget setting.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of input a widget setting uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    /// One value out of a fixed list of choices.
    Select,
    /// `"yes"` or empty.
    Checkbox,
    /// Free single-line text.
    Text,
    /// Numeric input, optionally clamped by `min`/`max` attributes.
    Number,
    /// A URL.
    Url,
    /// An attachment id picked from the media library.
    ImageUpload,
    /// Markup and sanitization provided entirely by extension hooks.
    Custom,
}

impl OptionType {
    /// Parses the type name used in option contributions.
    ///
    /// Both `"image_upload"` and `"image"` name the image type.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "select" => Some(OptionType::Select),
            "checkbox" => Some(OptionType::Checkbox),
            "text" => Some(OptionType::Text),
            "number" => Some(OptionType::Number),
            "url" => Some(OptionType::Url),
            "image_upload" | "image" => Some(OptionType::ImageUpload),
            "custom" => Some(OptionType::Custom),
            _ => None,
        }
    }

    /// Returns the canonical type name.
    pub fn as_str(self) -> &'static str {
        match self {
            OptionType::Select => "select",
            OptionType::Checkbox => "checkbox",
            OptionType::Text => "text",
            OptionType::Number => "number",
            OptionType::Url => "url",
            OptionType::ImageUpload => "image_upload",
            OptionType::Custom => "custom",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which widget types a setting applies to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppliesTo {
    /// Every widget type.
    #[default]
    All,
    /// Only widgets whose id base is in the set.
    Only(BTreeSet<String>),
}

impl AppliesTo {
    /// Returns true if widgets with this id base accept the setting.
    pub fn includes(&self, id_base: &str) -> bool {
        match self {
            AppliesTo::All => true,
            AppliesTo::Only(bases) => bases.contains(id_base),
        }
    }
}

/// One selectable value of a `select` setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Id base restriction as written in a contribution: one id, a list, or `"all"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdBase {
    One(String),
    Many(Vec<String>),
}

/// An option entry as contributed by the theme, an extension or a config file.
///
/// Every field except `key` may be missing. Contributions are coerced into
/// [`OptionSpec`] at the registry boundary; a missing or unknown `type`
/// degrades the entry to [`OptionType::Custom`] instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawOptionSpec {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setting: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub option_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_base: Option<IdBase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub input_attrs: BTreeMap<String, String>,
}

impl RawOptionSpec {
    /// Starts a contribution for the given key (also used as setting name).
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Sets the type name.
    pub fn kind(mut self, option_type: OptionType) -> Self {
        self.option_type = Some(option_type.as_str().to_string());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the label shown for the empty value.
    pub fn default_label(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn choice(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.choices.push(Choice::new(value, label));
        self
    }

    /// Restricts the setting to the given widget id bases.
    pub fn only_for<I, S>(mut self, bases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.id_base = Some(IdBase::Many(bases.into_iter().map(Into::into).collect()));
        self
    }

    pub fn input_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.input_attrs.insert(name.into(), value.into());
        self
    }
}

/// A validated widget setting schema entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    /// Registry key.
    pub key: String,
    /// Name under which the value is stored in a widget instance.
    pub setting: String,
    pub label: String,
    pub option_type: OptionType,
    /// Ordered `value -> label` choices (select only).
    pub choices: Vec<Choice>,
    pub applies_to: AppliesTo,
    /// Label of the empty value, or the fallback input value.
    pub default: Option<String>,
    pub description: Option<String>,
    pub input_attrs: BTreeMap<String, String>,
}

impl OptionSpec {
    /// Coerces a contribution into a spec.
    ///
    /// Returns `None` only for entries without a key, which cannot be stored.
    pub fn from_raw(raw: RawOptionSpec) -> Option<Self> {
        let key = raw.key.trim().to_string();
        if key.is_empty() {
            tracing::warn!("Ignoring widget option contribution without a key");
            return None;
        }

        let parsed = raw.option_type.as_deref().and_then(OptionType::parse);
        let (option_type, default) = match parsed {
            Some(t) => (t, raw.default),
            None => {
                tracing::warn!(
                    "Widget option '{}' has {} type; treating it as custom",
                    key,
                    match &raw.option_type {
                        Some(t) => format!("unknown '{}'", t),
                        None => "no".to_string(),
                    }
                );
                (OptionType::Custom, None)
            }
        };

        let applies_to = match raw.id_base {
            None => AppliesTo::All,
            Some(IdBase::One(base)) if base == "all" => AppliesTo::All,
            Some(IdBase::One(base)) => AppliesTo::Only(BTreeSet::from([base])),
            Some(IdBase::Many(bases)) => AppliesTo::Only(bases.into_iter().collect()),
        };

        Some(Self {
            setting: raw
                .setting
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| key.clone()),
            label: raw.label.unwrap_or_default(),
            key,
            option_type,
            choices: raw.choices,
            applies_to,
            default,
            description: raw.description.filter(|d| !d.is_empty()),
            input_attrs: raw.input_attrs,
        })
    }

    /// Returns true if the setting applies to widgets with this id base.
    pub fn applies_to_base(&self, id_base: &str) -> bool {
        self.applies_to.includes(id_base)
    }

    /// Returns true if `value` is one of the select choices.
    pub fn has_choice(&self, value: &str) -> bool {
        self.choices.iter().any(|c| c.value == value)
    }

    /// Parses a numeric input attribute such as `min`, `max` or `step`.
    pub fn numeric_attr(&self, name: &str) -> Option<f64> {
        self.input_attrs.get(name).and_then(|v| v.trim().parse().ok())
    }
}
