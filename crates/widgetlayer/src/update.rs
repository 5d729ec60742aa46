//! Sanitization of submitted widget settings.
//!
//! When a widget form is saved, every applicable setting is re-read from the
//! submitted values and sanitized according to its type:
//!
//! | Type | Stored value |
//! |------|--------------|
//! | select | the submitted value if it is a choice, else empty |
//! | checkbox | `"yes"` or empty |
//! | text | markup and line breaks stripped, trimmed |
//! | url | sanitized URL, empty for unsafe schemes |
//! | number | clamped to `min`/`max`; float if `step` is fractional, else unsigned int |
//! | image upload | the new attachment id if the media library knows it, else the old value |
//! | custom | output of the custom update hook chain |
//!
//! Settings outside the registry are carried over from the old instance.

use serde_json::Value;

use crate::escape::{absint, esc_url_raw, sanitize_text_field};
use crate::hooks::Hooks;
use crate::instance::Instance;
use crate::media::MediaLibrary;
use crate::registry::{OptionSpec, OptionSpecs, OptionType};

/// Merges submitted settings into a widget's stored instance.
pub fn sanitize_instance(
    specs: &OptionSpecs,
    id_base: &str,
    old: &Instance,
    submitted: &Instance,
    hooks: &Hooks,
    media: &dyn MediaLibrary,
) -> Instance {
    let mut instance = old.clone();
    for spec in specs.applicable(id_base) {
        let value = sanitize_value(spec, old, submitted, hooks, media);
        instance.insert(spec.setting.clone(), value);
    }
    instance
}

fn sanitize_value(
    spec: &OptionSpec,
    old: &Instance,
    submitted: &Instance,
    hooks: &Hooks,
    media: &dyn MediaLibrary,
) -> Value {
    let new = submitted.get_str(&spec.setting).unwrap_or_default();
    match spec.option_type {
        OptionType::Select => {
            if spec.has_choice(&new) {
                Value::from(new)
            } else {
                Value::from("")
            }
        }
        OptionType::Checkbox => Value::from(if new == "yes" { "yes" } else { "" }),
        OptionType::Text => Value::from(sanitize_text_field(&new)),
        OptionType::Url => Value::from(esc_url_raw(&new)),
        OptionType::Number => sanitize_number(spec, &new),
        OptionType::ImageUpload => {
            let id = absint(&new);
            if id > 0 && media.image_url(id).is_some() {
                Value::from(id)
            } else {
                old.get(&spec.setting)
                    .cloned()
                    .unwrap_or_else(|| Value::from(""))
            }
        }
        OptionType::Custom => Value::from(hooks.apply_custom_update(&spec.setting, submitted)),
    }
}

fn sanitize_number(spec: &OptionSpec, raw: &str) -> Value {
    let raw = raw.trim();
    if raw.is_empty() {
        return Value::from("");
    }

    let mut number: f64 = raw
        .parse()
        .ok()
        .filter(|n: &f64| n.is_finite())
        .unwrap_or_else(|| absint(raw) as f64);
    if let Some(max) = spec.numeric_attr("max") {
        number = number.min(max);
    }
    if let Some(min) = spec.numeric_attr("min") {
        number = number.max(min);
    }

    let fractional_step = spec.numeric_attr("step").is_some_and(|s| s.fract() != 0.0);
    if fractional_step {
        Value::from(number.abs())
    } else {
        Value::from(number.abs().trunc() as u64)
    }
}
