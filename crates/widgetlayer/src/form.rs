//! Settings form markup.
//!
//! The form section is rendered with MiniJinja. The template is registered
//! under an `.html` name so every interpolated value is HTML-escaped; only the
//! markup returned by custom form hooks is inserted verbatim.

use minijinja::Environment;
use serde::Serialize;

use crate::error::Result;
use crate::escape::{absint, esc_url_raw};
use crate::hooks::{CustomField, Hooks};
use crate::instance::Instance;
use crate::media::MediaLibrary;
use crate::registry::{OptionSpec, OptionSpecs, OptionType};

const TEMPLATE_NAME: &str = "settings_form.html";

const TEMPLATE: &str = r#"{% macro description(field) %}
{% if field.description %}<span class="{{ field.setting }}-desc wid-setting-desc">{{ field.description }}</span>{% endif %}
{% endmacro %}
<div class="widget-options-section">
<h4 class="widget-options-title">{{ title }}</h4>
<div class="widget-options-content">
{% for field in fields %}
{% if field.kind == "checkbox" %}
<p class="{{ field.setting }} widget-small-text">
<input name="{{ field.name }}" id="{{ field.id }}" type="checkbox" value="yes"{% if field.checked %} checked="checked"{% endif %} />
<label for="{{ field.id }}">{{ field.label }}</label>
{{ description(field) }}
</p>
{% else %}
<p class="{{ field.setting }} widget-setting">
<label for="{{ field.id }}">{{ field.label }}{% if field.kind != "image_upload" and field.kind != "custom" %}: {% endif %}</label>
{{ description(field) }}
{% if field.kind == "select" %}
<select name="{{ field.name }}" id="{{ field.id }}">
<option value="">{{ field.default }}</option>
{% for choice in field.choices %}
<option value="{{ choice.value }}"{% if choice.selected %} selected="selected"{% endif %}>{{ choice.label }}</option>
{% endfor %}
</select>
{% elif field.kind == "image_upload" %}
<a class="bayleaf-widget-img-uploader{% if field.image_url %} has-image{% endif %}">
{%- if field.image_url %}<img class="custom-widget-thumbnail" src="{{ field.image_url }}">{% else %}Set Featured Image{% endif -%}
</a>
<span class="bayleaf-widget-img-instruct{% if not field.image_url %} bayleaf-hidden{% endif %}">Click the image to edit/update</span>
<a class="bayleaf-widget-img-remover{% if not field.image_url %} bayleaf-hidden{% endif %}">Remove Featured Image</a>
<input class="bayleaf-widget-img-id" name="{{ field.name }}" id="{{ field.id }}" value="{{ field.value }}" type="hidden" />
{% elif field.kind == "custom" %}
{{ field.markup|safe }}
{% else %}
<input name="{{ field.name }}" id="{{ field.id }}" type="{{ field.kind }}"
{%- for attr in field.attrs %} {{ attr.name }}="{{ attr.value }}"{% endfor %}
{%- if field.value is not none %} value="{{ field.value }}"{% endif %} />
{% endif %}
</p>
{% endif %}
{% endfor %}
</div>
</div>
"#;

/// Heading of the settings section.
pub const FORM_TITLE: &str = "Theme specific styling options";

/// The widget whose form is being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormTarget {
    pub id_base: String,
    pub number: u64,
}

impl FormTarget {
    pub fn new(id_base: impl Into<String>, number: u64) -> Self {
        Self {
            id_base: id_base.into(),
            number,
        }
    }

    /// `id` attribute of a setting's form field.
    pub fn field_id(&self, setting: &str) -> String {
        format!("widget-{}-{}-{}", self.id_base, self.number, setting)
    }

    /// `name` attribute of a setting's form field.
    pub fn field_name(&self, setting: &str) -> String {
        format!("widget-{}[{}][{}]", self.id_base, self.number, setting)
    }
}

#[derive(Serialize)]
struct FormContext<'a> {
    title: &'a str,
    fields: Vec<FormField>,
}

#[derive(Serialize)]
struct FormField {
    kind: &'static str,
    setting: String,
    id: String,
    name: String,
    label: String,
    description: Option<String>,
    default: String,
    value: Option<String>,
    checked: bool,
    choices: Vec<FormChoice>,
    attrs: Vec<FormAttr>,
    image_url: Option<String>,
    markup: String,
}

#[derive(Serialize)]
struct FormChoice {
    value: String,
    label: String,
    selected: bool,
}

#[derive(Serialize)]
struct FormAttr {
    name: String,
    value: String,
}

/// Renders the settings form section of a widget.
///
/// Holds a compiled template; build one and reuse it across forms.
pub struct FormRenderer {
    env: Environment<'static>,
}

impl std::fmt::Debug for FormRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormRenderer").finish_non_exhaustive()
    }
}

impl FormRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_template(TEMPLATE_NAME, TEMPLATE)?;
        Ok(Self { env })
    }

    /// Renders the section for every setting applicable to the target.
    ///
    /// Returns an empty string when no setting applies.
    pub fn render(
        &self,
        specs: &OptionSpecs,
        target: &FormTarget,
        instance: &Instance,
        hooks: &Hooks,
        media: &dyn MediaLibrary,
    ) -> Result<String> {
        let fields: Vec<FormField> = specs
            .applicable(&target.id_base)
            .map(|spec| build_field(spec, target, instance, hooks, media))
            .collect();
        if fields.is_empty() {
            return Ok(String::new());
        }

        let template = self.env.get_template(TEMPLATE_NAME)?;
        let context = FormContext {
            title: FORM_TITLE,
            fields,
        };
        Ok(template.render(&context)?)
    }
}

/// Renders a widget's settings form section with a one-off renderer.
pub fn render_settings_form(
    specs: &OptionSpecs,
    target: &FormTarget,
    instance: &Instance,
    hooks: &Hooks,
    media: &dyn MediaLibrary,
) -> Result<String> {
    FormRenderer::new()?.render(specs, target, instance, hooks, media)
}

fn build_field(
    spec: &OptionSpec,
    target: &FormTarget,
    instance: &Instance,
    hooks: &Hooks,
    media: &dyn MediaLibrary,
) -> FormField {
    let stored = instance.get_str(&spec.setting).unwrap_or_default();
    let id = target.field_id(&spec.setting);
    let name = target.field_name(&spec.setting);
    let default = spec.default.clone().unwrap_or_default();

    let mut field = FormField {
        kind: spec.option_type.as_str(),
        setting: spec.setting.clone(),
        id,
        name,
        label: spec.label.clone(),
        description: spec.description.clone(),
        default: default.clone(),
        value: None,
        checked: false,
        choices: Vec::new(),
        attrs: Vec::new(),
        image_url: None,
        markup: String::new(),
    };

    match spec.option_type {
        OptionType::Select => {
            field.choices = spec
                .choices
                .iter()
                .map(|c| FormChoice {
                    value: c.value.clone(),
                    label: c.label.clone(),
                    selected: c.value == stored,
                })
                .collect();
        }
        OptionType::Checkbox => field.checked = stored == "yes",
        OptionType::ImageUpload => {
            let attachment = absint(&stored);
            field.image_url = (attachment > 0)
                .then(|| media.image_url(attachment))
                .flatten()
                .map(|url| esc_url_raw(&url))
                .filter(|url| !url.is_empty());
            field.value = Some(attachment.to_string());
        }
        OptionType::Custom => {
            field.markup = hooks.apply_custom_form(&CustomField {
                setting: &spec.setting,
                id: &field.id,
                name: &field.name,
                value: &stored,
            });
        }
        OptionType::Text | OptionType::Number | OptionType::Url => {
            field.attrs = spec
                .input_attrs
                .iter()
                .map(|(name, value)| FormAttr {
                    name: name.clone(),
                    value: value.clone(),
                })
                .collect();
            if !spec.input_attrs.contains_key("value") {
                field.value = Some(if stored.is_empty() { default } else { stored });
            }
        }
    }

    field
}
