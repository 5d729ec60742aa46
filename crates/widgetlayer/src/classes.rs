//! Class compiler: widget settings to HTML class tokens.

use crate::escape::esc_attr;
use crate::hooks::Hooks;
use crate::registry::builtin::{TEXT_WIDGET_TITLE, WIDTH, WIDTH_TABLET};
use crate::registry::OptionSpecs;
use crate::resolve::WidgetOccurrence;

/// Setting that holds a featured image attachment id.
pub const FEATURED_IMAGE: &str = "bayleaf_widget_featured_image";

/// Classes given to widgets without any recognized setting.
pub const FULL_WIDTH_FALLBACK: [&str; 2] = ["fw-tabr-12", "fw-tab-12"];

/// Compiles the class tokens of one widget.
///
/// Tokens are attribute-escaped and deduplicated, keeping the first
/// occurrence of each. The first token is always `brick-<position>`.
///
/// # Example
///
/// ```rust
/// use widgetlayer::{compile_classes, Hooks, Instance, OptionSpecs, WidgetOccurrence};
/// use widgetlayer::registry::builtin::base_options;
///
/// let specs = OptionSpecs::from_raw(base_options());
/// let occurrence = WidgetOccurrence::new(
///     "text-2",
///     "home-widgetlayer-1",
///     0,
///     "text",
///     Instance::new().with("bayleaf_width", "6").with("bayleaf_width_tablet", ""),
/// );
///
/// let classes = compile_classes(&occurrence, &specs, &Hooks::new());
/// assert_eq!(classes, vec!["brick-0", "fw-tabr-6", "fw-tab-6"]);
/// ```
pub fn compile_classes(
    occurrence: &WidgetOccurrence,
    specs: &OptionSpecs,
    hooks: &Hooks,
) -> Vec<String> {
    let instance = &occurrence.instance;
    let mut classes = vec![format!("brick-{}", occurrence.position)];

    let recognized = specs.recognized(instance, &occurrence.id_base);
    if recognized.is_empty() {
        classes.extend(FULL_WIDTH_FALLBACK.iter().map(|c| c.to_string()));
    }

    for spec in recognized {
        let value = instance.get_str(&spec.setting).unwrap_or_default();
        match spec.setting.as_str() {
            WIDTH => {
                let col = if value.is_empty() { "12" } else { value.as_str() };
                classes.push(format!("fw-tabr-{}", col));
                if !instance.is_nonempty(WIDTH_TABLET) {
                    classes.push(format!("fw-tab-{}", col));
                }
            }
            WIDTH_TABLET => {
                if !value.is_empty() {
                    classes.push(format!("fw-tab-{}", value));
                }
            }
            TEXT_WIDGET_TITLE => match value.as_str() {
                "large" => classes.push("lg-title".to_string()),
                "small" => classes.push("sm-title".to_string()),
                _ => {}
            },
            FEATURED_IMAGE => {
                if instance.is_truthy(FEATURED_IMAGE) {
                    classes.push("has-featured-img".to_string());
                    classes.push("widescreen".to_string());
                }
            }
            _ => {}
        }
    }

    if occurrence.id_base == "text" && instance.contains("text") && !instance.is_truthy("text") {
        classes.push("only-title".to_string());
    }

    let classes = hooks.apply_classes(classes, occurrence);
    dedup_tokens(classes.iter().map(|c| esc_attr(c)))
}

// Drops empty and repeated tokens, keeping first-occurrence order.
fn dedup_tokens(tokens: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for token in tokens {
        if !token.is_empty() && !out.contains(&token) {
            out.push(token);
        }
    }
    out
}
