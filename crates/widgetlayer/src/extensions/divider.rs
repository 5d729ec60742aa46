//! The divider widget: vertical space with an optional horizontal line.

use crate::css::Scope;
use crate::hooks::Hooks;
use crate::registry::{OptionType, RawOptionSpec};
use crate::resolve::WidgetOccurrence;

use super::Extension;

pub const DIVIDER_ID_BASE: &str = "bayleaf_blank_widget";
pub const DIVIDER_HEIGHT: &str = "bayleaf_blank_widget_height";
pub const DIVIDER_HEIGHT_TABLET: &str = "bayleaf_blank_widget_height_tablet";
pub const DIVIDER_LINE: &str = "bayleaf_show_divider_line";

/// Theme line height in `rem`.
const LINE_HEIGHT: f64 = 1.75;

/// Height multiplier used when a height setting is stored empty or `0`.
const DEFAULT_LINES: &str = "2";

/// Adds the divider widget's settings, sizing rules and line classes.
#[derive(Debug, Default, Clone, Copy)]
pub struct Divider;

impl Divider {
    fn options() -> Vec<RawOptionSpec> {
        let height = |key: &str, label: &str| {
            let mut spec = RawOptionSpec::new(key)
                .kind(OptionType::Select)
                .label(label)
                .default_label("2 x Line-height")
                .only_for([DIVIDER_ID_BASE]);
            for lines in ["1", "3", "4", "5", "6"] {
                spec = spec.choice(lines, format!("{} x Line-height", lines));
            }
            spec
        };

        vec![
            height(DIVIDER_HEIGHT, "Height on desktop"),
            height(DIVIDER_HEIGHT_TABLET, "Height on Tablet"),
            RawOptionSpec::new(DIVIDER_LINE)
                .kind(OptionType::Select)
                .label("Horizontal divider line")
                .default_label("None")
                .choice("wide-width", "Wide Line")
                .choice("full-bleed", "Full bleed line")
                .only_for([DIVIDER_ID_BASE]),
        ]
    }
}

// `height:<n * line height>rem` for a stored multiplier of 1 to 6.
fn height_declaration(occurrence: &WidgetOccurrence, setting: &str) -> Option<String> {
    let stored = occurrence.instance.get_str(setting)?;
    let lines = if occurrence.instance.is_truthy(setting) {
        stored.as_str()
    } else {
        DEFAULT_LINES
    };
    let lines: u8 = lines.parse().ok().filter(|n| (1..=6).contains(n))?;
    Some(format!("height:{}rem", f64::from(lines) * LINE_HEIGHT))
}

impl Extension for Divider {
    fn register(&self, hooks: &mut Hooks) {
        hooks
            .on_options(|options| {
                let mut all = Divider::options();
                all.extend(options);
                all
            })
            .on_rules(|mut rules, occurrence| {
                if occurrence.id_base != DIVIDER_ID_BASE {
                    return rules;
                }
                rules
                    .push(Scope::Common, "margin-bottom:0")
                    .push(Scope::Common, "padding-top:0")
                    .push(Scope::Common, "padding-bottom:0");
                if let Some(height) = height_declaration(occurrence, DIVIDER_HEIGHT) {
                    rules.push(Scope::Desktop, height);
                }
                if let Some(height) = height_declaration(occurrence, DIVIDER_HEIGHT_TABLET) {
                    rules.push(Scope::TabletOnly, height);
                }
                rules
            })
            .on_classes(|mut classes, occurrence| {
                if occurrence.id_base == DIVIDER_ID_BASE {
                    match occurrence.instance.get_str(DIVIDER_LINE).as_deref() {
                        Some("wide-width") => classes.push("has-ww-line".to_string()),
                        Some("full-bleed") => classes.push("has-fb-line".to_string()),
                        _ => {}
                    }
                }
                classes
            });
    }
}
