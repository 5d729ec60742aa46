//! The theme's own widget settings.

use super::spec::{OptionType, RawOptionSpec};

pub const TEXT_WIDGET_TITLE: &str = "bayleaf_text_widget_title";
pub const WIDTH: &str = "bayleaf_width";
pub const WIDTH_TABLET: &str = "bayleaf_width_tablet";
pub const VERT_ALIGN: &str = "bayleaf_vert_align";
pub const TEXT_ALIGN: &str = "bayleaf_text_align";
pub const HIDE_ON_MOBILE: &str = "bayleaf_show_mobile";
pub const PUSH_DOWN_TABLET: &str = "bayleaf_push_down_tablet";
pub const PUSH_DOWN: &str = "bayleaf_push_down";

/// Returns the base option list, in display order.
pub fn base_options() -> Vec<RawOptionSpec> {
    vec![
        RawOptionSpec::new(TEXT_WIDGET_TITLE)
            .kind(OptionType::Select)
            .label("Widget Title Font Size")
            .default_label("Normal")
            .only_for(["text"])
            .choice("large", "Large")
            .choice("small", "Small"),
        columns(
            RawOptionSpec::new(WIDTH)
                .kind(OptionType::Select)
                .label("Width on desktop")
                .default_label("12 of 12"),
            11,
        ),
        columns(
            RawOptionSpec::new(WIDTH_TABLET)
                .kind(OptionType::Select)
                .label("Width on tablet")
                .default_label("Same as Desktop"),
            12,
        ),
        RawOptionSpec::new(VERT_ALIGN)
            .kind(OptionType::Select)
            .label("Content Vertical Alignment")
            .default_label("Top")
            .choice("middle", "Middle")
            .choice("bottom", "Bottom"),
        RawOptionSpec::new(TEXT_ALIGN)
            .kind(OptionType::Select)
            .label("Text Alignment")
            .default_label("Left")
            .choice("center", "Center")
            .choice("right", "Right"),
        RawOptionSpec::new(HIDE_ON_MOBILE)
            .kind(OptionType::Checkbox)
            .label("Hide widget on mobile"),
        RawOptionSpec::new(PUSH_DOWN_TABLET)
            .kind(OptionType::Checkbox)
            .label("Move below next widget on tablet"),
        RawOptionSpec::new(PUSH_DOWN)
            .kind(OptionType::Checkbox)
            .label("Move below next widget on mobile"),
    ]
}

// Grid column choices "1 of 12" .. "<max> of 12".
fn columns(mut spec: RawOptionSpec, max: u8) -> RawOptionSpec {
    for n in 1..=max {
        spec = spec.choice(n.to_string(), format!("{} of 12", n));
    }
    spec
}
