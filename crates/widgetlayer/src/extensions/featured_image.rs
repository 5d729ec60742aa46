//! Featured images for newsletter and opt-in form widgets.

use std::fmt;
use std::sync::Arc;

use crate::classes::FEATURED_IMAGE;
use crate::escape::{absint, esc_url};
use crate::hooks::Hooks;
use crate::media::MediaLibrary;
use crate::registry::{OptionType, RawOptionSpec};
use crate::resolve::WidgetOccurrence;

use super::Extension;

/// Widget types that can carry a featured image.
pub const FEATURED_IMAGE_ID_BASES: [&str; 2] = ["mc4wp_form_widget", "mo_optin_widgets"];

/// Wraps supported widgets in thumbnail and content containers when they
/// have a featured image.
#[derive(Clone)]
pub struct FeaturedImage {
    media: Arc<dyn MediaLibrary + Send + Sync>,
}

impl fmt::Debug for FeaturedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeaturedImage").finish_non_exhaustive()
    }
}

impl FeaturedImage {
    pub fn new(media: Arc<dyn MediaLibrary + Send + Sync>) -> Self {
        Self { media }
    }
}

// URL of the occurrence's featured image, if it has one the media library knows.
fn resolve_image(media: &dyn MediaLibrary, occurrence: &WidgetOccurrence) -> Option<String> {
    if !FEATURED_IMAGE_ID_BASES.contains(&occurrence.id_base.as_str()) {
        return None;
    }
    let attachment = absint(&occurrence.instance.get_str(FEATURED_IMAGE)?);
    if attachment == 0 {
        return None;
    }
    media.image_url(attachment)
}

impl Extension for FeaturedImage {
    fn register(&self, hooks: &mut Hooks) {
        let before_media = Arc::clone(&self.media);
        let after_media = Arc::clone(&self.media);

        hooks
            .on_options(|mut options| {
                options.push(
                    RawOptionSpec::new(FEATURED_IMAGE)
                        .kind(OptionType::ImageUpload)
                        .label("Widget Featured Image")
                        .only_for(FEATURED_IMAGE_ID_BASES),
                );
                options
            })
            .on_before_content(move |markup, occurrence| {
                match resolve_image(before_media.as_ref(), occurrence) {
                    Some(url) => format!(
                        "<div class=\"custom-widget-thumbnail\"><div class=\"thumb-wrapper\">\
                         <img src=\"{}\" class=\"widget-bg-featured-image\" alt=\"\">\
                         </div></div><div class=\"custom-widget-content\"><div class=\"custom-content-wrapper\">",
                        esc_url(&url)
                    ),
                    None => markup,
                }
            })
            .on_after_content(move |markup, occurrence| {
                match resolve_image(after_media.as_ref(), occurrence) {
                    Some(_) => "</div></div>".to_string(),
                    None => markup,
                }
            });
    }
}
