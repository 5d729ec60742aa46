//! Built-in add-ons.
//!
//! An [`Extension`] plugs into the layer by registering filters on [`Hooks`].
//! The theme ships three:
//!
//! - [`Divider`]: a spacer widget with configurable height and divider line
//! - [`FeaturedImage`]: a featured image for newsletter and opt-in widgets
//! - [`PostsGrid`]: grid layout class for post listing widgets

mod divider;
mod featured_image;
mod posts_grid;

use std::sync::Arc;

use crate::hooks::Hooks;
use crate::media::MediaLibrary;

pub use divider::{Divider, DIVIDER_HEIGHT, DIVIDER_HEIGHT_TABLET, DIVIDER_ID_BASE, DIVIDER_LINE};
pub use featured_image::{FeaturedImage, FEATURED_IMAGE_ID_BASES};
pub use posts_grid::PostsGrid;

/// Something that customizes the widget layer through hook filters.
pub trait Extension {
    /// Registers the extension's filters.
    fn register(&self, hooks: &mut Hooks);
}

/// Returns the theme's built-in extensions, in registration order.
pub fn builtin(media: Arc<dyn MediaLibrary + Send + Sync>) -> Vec<Box<dyn Extension>> {
    vec![
        Box::new(Divider),
        Box::new(FeaturedImage::new(media)),
        Box::new(PostsGrid),
    ]
}
