//! Grid layout class for post listing widgets.

use crate::hooks::Hooks;

use super::Extension;

/// Adds `posts-grid` to widgets whose `styles` setting selects a grid style.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostsGrid;

impl Extension for PostsGrid {
    fn register(&self, hooks: &mut Hooks) {
        hooks.on_classes(|mut classes, occurrence| {
            let grid = occurrence
                .instance
                .get_str("styles")
                .is_some_and(|styles| styles.contains("grid"));
            if grid {
                classes.push("posts-grid".to_string());
            }
            classes
        });
    }
}
