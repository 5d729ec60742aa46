//! Media library lookups.

use std::collections::BTreeMap;

/// Resolves attachment ids to image URLs.
///
/// The host platform owns the media library; image settings only keep ids
/// that resolve here.
pub trait MediaLibrary {
    /// URL of the attachment's image, or `None` if the id is unknown.
    fn image_url(&self, attachment_id: u64) -> Option<String>;
}

/// A media library without any attachments.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMedia;

impl MediaLibrary for NoMedia {
    fn image_url(&self, _attachment_id: u64) -> Option<String> {
        None
    }
}

impl MediaLibrary for BTreeMap<u64, String> {
    fn image_url(&self, attachment_id: u64) -> Option<String> {
        self.get(&attachment_id).cloned()
    }
}

impl<F> MediaLibrary for F
where
    F: Fn(u64) -> Option<String>,
{
    fn image_url(&self, attachment_id: u64) -> Option<String> {
        self(attachment_id)
    }
}
