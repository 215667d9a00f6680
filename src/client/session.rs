use crate::models::{EncodedImage, StoredImage};

/// The image most recently generated and persisted in this session.
#[derive(Debug, Clone)]
pub struct CurrentImage {
    pub image_data: EncodedImage,
    pub metadata: StoredImage,
}

/// Single-slot session state.
///
/// Only a successful generation writes the slot, and it always replaces the
/// previous image wholesale. Dropping the session clears it.
#[derive(Debug, Default)]
pub struct ClientSession {
    current: Option<CurrentImage>,
}

impl ClientSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&CurrentImage> {
        self.current.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.current.is_some()
    }

    pub(crate) fn replace(
        &mut self,
        image_data: EncodedImage,
        metadata: StoredImage,
    ) -> Option<CurrentImage> {
        self.current.replace(CurrentImage {
            image_data,
            metadata,
        })
    }
}
