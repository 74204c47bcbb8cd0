//! Gallery operations on a [`Product`](crate::model::Product).
//!
//! Each action is one request to the actor: the product is loaded, its gallery changed
//! and the product stored once, so two callers editing the same gallery never overwrite
//! each other's changes.

use crate::model::{ImageId, ImageUpdate, NewImage, ProductImage};

#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Appends an image; the first image of a gallery becomes its cover.
    AddImage(NewImage),
    /// Edits caption, cover flag or position of one image.
    UpdateImage {
        image_id: ImageId,
        changes: ImageUpdate,
    },
    /// Removes an image, promoting a new cover if needed.
    RemoveImage(ImageId),
    /// Renumbers the gallery following the given ids.
    ReorderImages(Vec<ImageId>),
}

/// Results from ProductActions, one variant per action.
#[derive(Debug, Clone)]
pub enum ProductActionResult {
    ImageAdded(ImageId),
    ImageUpdated(ProductImage),
    ImageRemoved(ProductImage),
    ImagesReordered,
}
