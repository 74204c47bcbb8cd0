//! Product image gallery.
//!
//! A [`Gallery`] keeps its images in display order and maintains two invariants after
//! every operation:
//!
//! - `sort` values are `0..len`, matching the position in the gallery.
//! - a non-empty gallery has exactly one cover image.
//!
//! Records read from storage are normalized on deserialization, so a document written
//! with gaps or several covers comes back consistent.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of an image, unique within its gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(Uuid);

impl ImageId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for ImageId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub id: ImageId,
    /// Data URL or remote URL. Not validated.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default)]
    pub is_cover: bool,
    #[serde(default)]
    pub sort: u32,
}

/// Payload for appending an image.
#[derive(Debug, Clone, PartialEq)]
pub struct NewImage {
    pub url: String,
    pub caption: Option<String>,
}

impl NewImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

/// Partial update of one image. `None` leaves the field alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageUpdate {
    /// `Some(None)` clears the caption.
    pub caption: Option<Option<String>>,
    /// `true` makes this image the cover. `false` on the cover hands the flag to the
    /// first other image; the only image of a gallery stays cover.
    pub is_cover: Option<bool>,
    /// Target position; values past the end move the image last.
    pub sort: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ProductImage>", into = "Vec<ProductImage>")]
pub struct Gallery(Vec<ProductImage>);

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Images in display order.
    pub fn images(&self) -> &[ProductImage] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: &ImageId) -> Option<&ProductImage> {
        self.0.iter().find(|image| &image.id == id)
    }

    pub fn cover(&self) -> Option<&ProductImage> {
        self.0.iter().find(|image| image.is_cover)
    }

    /// Appends an image at the end. The first image of a gallery becomes its cover.
    pub fn add(&mut self, image: NewImage) -> ImageId {
        let id = ImageId::generate();
        self.0.push(ProductImage {
            id,
            url: image.url,
            caption: image.caption,
            is_cover: self.0.is_empty(),
            sort: self.0.len() as u32,
        });
        id
    }

    /// Applies `changes` to the image. Returns `None` when no image has that id.
    pub fn update(&mut self, id: &ImageId, changes: ImageUpdate) -> Option<&ProductImage> {
        let mut index = self.position(id)?;

        if let Some(caption) = changes.caption {
            self.0[index].caption = caption;
        }

        if let Some(position) = changes.sort {
            let target = (position as usize).min(self.0.len() - 1);
            let image = self.0.remove(index);
            self.0.insert(target, image);
            index = target;
            self.renumber();
        }

        match changes.is_cover {
            Some(true) => {
                for (i, image) in self.0.iter_mut().enumerate() {
                    image.is_cover = i == index;
                }
            }
            Some(false) if self.0[index].is_cover && self.0.len() > 1 => {
                self.0[index].is_cover = false;
                let heir = if index == 0 { 1 } else { 0 };
                self.0[heir].is_cover = true;
            }
            _ => {}
        }

        self.0.get(index)
    }

    /// Removes the image. If it was the cover, the first remaining image takes over.
    pub fn remove(&mut self, id: &ImageId) -> Option<ProductImage> {
        let index = self.position(id)?;
        let removed = self.0.remove(index);
        if removed.is_cover {
            if let Some(first) = self.0.first_mut() {
                first.is_cover = true;
            }
        }
        self.renumber();
        Some(removed)
    }

    /// Puts the listed images first, in list order, followed by any image the list
    /// leaves out. Unknown and repeated ids are skipped.
    ///
    /// Images missing from the list are kept rather than dropped, unlike a plain
    /// "map the id list" reorder.
    pub fn reorder(&mut self, ordered: &[ImageId]) {
        let mut remaining = std::mem::take(&mut self.0);
        let mut arranged = Vec::with_capacity(remaining.len());
        for id in ordered {
            if let Some(pos) = remaining.iter().position(|image| &image.id == id) {
                arranged.push(remaining.remove(pos));
            }
        }
        arranged.extend(remaining);
        self.0 = arranged;
        self.renumber();
    }

    fn position(&self, id: &ImageId) -> Option<usize> {
        self.0.iter().position(|image| &image.id == id)
    }

    fn renumber(&mut self) {
        for (i, image) in self.0.iter_mut().enumerate() {
            image.sort = i as u32;
        }
    }
}

impl From<Vec<ProductImage>> for Gallery {
    fn from(mut images: Vec<ProductImage>) -> Self {
        images.sort_by_key(|image| image.sort);
        let cover = images.iter().position(|image| image.is_cover).unwrap_or(0);
        for (i, image) in images.iter_mut().enumerate() {
            image.sort = i as u32;
            image.is_cover = i == cover;
        }
        Self(images)
    }
}

impl From<Gallery> for Vec<ProductImage> {
    fn from(gallery: Gallery) -> Self {
        gallery.0
    }
}
