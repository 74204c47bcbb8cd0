//! [`ActorEntity`] implementation for [`Product`].

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use atelier_actor::ActorEntity;
use chrono::Utc;
use std::cmp::Ordering;

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn id(&self) -> &ProductId {
        &self.id
    }

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        Ok(Product::new(id, params, Utc::now()))
    }

    /// Newest first; ties broken by id so listings are stable.
    fn listing_order(&self, other: &Self) -> Ordering {
        other
            .created_at
            .cmp(&self.created_at)
            .then_with(|| self.id.cmp(&other.id))
    }

    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), ProductError> {
        self.apply(update, Utc::now());
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, ProductError> {
        let image_not_found = |product_id, image_id| ProductError::ImageNotFound {
            product_id,
            image_id,
        };

        let result = match action {
            ProductAction::AddImage(image) => {
                ProductActionResult::ImageAdded(self.gallery.add(image))
            }
            ProductAction::UpdateImage { image_id, changes } => {
                let image = self
                    .gallery
                    .update(&image_id, changes)
                    .cloned()
                    .ok_or_else(|| image_not_found(self.id, image_id))?;
                ProductActionResult::ImageUpdated(image)
            }
            ProductAction::RemoveImage(image_id) => {
                let image = self
                    .gallery
                    .remove(&image_id)
                    .ok_or_else(|| image_not_found(self.id, image_id))?;
                ProductActionResult::ImageRemoved(image)
            }
            ProductAction::ReorderImages(ordered) => {
                self.gallery.reorder(&ordered);
                ProductActionResult::ImagesReordered
            }
        };

        self.touch(Utc::now());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ImageId, ImageUpdate, NewImage};

    fn product() -> Product {
        Product::new(
            ProductId::generate(),
            ProductCreate {
                title: "Linen shirt".into(),
                ..Default::default()
            },
            Utc::now() - chrono::Duration::hours(1),
        )
    }

    #[tokio::test]
    async fn test_actions_refresh_updated_at() {
        let mut product = product();
        let before = product.updated_at;
        let result = product
            .handle_action(ProductAction::AddImage(NewImage::new("a.png")), &())
            .await
            .unwrap();
        assert!(matches!(result, ProductActionResult::ImageAdded(_)));
        assert!(product.updated_at > before);
        assert_eq!(product.created_at, before);
    }

    #[tokio::test]
    async fn test_unknown_image_is_reported() {
        let mut product = product();
        let missing = ImageId::generate();
        let err = product
            .handle_action(
                ProductAction::UpdateImage {
                    image_id: missing,
                    changes: ImageUpdate::default(),
                },
                &(),
            )
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ProductError::ImageNotFound {
                product_id: product.id,
                image_id: missing
            }
        );

        let err = product
            .handle_action(ProductAction::RemoveImage(missing), &())
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::ImageNotFound { .. }));
    }

    #[test]
    fn test_listing_order_newest_first() {
        let older = product();
        let mut newer = product();
        newer.created_at = older.created_at + chrono::Duration::minutes(5);
        assert_eq!(newer.listing_order(&older), Ordering::Less);
        assert_eq!(older.listing_order(&newer), Ordering::Greater);
        assert_eq!(older.listing_order(&older), Ordering::Equal);
    }
}
