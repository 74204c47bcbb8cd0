//! # Product Client
//!
//! High-level API of the product repository. It wraps a `ResourceClient<Product>` and
//! turns gallery actions into typed results; `get`, `list` and `delete` come from
//! [`ActorClient`].
use crate::model::{
    ImageId, ImageUpdate, NewImage, Product, ProductCreate, ProductId, ProductImage,
    ProductUpdate,
};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use atelier_actor::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        ProductError::from(e)
    }
}

impl ProductClient {
    /// Stores a new draft product and returns its id.
    #[instrument(skip(self, params), fields(title = %params.title))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// All products, newest first.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        self.list().await
    }

    /// Products created at or after `since`, newest first.
    #[instrument(skip(self))]
    pub async fn list_created_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<Product>, ProductError> {
        let products = self.list().await?;
        Ok(products
            .into_iter()
            .filter(|product| product.created_at >= since)
            .collect())
    }

    /// Products created during the current calendar month (UTC).
    pub async fn list_this_month(&self) -> Result<Vec<Product>, ProductError> {
        self.list_created_since(start_of_month(Utc::now())).await
    }

    /// Applies a partial update and returns the stored product.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Appends an image to the gallery and returns its id.
    #[instrument(skip(self, image))]
    pub async fn add_image(&self, id: ProductId, image: NewImage) -> Result<ImageId, ProductError> {
        match self.action(id, ProductAction::AddImage(image)).await? {
            ProductActionResult::ImageAdded(image_id) => Ok(image_id),
            other => Err(unexpected(other)),
        }
    }

    /// Edits caption, cover flag or position of an image and returns it.
    #[instrument(skip(self))]
    pub async fn update_image(
        &self,
        id: ProductId,
        image_id: ImageId,
        changes: ImageUpdate,
    ) -> Result<ProductImage, ProductError> {
        match self
            .action(id, ProductAction::UpdateImage { image_id, changes })
            .await?
        {
            ProductActionResult::ImageUpdated(image) => Ok(image),
            other => Err(unexpected(other)),
        }
    }

    /// Removes an image; a removed cover is replaced by the first remaining image.
    #[instrument(skip(self))]
    pub async fn remove_image(&self, id: ProductId, image_id: ImageId) -> Result<(), ProductError> {
        match self.action(id, ProductAction::RemoveImage(image_id)).await? {
            ProductActionResult::ImageRemoved(_) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Reorders the gallery to follow `ordered`. Unknown ids are ignored.
    #[instrument(skip(self))]
    pub async fn reorder_images(
        &self,
        id: ProductId,
        ordered: Vec<ImageId>,
    ) -> Result<(), ProductError> {
        match self.action(id, ProductAction::ReorderImages(ordered)).await? {
            ProductActionResult::ImagesReordered => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    async fn action(
        &self,
        id: ProductId,
        action: ProductAction,
    ) -> Result<ProductActionResult, ProductError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("unexpected action result: {:?}", result))
}

/// First instant of the month containing `now`.
pub fn start_of_month(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .with_day(1)
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductStatus;
    use atelier_actor::mock::{create_mock_client, expect_action, expect_create, MockClient};
    use chrono::{Duration, TimeZone};

    fn product_created_at(title: &str, created_at: DateTime<Utc>) -> Product {
        Product::new(
            ProductId::generate(),
            ProductCreate {
                title: title.to_string(),
                ..Default::default()
            },
            created_at,
        )
    }

    #[tokio::test]
    async fn test_create_product_sends_payload() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let create_task = tokio::spawn(async move {
            product_client
                .create_product(ProductCreate {
                    title: "Uniform shirt".into(),
                    ..Default::default()
                })
                .await
        });

        let (params, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(params.title, "Uniform shirt");
        let id = ProductId::generate();
        responder.send(Ok(id)).unwrap();

        assert_eq!(create_task.await.unwrap().unwrap(), id);
    }

    #[tokio::test]
    async fn test_add_image_returns_image_id() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);
        let product_id = ProductId::generate();

        let add_task = tokio::spawn(async move {
            product_client
                .add_image(product_id, NewImage::new("data:image/png;base64,AAAA"))
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, product_id);
        match action {
            ProductAction::AddImage(image) => {
                assert_eq!(image.url, "data:image/png;base64,AAAA");
                assert!(image.caption.is_none());
            }
            other => panic!("Expected AddImage, got {:?}", other),
        }
        let image_id = ImageId::generate();
        responder
            .send(Ok(ProductActionResult::ImageAdded(image_id)))
            .unwrap();

        assert_eq!(add_task.await.unwrap().unwrap(), image_id);
    }

    #[tokio::test]
    async fn test_remove_image_surfaces_image_not_found() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);
        let product_id = ProductId::generate();
        let image_id = ImageId::generate();

        let remove_task =
            tokio::spawn(async move { product_client.remove_image(product_id, image_id).await });

        let (_, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert!(matches!(action, ProductAction::RemoveImage(id) if id == image_id));
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                ProductError::ImageNotFound {
                    product_id,
                    image_id,
                },
            ))))
            .unwrap();

        assert_eq!(
            remove_task.await.unwrap(),
            Err(ProductError::ImageNotFound {
                product_id,
                image_id
            })
        );
    }

    #[tokio::test]
    async fn test_mismatched_action_result_is_an_error() {
        let mut mock = MockClient::<Product>::new();
        let product_id = ProductId::generate();
        mock.expect_action(product_id)
            .return_ok(ProductActionResult::ImagesReordered);
        let product_client = ProductClient::new(mock.client());

        let result = product_client
            .add_image(product_id, NewImage::new("a.png"))
            .await;
        assert!(matches!(
            result,
            Err(ProductError::ActorCommunicationError(msg)) if msg.contains("ImagesReordered")
        ));
        mock.verify();
    }

    #[tokio::test]
    async fn test_update_and_missing_product() {
        let mut mock = MockClient::<Product>::new();
        let mut product = product_created_at("Apron", Utc::now());
        let id = product.id;
        product.status = ProductStatus::Active;
        mock.expect_update(id).return_ok(product.clone());
        mock.expect_get(id).return_ok(None);
        mock.expect_delete(id)
            .return_err(FrameworkError::NotFound(id.to_string()));
        let product_client = ProductClient::new(mock.client());

        let updated = product_client
            .update_product(
                id,
                ProductUpdate {
                    status: Some(ProductStatus::Active),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated, product);
        assert_eq!(product_client.get(id).await.unwrap(), None);
        assert_eq!(
            product_client.delete(id).await,
            Err(ProductError::NotFound(id.to_string()))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_list_created_since_filters() {
        let mut mock = MockClient::<Product>::new();
        let cutoff = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        mock.expect_list().return_ok(vec![
            product_created_at("June", cutoff + Duration::days(3)),
            product_created_at("Midnight", cutoff),
            product_created_at("May", cutoff - Duration::seconds(1)),
        ]);
        let product_client = ProductClient::new(mock.client());

        let titles: Vec<String> = product_client
            .list_created_since(cutoff)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["June", "Midnight"]);
        mock.verify();
    }

    #[test]
    fn test_start_of_month() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 17, 45, 3).unwrap();
        assert_eq!(
            start_of_month(now),
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()
        );
    }
}
