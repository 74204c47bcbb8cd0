//! # Catalog State
//!
//! An explicit, owned state container for front ends. It caches the product list,
//! tracks whether a request is in flight and keeps a short message describing the last
//! failure. Every mutating call goes through the repository and then reloads the cache,
//! so `products()` always reflects what is stored.
//!
//! Failures leave the cached list as it was, set [`CatalogState::error`], and are also
//! returned to the caller.

use crate::clients::{ActorClient, ProductClient};
use crate::model::{
    ImageId, ImageUpdate, NewImage, Product, ProductCreate, ProductId, ProductImage,
    ProductUpdate,
};
use crate::product_actor::ProductError;
use crate::stats::CatalogStats;
use std::future::Future;
use tracing::{instrument, warn};

pub const LOAD_FAILED: &str = "error loading products";
pub const CREATE_FAILED: &str = "error creating product";
pub const UPDATE_FAILED: &str = "error updating product";
pub const DELETE_FAILED: &str = "error deleting product";
pub const GALLERY_FAILED: &str = "error updating gallery";

pub struct CatalogState {
    client: ProductClient,
    products: Vec<Product>,
    loading: bool,
    error: Option<String>,
}

impl CatalogState {
    /// Starts with an empty cache; call [`load_products`](Self::load_products) to fill it.
    pub fn new(client: ProductClient) -> Self {
        Self {
            client,
            products: Vec::new(),
            loading: false,
            error: None,
        }
    }

    /// Cached products, newest first.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Looks a product up in the cache.
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats::from_products(&self.products)
    }

    #[instrument(skip(self))]
    pub async fn load_products(&mut self) -> Result<(), ProductError> {
        self.begin();
        match self.client.list_products().await {
            Ok(products) => {
                self.products = products;
                self.loading = false;
                Ok(())
            }
            Err(e) => Err(self.fail(LOAD_FAILED, e)),
        }
    }

    pub async fn create_product(&mut self, params: ProductCreate) -> Result<ProductId, ProductError> {
        let client = self.client.clone();
        self.mutate(CREATE_FAILED, async move { client.create_product(params).await })
            .await
    }

    pub async fn update_product(
        &mut self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        let client = self.client.clone();
        self.mutate(UPDATE_FAILED, async move { client.update_product(id, update).await })
            .await
    }

    pub async fn delete_product(&mut self, id: ProductId) -> Result<(), ProductError> {
        let client = self.client.clone();
        self.mutate(DELETE_FAILED, async move { client.delete(id).await })
            .await
    }

    pub async fn add_image(
        &mut self,
        id: ProductId,
        image: NewImage,
    ) -> Result<ImageId, ProductError> {
        let client = self.client.clone();
        self.mutate(GALLERY_FAILED, async move { client.add_image(id, image).await })
            .await
    }

    pub async fn update_image(
        &mut self,
        id: ProductId,
        image_id: ImageId,
        changes: ImageUpdate,
    ) -> Result<ProductImage, ProductError> {
        let client = self.client.clone();
        self.mutate(GALLERY_FAILED, async move {
            client.update_image(id, image_id, changes).await
        })
        .await
    }

    pub async fn remove_image(
        &mut self,
        id: ProductId,
        image_id: ImageId,
    ) -> Result<(), ProductError> {
        let client = self.client.clone();
        self.mutate(GALLERY_FAILED, async move {
            client.remove_image(id, image_id).await
        })
        .await
    }

    pub async fn reorder_images(
        &mut self,
        id: ProductId,
        ordered: Vec<ImageId>,
    ) -> Result<(), ProductError> {
        let client = self.client.clone();
        self.mutate(GALLERY_FAILED, async move {
            client.reorder_images(id, ordered).await
        })
        .await
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn fail(&mut self, message: &str, e: ProductError) -> ProductError {
        warn!(error = %e, "{}", message);
        self.error = Some(message.to_string());
        self.loading = false;
        e
    }

    // Runs a repository call, then reloads the cache.
    async fn mutate<R>(
        &mut self,
        failure: &'static str,
        request: impl Future<Output = Result<R, ProductError>>,
    ) -> Result<R, ProductError> {
        self.begin();
        match request.await {
            Ok(value) => {
                self.load_products().await?;
                Ok(value)
            }
            Err(e) => Err(self.fail(failure, e)),
        }
    }
}
