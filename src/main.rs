//! Demo workflow: price a product, build its gallery and print a catalog summary.
//!
//! ```bash
//! RUST_LOG=debug cargo run
//! ATELIER__STORAGE__BACKEND=memory cargo run
//! ```

use atelier::lifecycle::CatalogSystem;
use atelier::model::{
    ImageUpdate, NewImage, ProductCosts, ProductCreate, ProductStatus, ProductUpdate,
};
use atelier::pricing::CostBreakdown;
use atelier::settings::Settings;
use atelier_actor::tracing::setup_tracing;
use std::error::Error;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let settings = Settings::load()?;
    setup_tracing(&settings.log.filter);

    info!(?settings, "Starting atelier");
    let system = CatalogSystem::start(&settings).await?;
    let mut state = system.state();
    state.load_products().await?;

    let params = ProductCreate {
        title: "Embroidered polo".to_string(),
        client_name: Some("Colmado La Esquina".to_string()),
        costs: ProductCosts {
            materials: 100.0,
            labor_hours: 5.0,
            labor_rate: 20.0,
            travel: 15.0,
            overhead_pct: 10.0,
            ..Default::default()
        },
        ..Default::default()
    };
    if let Err(errors) = params.validate() {
        warn!(%errors, "Form would reject this product");
    }

    let breakdown = CostBreakdown::from_costs(&params.costs);
    for line in &breakdown.lines {
        info!(
            "{:<20} {}",
            line.label(),
            params.currency.format(line.amount())
        );
    }

    let span = tracing::info_span!("product_creation");
    let id = async {
        info!("Creating product");
        state.create_product(params).await
    }
    .instrument(span)
    .await?;

    let front = state
        .add_image(
            id,
            NewImage::new("https://example.com/polo-front.jpg").with_caption("Front"),
        )
        .await?;
    let back = state
        .add_image(id, NewImage::new("https://example.com/polo-back.jpg"))
        .await?;
    state
        .update_image(
            id,
            back,
            ImageUpdate {
                is_cover: Some(true),
                ..Default::default()
            },
        )
        .await?;
    state.reorder_images(id, vec![back, front]).await?;
    state
        .update_product(
            id,
            ProductUpdate {
                status: Some(ProductStatus::Active),
                ..Default::default()
            },
        )
        .await?;

    if let Some(product) = state.product(&id) {
        info!(
            code = %product.code,
            cost = %product.currency.format(product.totals.cost),
            price = %product.currency.format(product.totals.price_suggested),
            cover = ?product.cover_image().map(|image| image.url.as_str()),
            "Product ready"
        );
        info!("{}", serde_json::to_string_pretty(product)?);
    }

    let stats = state.stats();
    info!(
        products = stats.product_count,
        total_cost = stats.total_cost,
        total_suggested = stats.total_suggested,
        average_margin_pct = stats.average_margin_pct,
        "Catalog summary"
    );
    let this_month = system.product_client.list_this_month().await?;
    info!(count = this_month.len(), "Created this month");

    drop(state);
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
