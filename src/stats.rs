//! Catalog-wide summary figures.

use crate::model::Product;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CatalogStats {
    pub product_count: usize,
    pub total_cost: f64,
    pub total_suggested: f64,
    /// `(total_suggested - total_cost) / total_cost * 100`, or 0 when there is no cost.
    pub average_margin_pct: f64,
}

impl CatalogStats {
    pub fn from_products(products: &[Product]) -> Self {
        let total_cost: f64 = products.iter().map(|p| p.totals.cost).sum();
        let total_suggested: f64 = products.iter().map(|p| p.totals.price_suggested).sum();
        let average_margin_pct = if total_cost > 0.0 {
            (total_suggested - total_cost) / total_cost * 100.0
        } else {
            0.0
        };
        Self {
            product_count: products.len(),
            total_cost,
            total_suggested,
            average_margin_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProductCosts, ProductCreate, ProductId};
    use chrono::Utc;

    fn priced(materials: f64) -> Product {
        Product::new(
            ProductId::generate(),
            ProductCreate {
                title: format!("Item {}", materials),
                costs: ProductCosts {
                    materials,
                    ..Default::default()
                },
                ..Default::default()
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_empty_catalog() {
        assert_eq!(CatalogStats::from_products(&[]), CatalogStats::default());
    }

    #[test]
    fn test_totals_and_margin() {
        let stats = CatalogStats::from_products(&[priced(70.0), priced(140.0)]);
        assert_eq!(stats.product_count, 2);
        assert_eq!(stats.total_cost, 210.0);
        assert_eq!(stats.total_suggested, 300.0);
        assert!((stats.average_margin_pct - 42.857).abs() < 0.001);
    }

    #[test]
    fn test_zero_cost_has_zero_margin() {
        let stats = CatalogStats::from_products(&[priced(0.0)]);
        assert_eq!(stats.product_count, 1);
        assert_eq!(stats.average_margin_pct, 0.0);
    }
}
