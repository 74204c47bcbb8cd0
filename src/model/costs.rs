use serde::{Deserialize, Serialize};

/// Cost inputs of a product, in the product's currency.
///
/// Every field defaults to zero, so a record persisted before `extras` or
/// `overheadPct` existed still deserializes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductCosts {
    pub materials: f64,
    pub labor_hours: f64,
    /// Rate per labor hour.
    pub labor_rate: f64,
    pub travel: f64,
    /// External services (printing, embroidery, ...).
    pub services: f64,
    /// Packaging and other extras.
    pub extras: f64,
    /// Overhead markup over materials + labor, as a percentage (10.0 = 10%).
    pub overhead_pct: f64,
}

/// Derived pricing snapshot. Produced only by [`crate::pricing::calculate_totals`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTotals {
    pub cost: f64,
    pub price_suggested: f64,
    /// Margin as a fraction (0.30 = 30%).
    pub margin_pct: f64,
}
