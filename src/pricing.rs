//! # Pricing Engine
//!
//! Turns a [`ProductCosts`] breakdown into a [`ProductTotals`] snapshot:
//!
//! ```text
//! labor    = labor_hours * labor_rate
//! base     = materials + labor
//! overhead = overhead_pct / 100 * base
//! cost     = base + travel + services + extras + overhead
//! price    = cost / (1 - MARGIN_PCT)
//! ```
//!
//! Arithmetic is done in [`Decimal`], starting from the shortest decimal form of each
//! input, and `cost` and `price` are rounded to cents half away from zero. An input of
//! `10.005` therefore costs `10.01`, not the `10.00` a binary float would give.

use crate::model::{ProductCosts, ProductTotals};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Fixed gross margin applied to every product (30% of the selling price).
pub const MARGIN_PCT: f64 = 0.30;

/// Computes cost and suggested price. Pure; negative inputs are taken as given.
pub fn calculate_totals(costs: &ProductCosts) -> ProductTotals {
    let (cost, price) = match decimal_totals(costs) {
        Some((cost, price)) => (to_cents(cost), to_cents(price)),
        None => float_totals(costs),
    };
    ProductTotals {
        cost,
        price_suggested: price,
        margin_pct: MARGIN_PCT,
    }
}

struct Lines {
    labor: Decimal,
    overhead: Decimal,
    cost: Decimal,
}

fn decimal_lines(costs: &ProductCosts) -> Option<Lines> {
    let labor = decimal(costs.labor_hours)?.checked_mul(decimal(costs.labor_rate)?)?;
    let base = decimal(costs.materials)?.checked_add(labor)?;
    let overhead = decimal(costs.overhead_pct)?
        .checked_div(Decimal::ONE_HUNDRED)?
        .checked_mul(base)?;
    let cost = [costs.travel, costs.services, costs.extras]
        .into_iter()
        .try_fold(base.checked_add(overhead)?, |sum, value| {
            sum.checked_add(decimal(value)?)
        })?;
    Some(Lines {
        labor,
        overhead,
        cost,
    })
}

fn decimal_totals(costs: &ProductCosts) -> Option<(Decimal, Decimal)> {
    let cost = decimal_lines(costs)?.cost;
    let margin = decimal(MARGIN_PCT)?;
    let price = cost.checked_div(Decimal::ONE - margin)?;
    Some((cost, price))
}

// Values beyond Decimal's range fall back to f64 with cent rounding.
fn float_totals(costs: &ProductCosts) -> (f64, f64) {
    let base = costs.materials + costs.labor_hours * costs.labor_rate;
    let cost = base
        + costs.travel
        + costs.services
        + costs.extras
        + costs.overhead_pct / 100.0 * base;
    let price = cost / (1.0 - MARGIN_PCT);
    (round_cents(cost), round_cents(price))
}

fn decimal(value: f64) -> Option<Decimal> {
    Decimal::from_str(&value.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(value))
}

fn to_cents(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One line of a cost summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CostLine {
    Materials(f64),
    Labor { hours: f64, rate: f64, amount: f64 },
    Travel(f64),
    Services(f64),
    Extras(f64),
    Overhead { pct: f64, amount: f64 },
}

impl CostLine {
    pub fn label(&self) -> String {
        match self {
            CostLine::Materials(_) => "Materials".to_string(),
            CostLine::Labor { hours, rate, .. } => format!("Labor ({}h x {})", hours, rate),
            CostLine::Travel(_) => "Travel".to_string(),
            CostLine::Services(_) => "External services".to_string(),
            CostLine::Extras(_) => "Extras".to_string(),
            CostLine::Overhead { pct, .. } => format!("Overhead ({}%)", pct),
        }
    }

    pub fn amount(&self) -> f64 {
        match *self {
            CostLine::Materials(amount)
            | CostLine::Travel(amount)
            | CostLine::Services(amount)
            | CostLine::Extras(amount) => amount,
            CostLine::Labor { amount, .. } | CostLine::Overhead { amount, .. } => amount,
        }
    }
}

/// Itemized view of a cost calculation, as shown next to a product's price.
#[derive(Debug, Clone, PartialEq)]
pub struct CostBreakdown {
    pub lines: Vec<CostLine>,
    pub totals: ProductTotals,
}

impl CostBreakdown {
    /// Extras appear only when non-zero and overhead only when positive.
    pub fn from_costs(costs: &ProductCosts) -> Self {
        let (labor, overhead) = match decimal_lines(costs) {
            Some(lines) => (to_cents(lines.labor), to_cents(lines.overhead)),
            None => {
                let labor = costs.labor_hours * costs.labor_rate;
                let overhead = costs.overhead_pct / 100.0 * (costs.materials + labor);
                (round_cents(labor), round_cents(overhead))
            }
        };

        let mut lines = vec![
            CostLine::Materials(costs.materials),
            CostLine::Labor {
                hours: costs.labor_hours,
                rate: costs.labor_rate,
                amount: labor,
            },
            CostLine::Travel(costs.travel),
            CostLine::Services(costs.services),
        ];
        if costs.extras != 0.0 {
            lines.push(CostLine::Extras(costs.extras));
        }
        if costs.overhead_pct > 0.0 {
            lines.push(CostLine::Overhead {
                pct: costs.overhead_pct,
                amount: overhead,
            });
        }

        Self {
            lines,
            totals: calculate_totals(costs),
        }
    }
}
