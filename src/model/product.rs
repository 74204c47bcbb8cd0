use super::costs::{ProductCosts, ProductTotals};
use super::gallery::{Gallery, ProductImage};
use crate::pricing::calculate_totals;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const CODE_PREFIX: &str = "FP";
const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Primary key of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for ProductId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Draft,
    Active,
}

/// Currency a product is priced in. Only affects formatting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Dominican peso.
    #[default]
    Dop,
    Usd,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Dop => "RD$",
            Currency::Usd => "$",
        }
    }

    /// Formats an amount with the currency symbol, two decimals and comma grouping:
    /// `RD$ 1,234.50`, `$ -12.00`.
    pub fn format(&self, amount: f64) -> String {
        if !amount.is_finite() {
            return format!("{} {}", self.symbol(), amount);
        }
        let cents = format!("{:.2}", amount.abs());
        let (whole, fraction) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        let sign = if amount < 0.0 && cents.chars().any(|c| c != '0' && c != '.') {
            "-"
        } else {
            ""
        };
        format!("{} {}{}.{}", self.symbol(), sign, grouped, fraction)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Dop => f.write_str("DOP"),
            Currency::Usd => f.write_str("USD"),
        }
    }
}

/// A catalog product with its costs, derived totals and image gallery.
///
/// Stored `totals` are ignored on deserialization and recomputed from `costs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ProductRecord")]
pub struct Product {
    pub id: ProductId,
    /// Display code such as `FP482913K7`. Not unique, never used for lookups.
    pub code: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default)]
    pub status: ProductStatus,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub costs: ProductCosts,
    pub totals: ProductTotals,
    #[serde(default)]
    pub gallery: Gallery,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Stored shape of a product.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductRecord {
    id: ProductId,
    code: String,
    title: String,
    #[serde(default)]
    client_name: Option<String>,
    #[serde(default)]
    status: ProductStatus,
    currency: Currency,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    costs: ProductCosts,
    #[serde(default)]
    gallery: Gallery,
    #[serde(default)]
    notes: Option<String>,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: record.id,
            code: record.code,
            title: record.title,
            client_name: record.client_name,
            status: record.status,
            currency: record.currency,
            created_at: record.created_at,
            updated_at: record.updated_at,
            totals: calculate_totals(&record.costs),
            costs: record.costs,
            gallery: record.gallery,
            notes: record.notes,
        }
    }
}

impl Product {
    /// Builds a new draft product with an empty gallery.
    pub fn new(id: ProductId, params: ProductCreate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            code: generate_code(now),
            title: params.title,
            client_name: params.client_name,
            status: ProductStatus::Draft,
            currency: params.currency,
            created_at: now,
            updated_at: now,
            totals: calculate_totals(&params.costs),
            costs: params.costs,
            gallery: Gallery::new(),
            notes: params.notes,
        }
    }

    /// Merges the provided fields; totals follow the costs.
    pub fn apply(&mut self, update: ProductUpdate, now: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(client_name) = update.client_name {
            self.client_name = client_name;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(costs) = update.costs {
            self.totals = calculate_totals(&costs);
            self.costs = costs;
        }
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
        self.touch(now);
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub fn cover_image(&self) -> Option<&ProductImage> {
        self.gallery.cover()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub title: String,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub costs: ProductCosts,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial product update. Currency and gallery cannot be changed here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub title: Option<String>,
    /// `Some(None)` clears the client name.
    pub client_name: Option<Option<String>>,
    pub status: Option<ProductStatus>,
    /// New costs; totals are recomputed.
    pub costs: Option<ProductCosts>,
    pub notes: Option<Option<String>>,
}

/// `FP` + last six digits of the epoch milliseconds + two random base-36 characters.
pub fn generate_code(now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis().rem_euclid(1_000_000);
    let suffix: String = Uuid::new_v4().as_bytes()[..2]
        .iter()
        .map(|byte| BASE36[usize::from(*byte) % BASE36.len()] as char)
        .collect();
    format!("{}{:06}{}", CODE_PREFIX, millis, suffix)
}
