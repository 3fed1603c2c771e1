use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A product in the shared catalog. Product names are globally unique; prices
/// are stored in cents.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub price_cents: i32,
    pub is_available: bool,
}

/// A product as listed on one machine, with the per-machine price override and
/// availability from the join row applied alongside the catalog data.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineProduct {
    pub product_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub price_cents: i32,
    pub price_cents_override: Option<i32>,
    pub is_available: bool,
}

impl MachineProduct {
    /// The price customers actually pay at this machine.
    #[must_use]
    pub fn effective_price_cents(&self) -> i32 {
        self.price_cents_override.unwrap_or(self.price_cents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: i32, over: Option<i32>) -> MachineProduct {
        MachineProduct {
            product_id: 1,
            name: "Cola".to_owned(),
            description: None,
            photo_url: None,
            price_cents: price,
            price_cents_override: over,
            is_available: true,
        }
    }

    #[test]
    fn override_takes_precedence() {
        assert_eq!(product(150, Some(180)).effective_price_cents(), 180);
    }

    #[test]
    fn falls_back_to_catalog_price() {
        assert_eq!(product(150, None).effective_price_cents(), 150);
    }
}
