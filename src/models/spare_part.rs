//! Spare part model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Spare part stock record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SparePart {
    pub id: i32,
    pub name: String,
    /// Manufacturer or internal part reference, unique
    pub reference: String,
    pub quantity: i32,
    /// Stock level at or below which the part is flagged as low
    pub min_quantity: i32,
    #[schema(value_type = Option<f64>)]
    pub unit_cost: Option<Decimal>,
    pub notes: Option<String>,
    pub crea_date: DateTime<Utc>,
    pub modif_date: Option<DateTime<Utc>>,
}

impl SparePart {
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_quantity
    }
}

/// Create spare part request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSparePart {
    #[validate(length(min = 1, message = "Part name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Part reference must not be empty"))]
    pub reference: String,
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0, message = "Minimum quantity must not be negative"))]
    pub min_quantity: Option<i32>,
    #[schema(value_type = Option<f64>)]
    pub unit_cost: Option<Decimal>,
    pub notes: Option<String>,
}

/// Update spare part request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSparePart {
    #[validate(length(min = 1, message = "Part name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Part reference must not be empty"))]
    pub reference: Option<String>,
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0, message = "Minimum quantity must not be negative"))]
    pub min_quantity: Option<i32>,
    #[schema(value_type = Option<f64>)]
    pub unit_cost: Option<Decimal>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn part(quantity: i32, min_quantity: i32) -> SparePart {
        SparePart {
            id: 1,
            name: "Carbon brush".to_string(),
            reference: "CB-5x8".to_string(),
            quantity,
            min_quantity,
            unit_cost: None,
            notes: None,
            crea_date: Utc::now(),
            modif_date: None,
        }
    }

    #[test]
    fn low_stock_at_or_below_threshold() {
        assert!(part(0, 2).is_low_stock());
        assert!(part(2, 2).is_low_stock());
        assert!(!part(3, 2).is_low_stock());
    }
}
