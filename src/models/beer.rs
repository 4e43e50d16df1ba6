use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::beer;
pub use crate::entities::beer::BeerType;

/// A stored beer stock record.
///
/// `quantity` stays within `0..=max_capacity`; every mutation goes through
/// [`crate::services::beer_stock::BeerStockService`], which checks the bound
/// before writing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Beer {
    pub id: i64,
    pub name: String,
    pub brand: String,
    #[serde(rename = "max")]
    pub max_capacity: i32,
    pub quantity: i32,
    #[serde(rename = "type")]
    pub category: BeerType,
    /// Revision counter, bumped on every successful update
    pub version: i32,
}

/// Creation input: a fully populated record that has no id yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBeer {
    pub name: String,
    pub brand: String,
    pub max_capacity: i32,
    pub quantity: i32,
    pub category: BeerType,
}

impl Beer {
    /// True when `quantity + amount` still fits under `max_capacity`
    pub fn can_add(&self, amount: i32) -> bool {
        i64::from(self.quantity) + i64::from(amount) <= i64::from(self.max_capacity)
    }
}

impl From<beer::Model> for Beer {
    fn from(model: beer::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            brand: model.brand,
            max_capacity: model.max_capacity,
            quantity: model.quantity,
            category: model.category,
            version: model.version,
        }
    }
}
