use metrics::counter;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::{
    errors::{BeerLookup, ServiceError},
    models::{Beer, NewBeer},
    repositories::BeerRepository,
};

/// Service for managing beer stock
///
/// Reads and writes are separate repository calls. Quantity writes carry the
/// version that was read, so a concurrent change between the capacity check
/// and the write surfaces as `ConcurrentModification` instead of a lost
/// update.
#[derive(Clone)]
pub struct BeerStockService {
    repository: Arc<dyn BeerRepository>,
}

impl BeerStockService {
    /// Creates a new stock service over the given repository
    pub fn new(repository: Arc<dyn BeerRepository>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<dyn BeerRepository> {
        &self.repository
    }

    /// Registers a new beer, rejecting names that are already taken
    #[instrument(skip(self, beer), fields(name = %beer.name))]
    pub async fn create(&self, beer: NewBeer) -> Result<Beer, ServiceError> {
        if beer.quantity < 0 || beer.max_capacity < 0 {
            return Err(ServiceError::ValidationError(format!(
                "quantity {} and max capacity {} must not be negative",
                beer.quantity, beer.max_capacity
            )));
        }
        if beer.quantity > beer.max_capacity {
            return Err(ServiceError::ValidationError(format!(
                "quantity {} exceeds max capacity {}",
                beer.quantity, beer.max_capacity
            )));
        }

        if self.repository.find_by_name(&beer.name).await?.is_some() {
            warn!("beer name already registered");
            return Err(ServiceError::AlreadyRegistered(beer.name));
        }

        let stored = self.repository.insert(beer).await?;
        counter!("beer_stock.beers.created", 1);
        info!(id = stored.id, "beer registered");
        Ok(stored)
    }

    /// Finds a beer by exact name
    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Beer, ServiceError> {
        self.repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| ServiceError::NotFound(BeerLookup::Name(name.to_string())))
    }

    /// Finds a beer by id
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i64) -> Result<Beer, ServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(BeerLookup::Id(id)))
    }

    /// Lists every beer in store order
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Beer>, ServiceError> {
        self.repository.list_all().await
    }

    /// Deletes a beer after checking it exists
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        self.find_by_id(id).await?;
        self.repository.delete_by_id(id).await?;
        counter!("beer_stock.beers.deleted", 1);
        info!(id, "beer deleted");
        Ok(())
    }

    /// Adds `amount` units; the summed total must not exceed max capacity
    #[instrument(skip(self))]
    pub async fn increment(&self, id: i64, amount: i32) -> Result<Beer, ServiceError> {
        ensure_positive(amount)?;
        let beer = self.find_by_id(id).await?;

        let attempted = i64::from(beer.quantity) + i64::from(amount);
        if !beer.can_add(amount) {
            counter!("beer_stock.adjustments.rejected", 1, "direction" => "increment");
            warn!(attempted, max = beer.max_capacity, "increment exceeds capacity");
            return Err(ServiceError::StockExceeded {
                attempted,
                max: beer.max_capacity,
            });
        }

        self.store_quantity(beer, attempted).await
    }

    /// Removes `amount` units; the result must not go below zero
    #[instrument(skip(self))]
    pub async fn decrement(&self, id: i64, amount: i32) -> Result<Beer, ServiceError> {
        ensure_positive(amount)?;
        let beer = self.find_by_id(id).await?;

        let attempted = i64::from(beer.quantity) - i64::from(amount);
        if attempted < 0 {
            counter!("beer_stock.adjustments.rejected", 1, "direction" => "decrement");
            warn!(attempted, "decrement below zero");
            return Err(ServiceError::StockUnderflow { attempted });
        }

        self.store_quantity(beer, attempted).await
    }

    async fn store_quantity(&self, beer: Beer, quantity: i64) -> Result<Beer, ServiceError> {
        // Bounded by 0..=max_capacity, which is an i32
        let quantity = i32::try_from(quantity)
            .map_err(|_| ServiceError::InternalError(format!("quantity {} out of range", quantity)))?;
        let updated = self
            .repository
            .update(Beer { quantity, ..beer })
            .await?;
        info!(id = updated.id, quantity = updated.quantity, "stock adjusted");
        Ok(updated)
    }
}

fn ensure_positive(amount: i32) -> Result<(), ServiceError> {
    if amount <= 0 {
        return Err(ServiceError::InvalidInput(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    Ok(())
}
