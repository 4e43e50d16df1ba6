use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::models::{Beer, NewBeer};

pub mod beer_repository;
pub mod in_memory;

pub use beer_repository::SeaOrmBeerRepository;
pub use in_memory::InMemoryBeerRepository;

/// Persistence capability consumed by the stock service.
///
/// Lookups report absence as `Ok(None)`; deciding that a missing record is an
/// error is left to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BeerRepository: Send + Sync {
    /// Find a beer by its exact (case-sensitive) name
    async fn find_by_name(&self, name: &str) -> Result<Option<Beer>, ServiceError>;

    /// Find a beer by id
    async fn find_by_id(&self, id: i64) -> Result<Option<Beer>, ServiceError>;

    /// Persist a new beer and return it with its assigned id and version 1.
    /// A name collision detected by the store is `AlreadyRegistered`.
    async fn insert(&self, beer: NewBeer) -> Result<Beer, ServiceError>;

    /// Write brand, capacity, quantity and category of an existing beer.
    ///
    /// The write only applies if the stored version still equals
    /// `beer.version`; otherwise nothing changes and the call fails with
    /// `ConcurrentModification`. The name is fixed at creation.
    async fn update(&self, beer: Beer) -> Result<Beer, ServiceError>;

    /// Delete by id. Deleting an absent id succeeds.
    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError>;

    /// Every beer, ordered by id
    async fn list_all(&self) -> Result<Vec<Beer>, ServiceError>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> Result<(), ServiceError>;
}
