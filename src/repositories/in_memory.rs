use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::models::{Beer, NewBeer};

use super::BeerRepository;

#[derive(Debug, Default)]
struct Store {
    last_id: i64,
    beers: BTreeMap<i64, Beer>,
}

/// Process-local beer repository with the same contract as the SQL adapter
#[derive(Debug, Default)]
pub struct InMemoryBeerRepository {
    store: RwLock<Store>,
}

impl InMemoryBeerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BeerRepository for InMemoryBeerRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Beer>, ServiceError> {
        let store = self.store.read().await;
        Ok(store.beers.values().find(|b| b.name == name).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Beer>, ServiceError> {
        Ok(self.store.read().await.beers.get(&id).cloned())
    }

    async fn insert(&self, beer: NewBeer) -> Result<Beer, ServiceError> {
        let mut store = self.store.write().await;
        if store.beers.values().any(|b| b.name == beer.name) {
            return Err(ServiceError::AlreadyRegistered(beer.name));
        }

        store.last_id += 1;
        let stored = Beer {
            id: store.last_id,
            name: beer.name,
            brand: beer.brand,
            max_capacity: beer.max_capacity,
            quantity: beer.quantity,
            category: beer.category,
            version: 1,
        };
        store.beers.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, beer: Beer) -> Result<Beer, ServiceError> {
        let mut store = self.store.write().await;
        let current = store
            .beers
            .get_mut(&beer.id)
            .filter(|current| current.version == beer.version)
            .ok_or(ServiceError::ConcurrentModification(beer.id))?;

        current.brand = beer.brand;
        current.max_capacity = beer.max_capacity;
        current.quantity = beer.quantity;
        current.category = beer.category;
        current.version += 1;
        Ok(current.clone())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        self.store.write().await.beers.remove(&id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Beer>, ServiceError> {
        Ok(self.store.read().await.beers.values().cloned().collect())
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        Ok(())
    }
}
