//! In-memory service repository.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{ServiceRepository, ServiceRepositoryError};
use crate::domain::{Service, ServiceId};

use super::poisoned;

/// Service store keyed by id.
///
/// A save swaps the whole [`Service`] value, location and roster included,
/// under one write lock.
#[derive(Debug, Default)]
pub struct InMemoryServiceRepository {
    services: RwLock<BTreeMap<ServiceId, Service>>,
}

impl InMemoryServiceRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored service in id order.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRepositoryError::Query`] if the store lock is poisoned.
    pub fn all(&self) -> Result<Vec<Service>, ServiceRepositoryError> {
        let services = self
            .services
            .read()
            .map_err(|_| ServiceRepositoryError::query(poisoned("service repository")))?;
        Ok(services.values().cloned().collect())
    }
}

#[async_trait]
impl ServiceRepository for InMemoryServiceRepository {
    async fn find_by_id(&self, id: &ServiceId) -> Result<Option<Service>, ServiceRepositoryError> {
        let services = self
            .services
            .read()
            .map_err(|_| ServiceRepositoryError::query(poisoned("service repository")))?;
        Ok(services.get(id).cloned())
    }

    async fn save(&self, service: &Service) -> Result<(), ServiceRepositoryError> {
        let mut services = self
            .services
            .write()
            .map_err(|_| ServiceRepositoryError::query(poisoned("service repository")))?;
        services.insert(service.id(), service.clone());
        Ok(())
    }
}
