//! Port for service persistence.
//!
//! Adapters must write a service and its complete roster in one atomic step:
//! a reader never observes the new location with the old staff or the other
//! way round.

use async_trait::async_trait;

use crate::domain::{Service, ServiceId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by service repository adapters.
    pub enum ServiceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "service repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "service repository query failed: {message}",
    }
}

/// Port for reading and writing services with their rosters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Fetch a service by identifier.
    ///
    /// Returns `None` when no service has that id.
    async fn find_by_id(&self, id: &ServiceId) -> Result<Option<Service>, ServiceRepositoryError>;

    /// Insert or replace a service together with its roster.
    ///
    /// Callers only pass values that already satisfy the location
    /// invariant. The write is all-or-nothing.
    async fn save(&self, service: &Service) -> Result<(), ServiceRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
///
/// Lookups find nothing and saves are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureServiceRepository;

#[async_trait]
impl ServiceRepository for FixtureServiceRepository {
    async fn find_by_id(
        &self,
        _id: &ServiceId,
    ) -> Result<Option<Service>, ServiceRepositoryError> {
        Ok(None)
    }

    async fn save(&self, _service: &Service) -> Result<(), ServiceRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{LocationId, ServiceDraft};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_repository_lookup_returns_none() {
        let repo = FixtureServiceRepository;
        let found = repo
            .find_by_id(&ServiceId::new(7))
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_repository_accepts_save() {
        let repo = FixtureServiceRepository;
        let service = Service::staffed(
            ServiceDraft {
                id: ServiceId::new(7),
                name: "Boat trip".to_owned(),
                location_id: LocationId::new(1),
            },
            &[],
        )
        .expect("empty roster is valid");
        repo.save(&service).await.expect("fixture save succeeds");
    }
}
