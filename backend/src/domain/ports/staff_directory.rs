//! Port for resolving proposed staff into location-aware candidates.
//!
//! Roster writes arrive as bare user ids. The [`StaffDirectory`] turns them
//! into [`StaffCandidate`] projections so the association check can run on
//! plain values without touching storage.

use async_trait::async_trait;

use crate::domain::{StaffCandidate, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by staff directory adapters.
    pub enum StaffDirectoryError {
        /// Directory connection could not be established.
        Connection { message: String } =>
            "staff directory connection failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } =>
            "staff directory query failed: {message}",
    }
}

/// Port for looking up users proposed for a service roster.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StaffDirectory: Send + Sync {
    /// Resolve the given ids.
    ///
    /// Ids with no matching user are left out of the result; callers compare
    /// the returned ids with the request to detect unknown users. Order is
    /// not significant.
    async fn find_candidates(
        &self,
        ids: &[UserId],
    ) -> Result<Vec<StaffCandidate>, StaffDirectoryError>;
}

/// Fixture implementation for tests that do not exercise staff lookups.
///
/// Knows no users, so every requested id resolves to nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStaffDirectory;

#[async_trait]
impl StaffDirectory for FixtureStaffDirectory {
    async fn find_candidates(
        &self,
        _ids: &[UserId],
    ) -> Result<Vec<StaffCandidate>, StaffDirectoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_directory_knows_nobody() {
        let directory = FixtureStaffDirectory;
        let found = directory
            .find_candidates(&[UserId::new(1), UserId::new(2)])
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_empty());
    }

    #[rstest]
    fn errors_render_adapter_message() {
        let err = StaffDirectoryError::connection("pool closed");
        assert_eq!(
            err.to_string(),
            "staff directory connection failed: pool closed"
        );
    }
}
