//! In-memory staff directory backed by registered users.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{StaffDirectory, StaffDirectoryError};
use crate::domain::{StaffCandidate, User, UserId};

use super::poisoned;

/// Staff directory over a fixed set of users.
#[derive(Debug, Default)]
pub struct InMemoryStaffDirectory {
    users: RwLock<HashMap<UserId, StaffCandidate>>,
}

impl InMemoryStaffDirectory {
    /// Build a directory from registered users.
    pub fn from_users<'a>(users: impl IntoIterator<Item = &'a User>) -> Self {
        Self::from_candidates(users.into_iter().map(StaffCandidate::from))
    }

    /// Build a directory from candidate projections.
    pub fn from_candidates(candidates: impl IntoIterator<Item = StaffCandidate>) -> Self {
        let users = candidates
            .into_iter()
            .map(|candidate| (candidate.id, candidate))
            .collect();
        Self {
            users: RwLock::new(users),
        }
    }

    /// Register or replace a user.
    ///
    /// # Errors
    ///
    /// Returns [`StaffDirectoryError::Query`] if the store lock is poisoned.
    pub fn upsert(&self, user: &User) -> Result<(), StaffDirectoryError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| StaffDirectoryError::query(poisoned("staff directory")))?;
        users.insert(user.id(), StaffCandidate::from(user));
        Ok(())
    }
}

#[async_trait]
impl StaffDirectory for InMemoryStaffDirectory {
    async fn find_candidates(
        &self,
        ids: &[UserId],
    ) -> Result<Vec<StaffCandidate>, StaffDirectoryError> {
        let users = self
            .users
            .read()
            .map_err(|_| StaffDirectoryError::query(poisoned("staff directory")))?;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }
}
