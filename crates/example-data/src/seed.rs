//! Generated marketplace dataset.
//!
//! Values are real back-office domain types, so everything in a dataset has
//! already passed the same validation the services apply.

use backoffice::domain::{Location, Payment, Service, User, UserRole};
use serde::Serialize;

/// A generated example marketplace.
///
/// Every service is staffed only with users registered in the service's
/// location, and every payment falls inside the seed's month window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleMarketplace {
    /// Locations copied from the registry.
    pub locations: Vec<Location>,
    /// Users with checksum-valid documents.
    pub users: Vec<User>,
    /// Services with location-consistent rosters.
    pub services: Vec<Service>,
    /// Payments attributed to agencies and suppliers where available.
    pub payments: Vec<Payment>,
}

impl ExampleMarketplace {
    /// Users holding `role`, in generation order.
    pub fn users_with_role(&self, role: UserRole) -> impl Iterator<Item = &User> {
        self.users.iter().filter(move |user| user.role() == role)
    }
}
