//! In-memory adapters for the driven ports.
//!
//! Each adapter keeps its state behind a single [`std::sync::RwLock`], so a
//! write replaces a whole value at once. A poisoned lock is reported as a
//! `Query` error rather than a panic.

mod payment_repository;
mod service_repository;
mod staff_directory;

pub use payment_repository::InMemoryPaymentRepository;
pub use service_repository::InMemoryServiceRepository;
pub use staff_directory::InMemoryStaffDirectory;

fn poisoned(store: &str) -> String {
    format!("{store} lock poisoned by an earlier panic")
}
