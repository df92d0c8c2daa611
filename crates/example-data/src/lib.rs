//! Deterministic example marketplace data for back-office demonstrations.
//!
//! This crate generates believable, reproducible marketplace datasets from a
//! JSON seed registry. Values are built with the `backoffice` domain
//! constructors, so generated documents carry valid check digits and every
//! service roster satisfies the location rule.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading seed registries from JSON files
//! - Deterministic generation of locations, users, services and payments
//!   from named seeds
//! - A small CLI (`example-data-generate`) that prints a dataset as JSON
//!
//! # Example
//!
//! ```
//! use example_data::{SeedRegistry, generate_marketplace};
//!
//! let json = r#"{
//!     "version": 1,
//!     "firstMonth": "2025-01",
//!     "locations": [{"city": "Recife", "state": "PE"}, {"city": "Natal", "state": "RN"}],
//!     "serviceNames": ["Airport transfer", "Boat trip"],
//!     "seeds": [{"name": "test-seed", "seed": 42, "userCount": 8, "serviceCount": 3,
//!                "paymentCount": 12, "months": 4}]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed_def = registry.find_seed("test-seed").expect("seed exists");
//! let dataset = generate_marketplace(&registry, seed_def).expect("generation succeeds");
//!
//! assert_eq!(dataset.users.len(), 8);
//! assert_eq!(dataset.payments.len(), 12);
//! ```

mod error;
pub mod generate_cli;
mod generator;
mod registry;
mod seed;

pub use error::{GenerationError, RegistryError};
pub use generator::generate_marketplace;
pub use registry::{SeedDefinition, SeedRegistry};
pub use seed::ExampleMarketplace;
