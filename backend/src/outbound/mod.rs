//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: process-local adapters used by the CLI, seeding checks and
//!   integration tests.
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod memory;
