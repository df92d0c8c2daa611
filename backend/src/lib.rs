//! Back-office library for a marketplace: CPF and CNPJ validation, the rule
//! that keeps service staff in the service's location, and payment
//! reporting.
//!
//! The `domain` module holds entities, ports and services. `outbound` holds
//! driven adapters, `config` the OrthoConfig settings and `cli` the command
//! surface used by the `backoffice` binary.

pub mod cli;
pub mod config;
pub mod domain;
pub mod outbound;
