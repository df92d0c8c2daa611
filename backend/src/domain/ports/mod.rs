//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`StaffDirectory`, `ServiceRepository`, `PaymentRepository`)
//! are implemented by outbound adapters. Driving ports
//! (`ServiceRosterCommand`, `FinancialReportQuery`) are implemented by the
//! domain services and consumed by inbound adapters such as the CLI.

mod macros;
pub(crate) use macros::define_port_error;

mod financial_report_query;
mod payment_repository;
mod service_repository;
mod service_roster_command;
mod staff_directory;

#[cfg(test)]
pub use financial_report_query::MockFinancialReportQuery;
pub use financial_report_query::{FinancialReportQuery, FixtureFinancialReportQuery};
#[cfg(test)]
pub use payment_repository::MockPaymentRepository;
pub use payment_repository::{
    FixturePaymentRepository, PaymentRepository, PaymentRepositoryError, ReportFilter,
};
#[cfg(test)]
pub use service_repository::MockServiceRepository;
pub use service_repository::{
    FixtureServiceRepository, ServiceRepository, ServiceRepositoryError,
};
#[cfg(test)]
pub use service_roster_command::MockServiceRosterCommand;
pub use service_roster_command::{
    CreateServiceRequest, FixtureServiceRosterCommand, ServiceRosterCommand,
    UpdateServiceRequest,
};
#[cfg(test)]
pub use staff_directory::MockStaffDirectory;
pub use staff_directory::{FixtureStaffDirectory, StaffDirectory, StaffDirectoryError};
