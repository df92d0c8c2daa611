//! Domain primitives, aggregates and services for the marketplace back office.
//!
//! Purpose: keep the rules that protect marketplace data (document check
//! digits, the location invariant between services and their staff, payment
//! aggregation) free of transport and storage concerns. Types are immutable
//! and document their invariants and serialisation contracts in Rustdoc.
//!
//! Public surface:
//! - `DomainError`: orchestration error payload shared by every service.
//! - `DocumentNumber`, `compute_check_digits`, `validate`, `generate`: CPF
//!   and CNPJ handling.
//! - `check_roster`, `RosterViolation`: the service staff location rule.
//! - `summarize`, `monthly_breakdown`, `build_report`: payment reporting.
//! - `ServiceRosterService`, `FinancialReportService`: driving-port
//!   implementations over the `ports` traits.

pub mod association;
pub mod document;
pub mod error;
pub mod financial_report_service;
pub mod ledger;
pub mod location;
pub mod payment;
pub mod ports;
pub mod service;
pub mod service_roster_service;
pub mod user;

pub use self::association::{RosterOffender, RosterViolation, StaffCandidate, check_roster};
pub use self::document::{
    CheckDigitContractError, DocumentKind, DocumentNumber, DocumentValidationError,
    compute_check_digits, generate, generate_with, validate,
};
pub use self::error::{DomainError, ErrorCode, DomainErrorValidationError};
pub use self::financial_report_service::FinancialReportService;
pub use self::ledger::{
    BucketTimezone, BucketTimezoneError, FinancialReport, FinancialReportSummary, LedgerError,
    MonthKey, MonthKeyError, MonthlyBucket, MonthlyData, build_report, monthly_breakdown,
    summarize,
};
pub use self::location::{Location, LocationId, LocationValidationError};
pub use self::payment::{MinorUnits, Payment, PaymentId, PaymentStatus, PaymentValidationError};
pub use self::service::{
    SERVICE_NAME_MAX, Service, ServiceDraft, ServiceId, ServiceValidationError,
};
pub use self::service_roster_service::ServiceRosterService;
pub use self::user::{USER_NAME_MAX, User, UserId, UserName, UserRole, UserValidationError};

/// Convenient orchestration result alias.
///
/// # Examples
/// ```
/// use backoffice::domain::{DomainResult, DomainError};
///
/// fn lookup() -> DomainResult<()> {
///     Err(DomainError::not_found("no such service"))
/// }
///
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, DomainError>;
