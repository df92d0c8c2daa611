//! Driving port for the admin financial dashboard.

use async_trait::async_trait;

use crate::domain::{DomainError, FinancialReport};

use super::ReportFilter;

/// Driving port for financial report reads.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() -> Result<(), backoffice::domain::DomainError> {
/// use backoffice::domain::ports::{FinancialReportQuery, FixtureFinancialReportQuery, ReportFilter};
///
/// let report = FixtureFinancialReportQuery
///     .financial_report(&ReportFilter::default())
///     .await?;
/// assert_eq!(report.summary.total_payments, 0);
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FinancialReportQuery: Send + Sync {
    /// Build the summary and monthly series for payments selected by
    /// `filter`.
    ///
    /// # Errors
    ///
    /// Returns `invalid_request` for an inverted date window or totals that
    /// overflow, and `service_unavailable`/`internal_error` when payments
    /// cannot be read.
    async fn financial_report(&self, filter: &ReportFilter) -> Result<FinancialReport, DomainError>;
}

/// Fixture query returning an empty report.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFinancialReportQuery;

#[async_trait]
impl FinancialReportQuery for FixtureFinancialReportQuery {
    async fn financial_report(&self, _filter: &ReportFilter) -> Result<FinancialReport, DomainError> {
        Ok(FinancialReport::default())
    }
}
