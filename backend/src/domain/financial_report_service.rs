//! Financial report domain service.
//!
//! Implements [`FinancialReportQuery`] by reading payments through the
//! [`PaymentRepository`] and reducing them with the ledger.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::domain::ports::{
    FinancialReportQuery, PaymentRepository, PaymentRepositoryError, ReportFilter,
};
use crate::domain::{BucketTimezone, DomainError, FinancialReport, LedgerError, build_report};

fn map_repository_error(error: PaymentRepositoryError) -> DomainError {
    match error {
        PaymentRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("payment repository unavailable: {message}"))
        }
        PaymentRepositoryError::Query { message } => {
            DomainError::internal(format!("payment repository error: {message}"))
        }
    }
}

fn map_ledger_error(error: &LedgerError) -> DomainError {
    match error {
        LedgerError::AmountOverflow => DomainError::invalid_request(format!(
            "{error}; narrow the report filter"
        )),
    }
}

fn validate_filter(filter: &ReportFilter) -> Result<(), DomainError> {
    match (filter.from, filter.to) {
        (Some(from), Some(to)) if from > to => Err(DomainError::invalid_request(
            "report window starts after it ends",
        )
        .with_details(json!({ "from": from, "to": to }))),
        _ => Ok(()),
    }
}

/// Financial report service implementing the query driving port.
#[derive(Clone)]
pub struct FinancialReportService<P> {
    payment_repo: Arc<P>,
    timezone: BucketTimezone,
}

impl<P> FinancialReportService<P> {
    /// Create a service bucketing months in UTC.
    pub fn new(payment_repo: Arc<P>) -> Self {
        Self::with_timezone(payment_repo, BucketTimezone::utc())
    }

    /// Create a service bucketing months in `timezone`.
    pub const fn with_timezone(payment_repo: Arc<P>, timezone: BucketTimezone) -> Self {
        Self {
            payment_repo,
            timezone,
        }
    }
}

#[async_trait]
impl<P> FinancialReportQuery for FinancialReportService<P>
where
    P: PaymentRepository,
{
    async fn financial_report(&self, filter: &ReportFilter) -> Result<FinancialReport, DomainError> {
        validate_filter(filter)?;

        let payments = self
            .payment_repo
            .list_payments(filter)
            .await
            .map_err(map_repository_error)?;
        let report = build_report(&payments, self.timezone).map_err(|err| map_ledger_error(&err))?;

        debug!(
            payments = report.summary.total_payments,
            months = report.monthly.len(),
            "financial report built"
        );
        Ok(report)
    }
}

#[cfg(test)]
#[path = "financial_report_service_tests.rs"]
mod tests;
