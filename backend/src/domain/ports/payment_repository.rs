//! Port for reading payments that feed financial reports.
//!
//! Filtering belongs to the adapter so that storage-backed implementations
//! can push it down into their queries. [`ReportFilter::matches`] states the
//! selection rule in one place for adapters that filter in memory.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Payment, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by payment repository adapters.
    pub enum PaymentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "payment repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "payment repository query failed: {message}",
    }
}

/// Selection applied before payments are reduced into a report.
///
/// Every bound is optional; an empty filter selects every payment. The date
/// window is inclusive at both ends and applies to `created_at`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilter {
    /// Earliest creation instant to include.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,
    /// Latest creation instant to include.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
    /// Only payments attributed to this agency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agency_id: Option<UserId>,
    /// Only payments attributed to this supplier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<UserId>,
}

impl ReportFilter {
    /// Whether `payment` falls inside this selection.
    #[must_use]
    pub fn matches(&self, payment: &Payment) -> bool {
        let created_at = payment.created_at();
        self.from.is_none_or(|from| created_at >= from)
            && self.to.is_none_or(|to| created_at <= to)
            && self
                .agency_id
                .is_none_or(|agency| payment.agency_id() == Some(agency))
            && self
                .supplier_id
                .is_none_or(|supplier| payment.supplier_id() == Some(supplier))
    }
}

/// Port for payment retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// List every payment selected by `filter`.
    async fn list_payments(
        &self,
        filter: &ReportFilter,
    ) -> Result<Vec<Payment>, PaymentRepositoryError>;
}

/// Fixture implementation for tests that do not exercise payment storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePaymentRepository;

#[async_trait]
impl PaymentRepository for FixturePaymentRepository {
    async fn list_payments(
        &self,
        _filter: &ReportFilter,
    ) -> Result<Vec<Payment>, PaymentRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{MinorUnits, PaymentId, PaymentStatus};
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    fn day(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, day, 10, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    #[fixture]
    fn payment() -> Payment {
        Payment::new(
            PaymentId::new(1),
            MinorUnits::new(900),
            PaymentStatus::Pending,
            day(10),
            None,
        )
        .expect("valid payment")
        .with_agency(UserId::new(4))
    }

    #[rstest]
    fn empty_filter_selects_everything(payment: Payment) {
        assert!(ReportFilter::default().matches(&payment));
    }

    #[rstest]
    #[case(Some(10), Some(10), true)]
    #[case(Some(1), Some(9), false)]
    #[case(Some(11), None, false)]
    #[case(None, Some(10), true)]
    fn window_is_inclusive(
        payment: Payment,
        #[case] from: Option<u32>,
        #[case] to: Option<u32>,
        #[case] expected: bool,
    ) {
        let filter = ReportFilter {
            from: from.map(day),
            to: to.map(day),
            ..ReportFilter::default()
        };
        assert_eq!(filter.matches(&payment), expected);
    }

    #[rstest]
    fn party_filters_require_attribution(payment: Payment) {
        let by_agency = ReportFilter {
            agency_id: Some(UserId::new(4)),
            ..ReportFilter::default()
        };
        let by_other_agency = ReportFilter {
            agency_id: Some(UserId::new(5)),
            ..ReportFilter::default()
        };
        let by_supplier = ReportFilter {
            supplier_id: Some(UserId::new(4)),
            ..ReportFilter::default()
        };
        assert!(by_agency.matches(&payment));
        assert!(!by_other_agency.matches(&payment));
        assert!(!by_supplier.matches(&payment));
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_repository_lists_nothing() {
        let repo = FixturePaymentRepository;
        let payments = repo
            .list_payments(&ReportFilter::default())
            .await
            .expect("fixture lookup succeeds");
        assert!(payments.is_empty());
    }
}
