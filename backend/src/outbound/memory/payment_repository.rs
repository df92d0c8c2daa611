//! In-memory payment repository.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::Payment;
use crate::domain::ports::{PaymentRepository, PaymentRepositoryError, ReportFilter};

use super::poisoned;

/// Payment store that filters with [`ReportFilter::matches`].
#[derive(Debug, Default)]
pub struct InMemoryPaymentRepository {
    payments: RwLock<Vec<Payment>>,
}

impl InMemoryPaymentRepository {
    /// Build a repository holding `payments`.
    #[must_use]
    pub const fn new(payments: Vec<Payment>) -> Self {
        Self {
            payments: RwLock::new(payments),
        }
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn list_payments(
        &self,
        filter: &ReportFilter,
    ) -> Result<Vec<Payment>, PaymentRepositoryError> {
        let payments = self
            .payments
            .read()
            .map_err(|_| PaymentRepositoryError::query(poisoned("payment repository")))?;
        Ok(payments
            .iter()
            .filter(|payment| filter.matches(payment))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{MinorUnits, PaymentId, PaymentStatus, UserId};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn applies_filter() {
        let created_at = Utc
            .with_ymd_and_hms(2025, 6, 1, 8, 0, 0)
            .single()
            .expect("valid timestamp");
        let make = |id: i64| {
            Payment::new(
                PaymentId::new(id),
                MinorUnits::new(100),
                PaymentStatus::Paid,
                created_at,
                Some(created_at),
            )
            .expect("valid payment")
        };
        let repo = InMemoryPaymentRepository::new(vec![
            make(1).with_supplier(UserId::new(9)),
            make(2),
        ]);

        let filter = ReportFilter {
            supplier_id: Some(UserId::new(9)),
            ..ReportFilter::default()
        };
        let found = repo.list_payments(&filter).await.expect("list succeeds");
        assert_eq!(found.iter().map(Payment::id).collect::<Vec<_>>(), vec![PaymentId::new(1)]);
        assert_eq!(
            repo.list_payments(&ReportFilter::default())
                .await
                .expect("list succeeds")
                .len(),
            2
        );
    }
}
