//! Tests for the financial report service.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rstest::rstest;

use super::*;
use crate::domain::ports::{FixturePaymentRepository, MockPaymentRepository};
use crate::domain::{ErrorCode, MinorUnits, Payment, PaymentId, PaymentStatus, UserId};

fn at(month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, month, day, hour, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn payment(id: i64, amount: i64, status: PaymentStatus, created_at: DateTime<Utc>) -> Payment {
    Payment::new(
        PaymentId::new(id),
        MinorUnits::new(amount),
        status,
        created_at,
        None,
    )
    .expect("valid fixture payment")
}

#[rstest]
#[tokio::test]
async fn report_reduces_repository_payments() {
    let mut repo = MockPaymentRepository::new();
    repo.expect_list_payments().times(1).return_once(|_| {
        Ok(vec![
            payment(1, 1000, PaymentStatus::Paid, at(1, 5, 12)),
            payment(2, 500, PaymentStatus::Pending, at(2, 5, 12)),
        ])
    });

    let service = FinancialReportService::new(Arc::new(repo));
    let report = service
        .financial_report(&ReportFilter::default())
        .await
        .expect("report");

    assert_eq!(report.summary.total_payments, 2);
    assert_eq!(report.summary.total_paid_amount, MinorUnits::new(1000));
    assert_eq!(report.summary.total_pending_amount, MinorUnits::new(500));
    assert_eq!(report.summary.average_transaction_value, MinorUnits::new(750));
    assert_eq!(report.monthly.len(), 2);
}

#[rstest]
#[tokio::test]
async fn filter_is_passed_to_repository() {
    let filter = ReportFilter {
        from: Some(at(1, 1, 0)),
        to: Some(at(1, 31, 23)),
        agency_id: Some(UserId::new(8)),
        supplier_id: None,
    };
    let expected = filter.clone();
    let mut repo = MockPaymentRepository::new();
    repo.expect_list_payments()
        .withf(move |received: &ReportFilter| *received == expected)
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let service = FinancialReportService::new(Arc::new(repo));
    let report = service.financial_report(&filter).await.expect("report");
    assert_eq!(report, FinancialReport::default());
}

#[rstest]
#[tokio::test]
async fn inverted_window_is_rejected_before_reading() {
    let mut repo = MockPaymentRepository::new();
    repo.expect_list_payments().times(0);

    let service = FinancialReportService::new(Arc::new(repo));
    let error = service
        .financial_report(&ReportFilter {
            from: Some(at(3, 1, 0)),
            to: Some(at(2, 1, 0)),
            ..ReportFilter::default()
        })
        .await
        .expect_err("inverted window");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "report window starts after it ends");
}

#[rstest]
#[tokio::test]
async fn configured_offset_moves_month_boundary() {
    let mut repo = MockPaymentRepository::new();
    repo.expect_list_payments()
        .return_once(|_| Ok(vec![payment(1, 300, PaymentStatus::Paid, at(3, 1, 1))]));

    let brasilia = BucketTimezone::from_offset_minutes(-180).expect("valid offset");
    let service = FinancialReportService::with_timezone(Arc::new(repo), brasilia);
    let report = service
        .financial_report(&ReportFilter::default())
        .await
        .expect("report");
    let months: Vec<String> = report.monthly.keys().map(ToString::to_string).collect();
    assert_eq!(months, vec!["2025-02".to_owned()]);
}

#[rstest]
#[tokio::test]
async fn overflow_maps_to_invalid_request() {
    let mut repo = MockPaymentRepository::new();
    repo.expect_list_payments().return_once(|_| {
        Ok(vec![
            payment(1, i64::MAX, PaymentStatus::Paid, at(1, 1, 0)),
            payment(2, 1, PaymentStatus::Paid, at(1, 2, 0)),
        ])
    });

    let service = FinancialReportService::new(Arc::new(repo));
    let error = service
        .financial_report(&ReportFilter::default())
        .await
        .expect_err("overflow");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[case(PaymentRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(PaymentRepositoryError::query("bad column"), ErrorCode::InternalError)]
#[tokio::test]
async fn repository_errors_are_mapped(
    #[case] failure: PaymentRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockPaymentRepository::new();
    repo.expect_list_payments().return_once(move |_| Err(failure));

    let service = FinancialReportService::new(Arc::new(repo));
    let error = service
        .financial_report(&ReportFilter::default())
        .await
        .expect_err("repository failure");
    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn fixture_repository_yields_empty_report() {
    let service = FinancialReportService::new(Arc::new(FixturePaymentRepository));
    let report = service
        .financial_report(&ReportFilter::default())
        .await
        .expect("report");
    assert_eq!(report.summary.average_transaction_value, MinorUnits::ZERO);
}
