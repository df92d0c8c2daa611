//! Financial aggregation over payment snapshots.
//!
//! The ledger reduces a caller-filtered list of payments into the summary
//! and monthly series shown on the admin dashboard. It never filters, reads
//! or writes anything itself, and the same input always yields the same
//! output.
//!
//! All arithmetic stays in integer minor units. Sums are checked, and the
//! average is a truncating integer division guarded against an empty input.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use super::{MinorUnits, Payment, PaymentStatus};

/// Seconds in one minute, for offset conversion.
const SECONDS_PER_MINUTE: i32 = 60;

/// Failures while reducing payments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// A running total exceeded the range of [`MinorUnits`].
    #[error("payment totals exceed the representable amount range")]
    AmountOverflow,
}

/// Rejected bucket timezone offsets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("bucket offset of {minutes} minutes is outside ±24h")]
pub struct BucketTimezoneError {
    /// Rejected offset in minutes east of UTC.
    pub minutes: i32,
}

/// Timezone used to decide which calendar month a payment belongs to.
///
/// Month boundaries never depend on the host locale. UTC is the default;
/// deployments may pin a fixed offset such as Brasília time (UTC−03:00).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketTimezone(FixedOffset);

impl BucketTimezone {
    /// Bucket on UTC calendar months.
    #[must_use]
    pub fn utc() -> Self {
        Self(Utc.fix())
    }

    /// Bucket on calendar months at a fixed offset east of UTC.
    ///
    /// # Errors
    ///
    /// Returns [`BucketTimezoneError`] when the offset is a day or more.
    ///
    /// # Examples
    /// ```
    /// use backoffice::domain::BucketTimezone;
    ///
    /// assert!(BucketTimezone::from_offset_minutes(-180).is_ok());
    /// assert!(BucketTimezone::from_offset_minutes(24 * 60).is_err());
    /// ```
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, BucketTimezoneError> {
        minutes
            .checked_mul(SECONDS_PER_MINUTE)
            .and_then(FixedOffset::east_opt)
            .map(Self)
            .ok_or(BucketTimezoneError { minutes })
    }

    /// Underlying offset.
    #[must_use]
    pub const fn offset(self) -> FixedOffset {
        self.0
    }
}

impl Default for BucketTimezone {
    fn default() -> Self {
        Self::utc()
    }
}

/// Calendar month key rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

/// Rejected `YYYY-MM` strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("month key must look like YYYY-MM, got {value:?}")]
pub struct MonthKeyError {
    /// Rejected input.
    pub value: String,
}

impl MonthKey {
    /// Build a key from a year and a 1-based month.
    ///
    /// # Errors
    ///
    /// Returns [`MonthKeyError`] when the month is outside `1..=12` or the
    /// year is outside `0..=9999`.
    pub fn new(year: i32, month: u32) -> Result<Self, MonthKeyError> {
        if (1..=12).contains(&month) && (0..=9999).contains(&year) {
            Ok(Self { year, month })
        } else {
            Err(MonthKeyError {
                value: format!("{year}-{month}"),
            })
        }
    }

    /// Month containing `payment.created_at()` in `timezone`.
    #[must_use]
    pub fn of(payment: &Payment, timezone: BucketTimezone) -> Self {
        let local = payment.created_at().with_timezone(&timezone.offset());
        Self {
            year: local.year(),
            month: local.month(),
        }
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Calendar month, 1-based.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || MonthKeyError {
            value: value.to_owned(),
        };
        let (year, month) = value.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl From<MonthKey> for String {
    fn from(value: MonthKey) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for MonthKey {
    type Error = MonthKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Totals for one calendar month, across every status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBucket {
    /// Sum of amounts created in the month.
    pub total_amount: MinorUnits,
    /// Number of payments created in the month.
    pub transaction_count: u64,
}

/// Monthly buckets in chronological order.
pub type MonthlyData = BTreeMap<MonthKey, MonthlyBucket>;

/// Counts and sums partitioned by payment status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReportSummary {
    /// Number of payments of any status.
    pub total_payments: u64,
    /// Number of paid payments.
    pub paid_payments: u64,
    /// Number of pending payments.
    pub pending_payments: u64,
    /// Number of cancelled payments.
    pub cancelled_payments: u64,
    /// Sum over every status.
    pub total_amount: MinorUnits,
    /// Sum over paid payments.
    pub total_paid_amount: MinorUnits,
    /// Sum over pending payments.
    pub total_pending_amount: MinorUnits,
    /// Sum over cancelled payments.
    pub total_cancelled_amount: MinorUnits,
    /// `total_amount / total_payments`, truncated; zero without payments.
    pub average_transaction_value: MinorUnits,
}

/// Summary plus monthly series, as served to the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReport {
    /// Status-partitioned totals.
    pub summary: FinancialReportSummary,
    /// Totals per creation month.
    pub monthly: MonthlyData,
}

/// Reduce payments into a status-partitioned summary.
///
/// # Errors
///
/// Returns [`LedgerError::AmountOverflow`] when a sum leaves the `i64` range.
///
/// # Examples
/// ```
/// use backoffice::domain::summarize;
///
/// let summary = summarize(&[]).expect("empty input");
/// assert_eq!(summary.total_payments, 0);
/// assert_eq!(summary.average_transaction_value.get(), 0);
/// ```
pub fn summarize(payments: &[Payment]) -> Result<FinancialReportSummary, LedgerError> {
    let mut summary = FinancialReportSummary::default();
    for payment in payments {
        let amount = payment.amount();
        summary.total_payments += 1;
        summary.total_amount = add(summary.total_amount, amount)?;
        let (count, sum) = match payment.status() {
            PaymentStatus::Paid => (&mut summary.paid_payments, &mut summary.total_paid_amount),
            PaymentStatus::Pending => (
                &mut summary.pending_payments,
                &mut summary.total_pending_amount,
            ),
            PaymentStatus::Cancelled => (
                &mut summary.cancelled_payments,
                &mut summary.total_cancelled_amount,
            ),
        };
        *count += 1;
        *sum = add(*sum, amount)?;
    }
    summary.average_transaction_value = average(summary.total_amount, summary.total_payments);
    Ok(summary)
}

/// Bucket payments by the calendar month of `created_at` in `timezone`.
///
/// Every status is included.
///
/// # Errors
///
/// Returns [`LedgerError::AmountOverflow`] when a monthly sum leaves the
/// `i64` range.
pub fn monthly_breakdown(
    payments: &[Payment],
    timezone: BucketTimezone,
) -> Result<MonthlyData, LedgerError> {
    let mut monthly = MonthlyData::new();
    for payment in payments {
        let bucket = monthly.entry(MonthKey::of(payment, timezone)).or_default();
        bucket.total_amount = add(bucket.total_amount, payment.amount())?;
        bucket.transaction_count += 1;
    }
    Ok(monthly)
}

/// Build the full dashboard report.
///
/// # Errors
///
/// Returns [`LedgerError`] from either reduction.
pub fn build_report(
    payments: &[Payment],
    timezone: BucketTimezone,
) -> Result<FinancialReport, LedgerError> {
    Ok(FinancialReport {
        summary: summarize(payments)?,
        monthly: monthly_breakdown(payments, timezone)?,
    })
}

fn add(total: MinorUnits, amount: MinorUnits) -> Result<MinorUnits, LedgerError> {
    total.checked_add(amount).ok_or(LedgerError::AmountOverflow)
}

fn average(total: MinorUnits, count: u64) -> MinorUnits {
    i64::try_from(count)
        .ok()
        .and_then(|divisor| total.get().checked_div(divisor))
        .map_or(MinorUnits::ZERO, MinorUnits::new)
}
