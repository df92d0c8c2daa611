//! Payment records consumed by financial reporting.
//!
//! Amounts are integer minor currency units (centavos). Nothing in the
//! domain converts them to floating point; display formatting belongs to
//! the presentation layer.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Amount of money in minor currency units.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MinorUnits(i64);

impl MinorUnits {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Wrap a raw minor-unit amount.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw minor-unit amount.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Add two amounts, returning `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(sum) => Some(Self(sum)),
            None => None,
        }
    }
}

impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric payment identifier assigned by persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(i64);

impl PaymentId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// Lifecycle status of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Awaiting confirmation from the payment provider.
    Pending,
    /// Settled.
    Paid,
    /// Abandoned or refunded.
    Cancelled,
}

/// Validation errors returned by [`Payment::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentValidationError {
    /// Amount was below zero.
    #[error("payment amount must not be negative, got {amount}")]
    NegativeAmount {
        /// Rejected amount.
        amount: MinorUnits,
    },
    /// Settlement was recorded before creation.
    #[error("payment cannot be paid at {paid_at} before it was created at {created_at}")]
    PaidBeforeCreated {
        /// Creation timestamp.
        created_at: DateTime<Utc>,
        /// Settlement timestamp.
        paid_at: DateTime<Utc>,
    },
}

/// A payment snapshot as read for reporting.
///
/// ## Invariants
/// - `amount` is non-negative.
/// - `paid_at`, when present, is not earlier than `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "PaymentDto", into = "PaymentDto")]
pub struct Payment {
    id: PaymentId,
    amount: MinorUnits,
    status: PaymentStatus,
    created_at: DateTime<Utc>,
    paid_at: Option<DateTime<Utc>>,
    agency_id: Option<UserId>,
    supplier_id: Option<UserId>,
}

impl Payment {
    /// Validate and build a payment.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentValidationError`] when an invariant does not hold.
    pub fn new(
        id: PaymentId,
        amount: MinorUnits,
        status: PaymentStatus,
        created_at: DateTime<Utc>,
        paid_at: Option<DateTime<Utc>>,
    ) -> Result<Self, PaymentValidationError> {
        if amount < MinorUnits::ZERO {
            return Err(PaymentValidationError::NegativeAmount { amount });
        }
        if let Some(paid) = paid_at.filter(|paid| *paid < created_at) {
            return Err(PaymentValidationError::PaidBeforeCreated {
                created_at,
                paid_at: paid,
            });
        }
        Ok(Self {
            id,
            amount,
            status,
            created_at,
            paid_at,
            agency_id: None,
            supplier_id: None,
        })
    }

    /// Attribute the sale to an agency.
    #[must_use]
    pub const fn with_agency(mut self, agency_id: UserId) -> Self {
        self.agency_id = Some(agency_id);
        self
    }

    /// Attribute the sale to a supplier.
    #[must_use]
    pub const fn with_supplier(mut self, supplier_id: UserId) -> Self {
        self.supplier_id = Some(supplier_id);
        self
    }

    /// Payment identifier.
    #[must_use]
    pub const fn id(&self) -> PaymentId {
        self.id
    }

    /// Amount in minor units.
    #[must_use]
    pub const fn amount(&self) -> MinorUnits {
        self.amount
    }

    /// Lifecycle status.
    #[must_use]
    pub const fn status(&self) -> PaymentStatus {
        self.status
    }

    /// Creation timestamp; monthly reporting buckets on this.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Settlement timestamp, when paid.
    #[must_use]
    pub const fn paid_at(&self) -> Option<DateTime<Utc>> {
        self.paid_at
    }

    /// Agency the sale is attributed to.
    #[must_use]
    pub const fn agency_id(&self) -> Option<UserId> {
        self.agency_id
    }

    /// Supplier the sale is attributed to.
    #[must_use]
    pub const fn supplier_id(&self) -> Option<UserId> {
        self.supplier_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentDto {
    id: PaymentId,
    amount: MinorUnits,
    status: PaymentStatus,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    paid_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    agency_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    supplier_id: Option<UserId>,
}

impl From<Payment> for PaymentDto {
    fn from(value: Payment) -> Self {
        Self {
            id: value.id,
            amount: value.amount,
            status: value.status,
            created_at: value.created_at,
            paid_at: value.paid_at,
            agency_id: value.agency_id,
            supplier_id: value.supplier_id,
        }
    }
}

impl TryFrom<PaymentDto> for Payment {
    type Error = PaymentValidationError;

    fn try_from(value: PaymentDto) -> Result<Self, Self::Error> {
        let payment = Self::new(
            value.id,
            value.amount,
            value.status,
            value.created_at,
            value.paid_at,
        )?;
        Ok(Self {
            agency_id: value.agency_id,
            supplier_id: value.supplier_id,
            ..payment
        })
    }
}
