//! Deterministic marketplace generation from seed definitions.
//!
//! One `ChaCha8Rng` seeded from the definition drives every choice, in a
//! fixed order: users, then services, then payments. The same registry and
//! seed therefore always produce an identical dataset.

use backoffice::domain::{
    DocumentKind, Location, LocationId, MinorUnits, MonthKey, Payment, PaymentId, PaymentStatus,
    Service, ServiceDraft, ServiceId, StaffCandidate, USER_NAME_MAX, User, UserId, UserRole,
    generate_with,
};
use chrono::{DateTime, Months, TimeDelta, TimeZone, Utc};
use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::PT_BR;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::registry::{SeedDefinition, SeedRegistry};
use crate::seed::ExampleMarketplace;

/// Percentage of users generated without a registered location.
const UNPLACED_PERCENT: u32 = 10;

/// Most staff placed on one service.
const MAX_STAFF_PER_SERVICE: usize = 3;

/// Payment amounts, in centavos.
const MIN_AMOUNT: i64 = 5_000;
const MAX_AMOUNT: i64 = 250_000;

/// Longest delay between creation and settlement, in minutes.
const MAX_SETTLEMENT_MINUTES: i64 = 3 * 24 * 60;

/// Generates an example marketplace from a seed definition.
///
/// The dataset contains:
///
/// - Every registry location, numbered from 1
/// - Users with a role mix dominated by customers; agencies carry a CNPJ and
///   everyone else a CPF, each with valid check digits
/// - Services staffed by up to three suppliers from the service's location
/// - Payments created inside the seed's month window, attributed to an
///   agency and a supplier when the dataset has them
///
/// # Errors
///
/// Returns [`GenerationError`] if a generated value is rejected by the
/// back-office constructors or the month window does not fit the calendar.
///
/// # Example
///
/// ```
/// use example_data::{SeedRegistry, generate_marketplace};
///
/// let json = r#"{
///     "version": 1,
///     "firstMonth": "2025-01",
///     "locations": [{"city": "Recife", "state": "PE"}],
///     "serviceNames": ["Airport transfer"],
///     "seeds": [{"name": "test", "seed": 42, "userCount": 6, "serviceCount": 2,
///                "paymentCount": 10, "months": 3}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid");
/// let seed_def = registry.find_seed("test").expect("found");
/// let first = generate_marketplace(&registry, seed_def).expect("generated");
/// let second = generate_marketplace(&registry, seed_def).expect("generated");
///
/// assert_eq!(first.users.len(), 6);
/// assert_eq!(first, second);
/// ```
pub fn generate_marketplace(
    registry: &SeedRegistry,
    seed_def: &SeedDefinition,
) -> Result<ExampleMarketplace, GenerationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed_def.seed());
    let locations = registry.locations().to_vec();

    let users = (0..seed_def.user_count())
        .map(|index| generate_user(&mut rng, index, &locations))
        .collect::<Result<Vec<_>, _>>()?;

    let services = (0..seed_def.service_count())
        .map(|index| generate_service(&mut rng, index, registry, &users))
        .collect::<Result<Vec<_>, _>>()?;

    let window = PaymentWindow::new(registry.first_month(), seed_def.months())?;
    let agencies: Vec<UserId> = ids_with_role(&users, UserRole::Agency);
    let suppliers: Vec<UserId> = ids_with_role(&users, UserRole::Supplier);
    let payments = (0..seed_def.payment_count())
        .map(|index| generate_payment(&mut rng, index, &window, &agencies, &suppliers))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ExampleMarketplace {
        locations,
        users,
        services,
        payments,
    })
}

/// One-based identifier for the item at `index`.
fn ordinal(index: usize) -> Option<i64> {
    i64::try_from(index).ok()?.checked_add(1)
}

fn ids_with_role(users: &[User], role: UserRole) -> Vec<UserId> {
    users
        .iter()
        .filter(|user| user.role() == role)
        .map(User::id)
        .collect()
}

fn pick_role(rng: &mut ChaCha8Rng) -> UserRole {
    match rng.random_range(0..100_u32) {
        0..50 => UserRole::Customer,
        50..75 => UserRole::Supplier,
        75..90 => UserRole::Agency,
        _ => UserRole::Admin,
    }
}

fn generate_user(
    rng: &mut ChaCha8Rng,
    index: usize,
    locations: &[Location],
) -> Result<User, GenerationError> {
    let invalid = |message: String| GenerationError::InvalidUser { index, message };
    let id = ordinal(index)
        .map(UserId::new)
        .ok_or_else(|| invalid("too many users".to_owned()))?;

    let role = pick_role(rng);
    let first: String = FirstName(PT_BR).fake_with_rng(rng);
    let last: String = LastName(PT_BR).fake_with_rng(rng);
    let full_name = match role {
        UserRole::Agency => format!("{last} Viagens"),
        UserRole::Admin | UserRole::Supplier | UserRole::Customer => format!("{first} {last}"),
    };
    let name: String = full_name.chars().take(USER_NAME_MAX).collect();

    let location_id = if rng.random_ratio(UNPLACED_PERCENT, 100) {
        None
    } else {
        locations.choose(rng).map(Location::id)
    };

    let kind = match role {
        UserRole::Agency => DocumentKind::Cnpj,
        UserRole::Admin | UserRole::Supplier | UserRole::Customer => DocumentKind::Cpf,
    };
    let document = generate_with(kind, rng);

    User::register(id, &name, role, location_id, &document, Some(kind))
        .map_err(|e| invalid(e.to_string()))
}

fn generate_service(
    rng: &mut ChaCha8Rng,
    index: usize,
    registry: &SeedRegistry,
    users: &[User],
) -> Result<Service, GenerationError> {
    let invalid = |message: String| GenerationError::InvalidService { index, message };
    let id = ordinal(index)
        .map(ServiceId::new)
        .ok_or_else(|| invalid("too many services".to_owned()))?;
    let location_id: LocationId = registry
        .locations()
        .choose(rng)
        .map(Location::id)
        .ok_or_else(|| invalid("registry has no locations".to_owned()))?;
    let name = registry
        .service_names()
        .choose(rng)
        .cloned()
        .ok_or_else(|| invalid("registry has no service names".to_owned()))?;

    let mut local_staff: Vec<StaffCandidate> = users
        .iter()
        .filter(|user| user.role() == UserRole::Supplier)
        .filter(|user| user.location_id() == Some(location_id))
        .map(StaffCandidate::from)
        .collect();
    local_staff.shuffle(rng);
    let staff_count = rng.random_range(0..=MAX_STAFF_PER_SERVICE.min(local_staff.len()));
    local_staff.truncate(staff_count);

    let draft = ServiceDraft {
        id,
        name,
        location_id,
    };
    Service::staffed(draft, &local_staff).map_err(|e| invalid(e.to_string()))
}

/// Half-open creation window `[start, start + span_seconds)`.
struct PaymentWindow {
    start: DateTime<Utc>,
    span_seconds: i64,
}

impl PaymentWindow {
    fn new(first_month: MonthKey, months: u32) -> Result<Self, GenerationError> {
        let out_of_range = || GenerationError::WindowOutOfRange {
            first_month: first_month.to_string(),
            months,
        };
        let start = Utc
            .with_ymd_and_hms(first_month.year(), first_month.month(), 1, 0, 0, 0)
            .single()
            .ok_or_else(out_of_range)?;
        let end = start
            .checked_add_months(Months::new(months))
            .ok_or_else(out_of_range)?;
        let span_seconds = end.signed_duration_since(start).num_seconds();
        if span_seconds <= 0 {
            return Err(out_of_range());
        }
        Ok(Self {
            start,
            span_seconds,
        })
    }

    fn sample(&self, rng: &mut ChaCha8Rng) -> Option<DateTime<Utc>> {
        let offset = TimeDelta::try_seconds(rng.random_range(0..self.span_seconds))?;
        self.start.checked_add_signed(offset)
    }
}

fn pick_status(rng: &mut ChaCha8Rng) -> PaymentStatus {
    match rng.random_range(0..10_u32) {
        0..6 => PaymentStatus::Paid,
        6..9 => PaymentStatus::Pending,
        _ => PaymentStatus::Cancelled,
    }
}

fn generate_payment(
    rng: &mut ChaCha8Rng,
    index: usize,
    window: &PaymentWindow,
    agencies: &[UserId],
    suppliers: &[UserId],
) -> Result<Payment, GenerationError> {
    let invalid = |message: String| GenerationError::InvalidPayment { index, message };
    let id = ordinal(index)
        .map(PaymentId::new)
        .ok_or_else(|| invalid("too many payments".to_owned()))?;
    let created_at = window
        .sample(rng)
        .ok_or_else(|| invalid("creation time out of range".to_owned()))?;
    let status = pick_status(rng);
    let amount = MinorUnits::new(rng.random_range(MIN_AMOUNT..=MAX_AMOUNT));
    let paid_at = match status {
        PaymentStatus::Paid => {
            let delay = TimeDelta::try_minutes(rng.random_range(1..=MAX_SETTLEMENT_MINUTES))
                .ok_or_else(|| invalid("settlement delay out of range".to_owned()))?;
            created_at.checked_add_signed(delay)
        }
        PaymentStatus::Pending | PaymentStatus::Cancelled => None,
    };

    let mut payment = Payment::new(id, amount, status, created_at, paid_at)
        .map_err(|e| invalid(e.to_string()))?;
    if let Some(agency) = agencies.choose(rng) {
        payment = payment.with_agency(*agency);
    }
    if let Some(supplier) = suppliers.choose(rng) {
        payment = payment.with_supplier(*supplier);
    }
    Ok(payment)
}
