/// Shift model and database operations
///
/// A shift records one worked day: hours, the hourly wage for that day, and
/// the tips collected in cash and on card. Earnings are always derived from
/// those four fields and never stored.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE shifts (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     date DATE NOT NULL,
///     hours_worked NUMERIC(6, 2) NOT NULL CHECK (hours_worked >= 0),
///     hourly_wage NUMERIC(10, 2) NOT NULL CHECK (hourly_wage >= 0),
///     cash_tips NUMERIC(10, 2) NOT NULL CHECK (cash_tips >= 0),
///     credit_tips NUMERIC(10, 2) NOT NULL CHECK (credit_tips >= 0),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Every query is scoped by `user_id`; a shift owned by someone else behaves
/// exactly like a missing one.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A single shift record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Shift {
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Calendar day worked
    pub date: NaiveDate,

    pub hours_worked: Decimal,
    pub hourly_wage: Decimal,
    pub cash_tips: Decimal,
    pub credit_tips: Decimal,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shift {
    /// Cash plus credit tips
    pub fn tips(&self) -> Decimal {
        self.cash_tips + self.credit_tips
    }

    /// Hours times the wage for this shift
    pub fn wages(&self) -> Decimal {
        self.hours_worked * self.hourly_wage
    }

    /// `hours_worked * hourly_wage + cash_tips + credit_tips`
    pub fn total_earned(&self) -> Decimal {
        self.wages() + self.tips()
    }

    /// Tips earned per hour, or None for a zero-hour shift
    pub fn tips_per_hour(&self) -> Option<Decimal> {
        if self.hours_worked.is_zero() {
            None
        } else {
            self.tips().checked_div(self.hours_worked)
        }
    }

    /// Attaches the derived total for serialization
    pub fn with_earnings(self) -> ShiftWithEarnings {
        let total_earned = self.total_earned();
        ShiftWithEarnings {
            shift: self,
            total_earned,
        }
    }
}

/// A shift as returned by the API: the stored row plus `total_earned`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftWithEarnings {
    #[serde(flatten)]
    pub shift: Shift,
    pub total_earned: Decimal,
}

impl From<Shift> for ShiftWithEarnings {
    fn from(shift: Shift) -> Self {
        shift.with_earnings()
    }
}

/// Optional inclusive bounds on a shift's date
///
/// Either side may be omitted independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// No bounds at all
    pub const UNBOUNDED: Self = Self {
        start: None,
        end: None,
    };

    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

/// Create/update payload
///
/// Updates are full replacements, so the same shape serves both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ShiftInput {
    pub date: NaiveDate,

    #[validate(custom(function = "validate_non_negative"))]
    pub hours_worked: Decimal,

    #[serde(default)]
    #[validate(custom(function = "validate_non_negative"))]
    pub hourly_wage: Decimal,

    #[serde(default)]
    #[validate(custom(function = "validate_non_negative"))]
    pub cash_tips: Decimal,

    #[serde(default)]
    #[validate(custom(function = "validate_non_negative"))]
    pub credit_tips: Decimal,
}

fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut error = ValidationError::new("non_negative");
        error.message = Some("Must not be negative".into());
        return Err(error);
    }
    Ok(())
}

/// Lifetime earnings for one owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct OwnerTotal {
    pub user_id: Uuid,
    pub total: Decimal,
}

const SHIFT_COLUMNS: &str = "id, user_id, date, hours_worked, hourly_wage, cash_tips, credit_tips, created_at, updated_at";

impl Shift {
    pub async fn create(pool: &PgPool, user_id: Uuid, data: ShiftInput) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO shifts (user_id, date, hours_worked, hourly_wage, cash_tips, credit_tips)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {SHIFT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Shift>(&query)
            .bind(user_id)
            .bind(data.date)
            .bind(data.hours_worked)
            .bind(data.hourly_wage)
            .bind(data.cash_tips)
            .bind(data.credit_tips)
            .fetch_one(pool)
            .await
    }

    /// Finds a shift only if it belongs to `user_id`
    pub async fn find_by_id_and_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {SHIFT_COLUMNS} FROM shifts WHERE id = $1 AND user_id = $2");

        sqlx::query_as::<_, Shift>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// All of a user's shifts, most recent first
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        Self::list_by_user_in_range(pool, user_id, DateRange::UNBOUNDED).await
    }

    /// A user's shifts within inclusive date bounds, most recent first
    pub async fn list_by_user_in_range(
        pool: &PgPool,
        user_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!(
            r#"
            SELECT {SHIFT_COLUMNS}
            FROM shifts
            WHERE user_id = $1
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
            ORDER BY date DESC, created_at DESC, id DESC
            "#
        );

        sqlx::query_as::<_, Shift>(&query)
            .bind(user_id)
            .bind(range.start)
            .bind(range.end)
            .fetch_all(pool)
            .await
    }

    /// Replaces every editable field of an owned shift
    ///
    /// Returns None when the shift does not exist or belongs to someone else.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        data: ShiftInput,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE shifts
            SET date = $3, hours_worked = $4, hourly_wage = $5,
                cash_tips = $6, credit_tips = $7, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {SHIFT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Shift>(&query)
            .bind(id)
            .bind(user_id)
            .bind(data.date)
            .bind(data.hours_worked)
            .bind(data.hourly_wage)
            .bind(data.cash_tips)
            .bind(data.credit_tips)
            .fetch_optional(pool)
            .await
    }

    /// Deletes an owned shift, returning the removed row
    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            "DELETE FROM shifts WHERE id = $1 AND user_id = $2 RETURNING {SHIFT_COLUMNS}"
        );

        sqlx::query_as::<_, Shift>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Lifetime earnings per owner, aggregated by the database
    ///
    /// Users without shifts do not appear.
    pub async fn owner_totals(pool: &PgPool) -> Result<Vec<OwnerTotal>, sqlx::Error> {
        sqlx::query_as::<_, OwnerTotal>(
            r#"
            SELECT user_id,
                   SUM(hours_worked * hourly_wage + cash_tips + credit_tips) AS total
            FROM shifts
            GROUP BY user_id
            "#,
        )
        .fetch_all(pool)
        .await
    }
}
