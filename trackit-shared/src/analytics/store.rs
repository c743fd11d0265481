/// Record store seam
///
/// The engine only ever reads. It needs two things from a store: one user's
/// shifts within optional date bounds, and every user's lifetime total.
/// Creating, editing and deleting shifts happens elsewhere
/// (`models::shift::Shift`).

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AnalyticsError, AnalyticsResult};
use crate::models::shift::{DateRange, OwnerTotal, Shift};

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// A user's shifts inside `range`, most recent first
    async fn list_records(&self, user_id: Uuid, range: DateRange) -> AnalyticsResult<Vec<Shift>>;

    /// Lifetime total per user that owns at least one shift
    ///
    /// Implementations should aggregate where the data lives rather than
    /// shipping every record to the caller.
    async fn owner_totals(&self) -> AnalyticsResult<Vec<OwnerTotal>>;
}

/// PostgreSQL-backed store
///
/// `owner_totals` is a single `GROUP BY` query, so the population ranking
/// never loads the shifts table into memory.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn list_records(&self, user_id: Uuid, range: DateRange) -> AnalyticsResult<Vec<Shift>> {
        Ok(Shift::list_by_user_in_range(&self.pool, user_id, range).await?)
    }

    async fn owner_totals(&self) -> AnalyticsResult<Vec<OwnerTotal>> {
        Ok(Shift::owner_totals(&self.pool).await?)
    }
}

/// In-process store for tests and fixtures
///
/// Can be switched into a failing mode to exercise error propagation.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    shifts: RwLock<Vec<Shift>>,
    outage: RwLock<Option<String>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(shifts: Vec<Shift>) -> Self {
        Self {
            shifts: RwLock::new(shifts),
            outage: RwLock::new(None),
        }
    }

    pub async fn insert(&self, shift: Shift) {
        self.shifts.write().await.push(shift);
    }

    /// Makes every subsequent read fail with `reason`; `None` restores service
    pub async fn set_outage(&self, reason: Option<String>) {
        *self.outage.write().await = reason;
    }

    async fn check_available(&self) -> AnalyticsResult<()> {
        match self.outage.read().await.as_ref() {
            Some(reason) => Err(AnalyticsError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list_records(&self, user_id: Uuid, range: DateRange) -> AnalyticsResult<Vec<Shift>> {
        self.check_available().await?;

        let mut records: Vec<Shift> = self
            .shifts
            .read()
            .await
            .iter()
            .filter(|s| s.user_id == user_id && range.contains(s.date))
            .cloned()
            .collect();

        records.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then(b.created_at.cmp(&a.created_at))
                .then(b.id.cmp(&a.id))
        });
        Ok(records)
    }

    async fn owner_totals(&self) -> AnalyticsResult<Vec<OwnerTotal>> {
        self.check_available().await?;

        let mut totals: BTreeMap<Uuid, Decimal> = BTreeMap::new();
        for shift in self.shifts.read().await.iter() {
            *totals.entry(shift.user_id).or_default() += shift.total_earned();
        }

        Ok(totals
            .into_iter()
            .map(|(user_id, total)| OwnerTotal { user_id, total })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn shift(user_id: Uuid, day: u32, tips: Decimal) -> Shift {
        let created = Utc.with_ymd_and_hms(2024, 1, day, 23, 0, 0).unwrap();
        Shift {
            id: Uuid::new_v4(),
            user_id,
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            hours_worked: dec!(4),
            hourly_wage: dec!(10),
            cash_tips: tips,
            credit_tips: Decimal::ZERO,
            created_at: created,
            updated_at: created,
        }
    }

    #[tokio::test]
    async fn test_list_records_filters_owner_and_range() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let store = InMemoryRecordStore::with_records(vec![
            shift(alice, 3, dec!(10)),
            shift(alice, 10, dec!(20)),
            shift(alice, 20, dec!(30)),
            shift(bob, 10, dec!(99)),
        ]);

        let range = DateRange::new(NaiveDate::from_ymd_opt(2024, 1, 3), NaiveDate::from_ymd_opt(2024, 1, 10));
        let records = store.list_records(alice, range).await.unwrap();

        let days: Vec<u32> = records.iter().map(|s| chrono::Datelike::day(&s.date)).collect();
        assert_eq!(days, vec![10, 3]);
    }

    #[tokio::test]
    async fn test_owner_totals_one_row_per_owner() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let store = InMemoryRecordStore::new();
        store.insert(shift(alice, 1, dec!(10))).await;
        store.insert(shift(alice, 2, dec!(5))).await;
        store.insert(shift(bob, 1, dec!(0))).await;

        let totals = store.owner_totals().await.unwrap();
        assert_eq!(totals.len(), 2);

        let alice_total = totals.iter().find(|t| t.user_id == alice).unwrap().total;
        assert_eq!(alice_total, dec!(95)); // 40 + 10 + 40 + 5
    }

    #[tokio::test]
    async fn test_outage_fails_reads() {
        let store = InMemoryRecordStore::new();
        store.set_outage(Some("maintenance".to_string())).await;

        assert!(matches!(
            store.owner_totals().await,
            Err(AnalyticsError::Unavailable(reason)) if reason == "maintenance"
        ));

        store.set_outage(None).await;
        assert!(store.owner_totals().await.unwrap().is_empty());
    }
}
