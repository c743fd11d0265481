/// Analytics engine over a [`RecordStore`]
///
/// Each operation reads from the store and reduces in memory; nothing is
/// cached between calls. The dashboard fans its five reads out concurrently
/// and fails as a whole if any one of them fails.

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use super::buckets::{self, EarningsBucket, Period};
use super::ranking::{rank_against_peers, PercentileRank};
use super::selection;
use super::store::RecordStore;
use super::summary::{summarize, ShiftStatistics};
use super::AnalyticsResult;
use crate::models::shift::{DateRange, ShiftWithEarnings};

/// Shifts included in the dashboard's recent list
pub const RECENT_SHIFTS_LIMIT: usize = 5;

/// Everything the dashboard shows, in one response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub statistics: ShiftStatistics,
    pub best_shift: Option<ShiftWithEarnings>,
    pub worst_shift: Option<ShiftWithEarnings>,
    pub recent_shifts: Vec<ShiftWithEarnings>,
    pub percentile: PercentileRank,
}

#[derive(Debug, Clone)]
pub struct AnalyticsEngine<S> {
    store: S,
}

impl<S: RecordStore> AnalyticsEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Totals and averages over the user's shifts in `range`
    pub async fn compute_summary(
        &self,
        user_id: Uuid,
        range: DateRange,
    ) -> AnalyticsResult<ShiftStatistics> {
        let shifts = self.store.list_records(user_id, range).await?;
        debug!(user_id = %user_id, shifts = shifts.len(), "Computed shift summary");
        Ok(summarize(&shifts))
    }

    /// Lifetime earnings percentile against every user with shifts
    pub async fn rank_percentile(&self, user_id: Uuid) -> AnalyticsResult<PercentileRank> {
        let totals = self.store.owner_totals().await?;
        let rank = rank_against_peers(user_id, totals);
        debug!(
            user_id = %user_id,
            total_users = rank.total_users,
            percentile = rank.percentile,
            "Ranked user against peers"
        );
        Ok(rank)
    }

    /// Earnings grouped by `period`, newest bucket first
    pub async fn bucket_earnings(
        &self,
        user_id: Uuid,
        period: Period,
        range: DateRange,
    ) -> AnalyticsResult<Vec<EarningsBucket>> {
        let shifts = self.store.list_records(user_id, range).await?;
        let buckets = buckets::bucket_earnings(&shifts, period);
        debug!(
            user_id = %user_id,
            period = %period,
            buckets = buckets.len(),
            "Bucketed earnings"
        );
        Ok(buckets)
    }

    /// Highest-earning shift of all time, if any
    pub async fn best_shift(&self, user_id: Uuid) -> AnalyticsResult<Option<ShiftWithEarnings>> {
        let shifts = self.store.list_records(user_id, DateRange::UNBOUNDED).await?;
        Ok(selection::best_shift(&shifts).cloned().map(ShiftWithEarnings::from))
    }

    /// Lowest-earning shift of all time, if any
    pub async fn worst_shift(&self, user_id: Uuid) -> AnalyticsResult<Option<ShiftWithEarnings>> {
        let shifts = self.store.list_records(user_id, DateRange::UNBOUNDED).await?;
        Ok(selection::worst_shift(&shifts).cloned().map(ShiftWithEarnings::from))
    }

    pub async fn recent_shifts(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> AnalyticsResult<Vec<ShiftWithEarnings>> {
        let shifts = self.store.list_records(user_id, DateRange::UNBOUNDED).await?;
        Ok(selection::recent_shifts(&shifts, limit)
            .into_iter()
            .map(ShiftWithEarnings::from)
            .collect())
    }

    /// Composes summary, best/worst, recent shifts and percentile
    ///
    /// `range` narrows the statistics only; the other parts always look at
    /// the user's full history. The reads are independent and not wrapped in
    /// a transaction.
    pub async fn dashboard(&self, user_id: Uuid, range: DateRange) -> AnalyticsResult<Dashboard> {
        let (statistics, best_shift, worst_shift, recent_shifts, percentile) = tokio::try_join!(
            self.compute_summary(user_id, range),
            self.best_shift(user_id),
            self.worst_shift(user_id),
            self.recent_shifts(user_id, RECENT_SHIFTS_LIMIT),
            self.rank_percentile(user_id),
        )?;

        debug!(user_id = %user_id, "Assembled dashboard");

        Ok(Dashboard {
            statistics,
            best_shift,
            worst_shift,
            recent_shifts,
            percentile,
        })
    }
}
