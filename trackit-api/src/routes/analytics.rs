/// Analytics endpoints
///
/// Thin wrappers over [`AnalyticsEngine`] backed by PostgreSQL. Date bounds
/// are optional and inclusive; `period` falls back to `day` when missing or
/// unrecognized.
///
/// # Endpoints
///
/// - `GET /api/analytics/dashboard?startDate&endDate`
/// - `GET /api/analytics/stats?startDate&endDate`
/// - `GET /api/analytics/best-worst`
/// - `GET /api/analytics/percentile`
/// - `GET /api/analytics/earnings?period&startDate&endDate` - bare array of buckets, newest first

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use trackit_shared::{
    analytics::{
        buckets::{EarningsBucket, Period},
        engine::{AnalyticsEngine, Dashboard},
        ranking::PercentileRank,
        store::PgRecordStore,
        summary::ShiftStatistics,
    },
    auth::middleware::AuthContext,
    models::shift::{DateRange, ShiftWithEarnings},
};

/// `?startDate=YYYY-MM-DD&endDate=YYYY-MM-DD`, both optional
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl From<&RangeQuery> for DateRange {
    fn from(query: &RangeQuery) -> Self {
        DateRange::new(query.start_date, query.end_date)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsQuery {
    pub period: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestWorstResponse {
    pub best_shift: Option<ShiftWithEarnings>,
    pub worst_shift: Option<ShiftWithEarnings>,
}

fn engine(state: &AppState) -> AnalyticsEngine<PgRecordStore> {
    AnalyticsEngine::new(PgRecordStore::new(state.db.clone()))
}

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<RangeQuery>,
) -> ApiResult<Json<Dashboard>> {
    let dashboard = engine(&state)
        .dashboard(auth.user_id, DateRange::from(&query))
        .await?;

    Ok(Json(dashboard))
}

pub async fn stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<RangeQuery>,
) -> ApiResult<Json<ShiftStatistics>> {
    let stats = engine(&state)
        .compute_summary(auth.user_id, DateRange::from(&query))
        .await?;

    Ok(Json(stats))
}

pub async fn best_worst(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<BestWorstResponse>> {
    let engine = engine(&state);
    let (best_shift, worst_shift) = tokio::try_join!(
        engine.best_shift(auth.user_id),
        engine.worst_shift(auth.user_id),
    )?;

    Ok(Json(BestWorstResponse {
        best_shift,
        worst_shift,
    }))
}

pub async fn percentile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<PercentileRank>> {
    Ok(Json(engine(&state).rank_percentile(auth.user_id).await?))
}

pub async fn earnings(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<EarningsQuery>,
) -> ApiResult<Json<Vec<EarningsBucket>>> {
    let period = Period::from_param(query.period.as_deref());
    let buckets = engine(&state)
        .bucket_earnings(auth.user_id, period, DateRange::new(query.start_date, query.end_date))
        .await?;

    Ok(Json(buckets))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_query_camel_case() {
        let query: RangeQuery =
            serde_json::from_value(serde_json::json!({ "startDate": "2024-01-01" })).unwrap();

        let range = DateRange::from(&query);
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(range.end, None);
    }

    #[test]
    fn test_earnings_query_fields() {
        let query: EarningsQuery = serde_json::from_value(serde_json::json!({
            "period": "month",
            "endDate": "2024-02-29"
        }))
        .unwrap();

        assert_eq!(Period::from_param(query.period.as_deref()), Period::Month);
        assert_eq!(query.end_date, NaiveDate::from_ymd_opt(2024, 2, 29));
    }
}
