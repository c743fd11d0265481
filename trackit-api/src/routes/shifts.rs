/// Shift CRUD endpoints
///
/// Every route is scoped to the authenticated caller. A shift that belongs to
/// someone else answers exactly like one that does not exist.
///
/// # Endpoints
///
/// - `GET /api/shifts` - All of the caller's shifts, newest first
/// - `GET /api/shifts/:id` - One shift
/// - `POST /api/shifts` - Record a shift
/// - `PUT /api/shifts/:id` - Replace a shift
/// - `DELETE /api/shifts/:id` - Delete a shift

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use trackit_shared::{
    auth::middleware::AuthContext,
    models::shift::{Shift, ShiftInput, ShiftWithEarnings},
};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize)]
pub struct DeleteShiftResponse {
    pub message: String,
    pub shift: ShiftWithEarnings,
}

fn shift_not_found() -> ApiError {
    ApiError::NotFound("Shift not found".to_string())
}

pub async fn list_shifts(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<ShiftWithEarnings>>> {
    let shifts = Shift::list_by_user(&state.db, auth.user_id).await?;

    Ok(Json(shifts.into_iter().map(ShiftWithEarnings::from).collect()))
}

pub async fn get_shift(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ShiftWithEarnings>> {
    let shift = Shift::find_by_id_and_user(&state.db, id, auth.user_id)
        .await?
        .ok_or_else(shift_not_found)?;

    Ok(Json(shift.into()))
}

/// Record a shift
///
/// ```text
/// POST /api/shifts
/// {
///   "date": "2024-03-01",
///   "hours_worked": "6.5",
///   "hourly_wage": "2.13",
///   "cash_tips": "40.00",
///   "credit_tips": "85.25"
/// }
/// ```
///
/// Amounts may be JSON numbers or strings; omitted wage and tips default to zero.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Missing date/hours or a negative amount
pub async fn create_shift(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(input): Json<ShiftInput>,
) -> ApiResult<(StatusCode, Json<ShiftWithEarnings>)> {
    input.validate()?;

    let shift = Shift::create(&state.db, auth.user_id, input).await?;

    tracing::info!(user_id = %auth.user_id, shift_id = %shift.id, date = %shift.date, "Shift recorded");

    Ok((StatusCode::CREATED, Json(shift.into())))
}

/// Replace every field of an owned shift
pub async fn update_shift(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(input): Json<ShiftInput>,
) -> ApiResult<Json<ShiftWithEarnings>> {
    input.validate()?;

    let shift = Shift::update(&state.db, id, auth.user_id, input)
        .await?
        .ok_or_else(shift_not_found)?;

    tracing::info!(user_id = %auth.user_id, shift_id = %shift.id, "Shift updated");

    Ok(Json(shift.into()))
}

pub async fn delete_shift(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteShiftResponse>> {
    let shift = Shift::delete(&state.db, id, auth.user_id)
        .await?
        .ok_or_else(shift_not_found)?;

    tracing::info!(user_id = %auth.user_id, shift_id = %shift.id, "Shift deleted");

    Ok(Json(DeleteShiftResponse {
        message: "Shift deleted successfully".to_string(),
        shift: shift.into(),
    }))
}
