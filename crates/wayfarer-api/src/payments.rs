use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use wayfarer_types::api::{
    Claims, DeleteOutcome, InsertOutcome, NewPayment, PaymentIntentRequest, PaymentIntentResponse,
    UpdateOutcome,
};
use wayfarer_types::models::{Payment, PaymentStatus};

use crate::AppState;
use crate::error::{ApiError, parse_id};

#[derive(Debug, Deserialize)]
pub struct PaymentQuery {
    pub email: Option<String>,
}

/// GET /payments?email= — strictly self-only: the query email must match
/// the token identity, and a mismatch returns nothing but the error body.
pub async fn list_payments(
    State(state): State<AppState>,
    Query(query): Query<PaymentQuery>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Payment>>, ApiError> {
    let email = query
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::InvalidArgument("email is required".into()))?;
    if email != claims.email {
        return Err(ApiError::Forbidden);
    }
    Ok(Json(state.db.list_payments_by_email(&email)?))
}

/// POST /payments — records the booking; status defaults to pending so the
/// named guide can later approve or reject it.
pub async fn create_payment(
    State(state): State<AppState>,
    Json(body): Json<NewPayment>,
) -> Result<Json<InsertOutcome>, ApiError> {
    if body.email.is_empty() {
        return Err(ApiError::InvalidArgument("email is required".into()));
    }
    let payment = Payment {
        id: Uuid::new_v4(),
        email: body.email,
        tour_guide_email: body.tour_guide_email,
        package_id: body.package_id,
        package_title: body.package_title,
        amount: body.amount,
        status: body.status.unwrap_or(PaymentStatus::Pending),
        created_at: Utc::now(),
    };
    state.db.create_payment(&payment)?;
    Ok(Json(InsertOutcome::inserted(payment.id)))
}

pub async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteOutcome>, ApiError> {
    let id = parse_id(&id)?;
    let n = state.db.delete_payment_by_id(&id)?;
    Ok(Json(DeleteOutcome { deleted_count: n as u64 }))
}

/// GET /tourGuideAssignedTours/{email} — guide-gated, and the path email
/// must be the caller's own.
pub async fn assigned_tours(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Payment>>, ApiError> {
    if email != claims.email {
        return Err(ApiError::Forbidden);
    }
    Ok(Json(state.db.list_payments_by_guide_email(&email)?))
}

/// PATCH /tourGuideAssignedTours/approved/{id}
pub async fn approve_assigned(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    transition(&state, &claims, &id, PaymentStatus::Approved)
}

/// PATCH /tourGuideAssignedTours/rejected/{id}
pub async fn reject_assigned(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    transition(&state, &claims, &id, PaymentStatus::Rejected)
}

/// Only the guide named on the payment may move its status. Being *a* tour
/// guide is not enough.
fn transition(
    state: &AppState,
    claims: &Claims,
    raw_id: &str,
    status: PaymentStatus,
) -> Result<Json<UpdateOutcome>, ApiError> {
    let id = parse_id(raw_id)?;

    let Some(payment) = state.db.get_payment_by_id(&id)? else {
        return Ok(Json(UpdateOutcome::from_count(0)));
    };
    if payment.tour_guide_email.as_deref() != Some(claims.email.as_str()) {
        return Err(ApiError::Forbidden);
    }

    let n = state.db.set_payment_status(&id, status)?;
    Ok(Json(UpdateOutcome::from_count(n)))
}

/// POST /create-payment-intent — converts the decimal price to minor
/// currency units and hands back only the provider's client secret.
/// Nothing is persisted here.
pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(req): Json<PaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>, ApiError> {
    if !req.price.is_finite() || req.price < 0.0 {
        return Err(ApiError::InvalidArgument("price must be a non-negative number".into()));
    }
    let amount = (req.price * 100.0).round() as i64;

    let client_secret = state.payments.create_intent(amount, "usd").await?;
    Ok(Json(PaymentIntentResponse { client_secret }))
}
