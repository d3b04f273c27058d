use axum::extract::{Extension, Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use uuid::Uuid;

use wayfarer_db::users::CreateUserOutcome;
use wayfarer_types::api::{AdminFlag, Claims, InsertOutcome, TourGuideFlag, UpdateOutcome, DeleteOutcome, UpsertUser};
use wayfarer_types::models::{AccountStatus, Role, User};

use crate::AppState;
use crate::error::{ApiError, parse_id};

/// GET /users — admin-gated full listing.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.db.list_users()?))
}

/// GET /users/{email} — public profile lookup; a miss is a JSON null, not
/// an error.
pub async fn get_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Option<User>>, ApiError> {
    Ok(Json(state.db.get_user_by_email(&email)?))
}

/// GET /users/admin/{email} — callers may only ask about themselves.
pub async fn check_admin(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<AdminFlag>, ApiError> {
    if email != claims.email {
        return Err(ApiError::Forbidden);
    }
    let admin = matches!(
        state.db.get_user_by_email(&email)?,
        Some(u) if u.role == Role::Admin
    );
    Ok(Json(AdminFlag { admin }))
}

/// GET /users/tourGuide/{email} — same self-only rule as the admin check.
pub async fn check_tour_guide(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<TourGuideFlag>, ApiError> {
    if email != claims.email {
        return Err(ApiError::Forbidden);
    }
    let tour_guide = matches!(
        state.db.get_user_by_email(&email)?,
        Some(u) if u.role == Role::TourGuide
    );
    Ok(Json(TourGuideFlag { tour_guide }))
}

pub async fn list_tour_guides(
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.db.list_users_by_role(Role::TourGuide)?))
}

pub async fn get_tour_guide(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<User>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.db.get_user_by_role_and_id(Role::TourGuide, &id)?))
}

/// POST /users — plain registration. The existence check is advisory; the
/// unique email constraint decides races, and the loser gets the same
/// "already exists" response.
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<UpsertUser>,
) -> Result<Json<InsertOutcome>, ApiError> {
    if body.email.is_empty() {
        return Err(ApiError::InvalidArgument("email is required".into()));
    }

    if state.db.get_user_by_email(&body.email)?.is_some() {
        return Ok(Json(InsertOutcome::already_exists()));
    }

    let user = new_user_record(&body);
    match state.db.create_user(&user)? {
        CreateUserOutcome::Inserted => Ok(Json(InsertOutcome::inserted(user.id))),
        CreateUserOutcome::DuplicateEmail => Ok(Json(InsertOutcome::already_exists())),
    }
}

/// PUT /users — the login-upsert three-way branch:
/// absent email inserts a fresh record; an existing record submitted with
/// status "requested" gets a status-only update (guide application); any
/// other resubmission is a no-op that echoes the stored record.
pub async fn upsert_user(
    State(state): State<AppState>,
    Json(body): Json<UpsertUser>,
) -> Result<Response, ApiError> {
    if body.email.is_empty() {
        return Err(ApiError::InvalidArgument("email is required".into()));
    }

    if let Some(existing) = state.db.get_user_by_email(&body.email)? {
        if body.status == Some(AccountStatus::Requested) {
            let n = state
                .db
                .set_user_status_by_email(&body.email, AccountStatus::Requested)?;
            return Ok(Json(UpdateOutcome::from_count(n)).into_response());
        }
        return Ok(Json(existing).into_response());
    }

    let user = new_user_record(&body);
    match state.db.create_user(&user)? {
        CreateUserOutcome::Inserted => Ok(Json(InsertOutcome::inserted(user.id)).into_response()),
        // Lost the insert race: behave like an ordinary re-login.
        CreateUserOutcome::DuplicateEmail => {
            match state.db.get_user_by_email(&body.email)? {
                Some(existing) => Ok(Json(existing).into_response()),
                None => Ok(Json(InsertOutcome::already_exists()).into_response()),
            }
        }
    }
}

fn new_user_record(body: &UpsertUser) -> User {
    User {
        id: Uuid::new_v4(),
        name: body.name.clone(),
        email: body.email.clone(),
        photo: body.photo.clone(),
        // Role is never taken from the client; promotion is a separate,
        // admin-gated operation.
        role: Role::User,
        status: body.status,
        created_at: Utc::now(),
        updated_at: None,
    }
}

/// PATCH /users/admin/{id}
pub async fn make_admin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    promote(&state, &id, Role::Admin)
}

/// PATCH /users/tourGuide/{id}
pub async fn make_tour_guide(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    promote(&state, &id, Role::TourGuide)
}

/// PATCH /users/makeUser/{id}
pub async fn make_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    promote(&state, &id, Role::User)
}

fn promote(state: &AppState, raw_id: &str, role: Role) -> Result<Json<UpdateOutcome>, ApiError> {
    let id = parse_id(raw_id)?;
    let n = state.db.set_user_role_by_id(&id, role, Utc::now())?;
    Ok(Json(UpdateOutcome::from_count(n)))
}

/// DELETE /users/{id} — admin-gated; a miss is a zero-count result.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteOutcome>, ApiError> {
    let id = parse_id(&id)?;
    let n = state.db.delete_user_by_id(&id)?;
    Ok(Json(DeleteOutcome { deleted_count: n as u64 }))
}
