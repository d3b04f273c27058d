use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use jsonwebtoken::{DecodingKey, Validation, decode};

use wayfarer_types::api::Claims;
use wayfarer_types::models::Role;

use crate::AppState;
use crate::error::ApiError;

/// Extract and validate the bearer token. A denial here is a returned
/// error, so the guarded handler body can never run on a bad credential.
/// Missing credential is Unauthenticated; a present-but-bad one is
/// Forbidden.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthenticated)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthenticated)?;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::Forbidden)?;

    req.extensions_mut().insert(token_data.claims);
    Ok(next.run(req).await)
}

pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    require_role(state, req, next, Role::Admin).await
}

pub async fn require_tour_guide(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    require_role(state, req, next, Role::TourGuide).await
}

/// Role gates always consult the store, never the token: a promotion or
/// demotion takes effect on the next request, not the next login.
async fn require_role(
    state: AppState,
    req: Request,
    next: Next,
    role: Role,
) -> Result<Response, ApiError> {
    let claims = req
        .extensions()
        .get::<Claims>()
        .cloned()
        .ok_or(ApiError::Unauthenticated)?;

    let user = state.db.get_user_by_email(&claims.email)?;
    match user {
        Some(u) if u.role == role => Ok(next.run(req).await),
        _ => Err(ApiError::Forbidden),
    }
}
