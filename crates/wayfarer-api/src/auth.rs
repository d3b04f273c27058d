use axum::Json;
use axum::extract::State;
use jsonwebtoken::{EncodingKey, Header, encode};

use wayfarer_types::api::{Claims, TokenRequest, TokenResponse};

use crate::AppState;
use crate::error::ApiError;

/// POST /jwt — exchange an identity payload for a signed bearer token.
/// Deliberately unauthenticated: possession of the token is what later
/// requests are judged on, and role checks always go back to the store.
pub async fn issue_token(
    State(state): State<AppState>,
    Json(req): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    if req.email.is_empty() {
        return Err(ApiError::InvalidArgument("email is required".into()));
    }

    let token = create_token(&state.jwt_secret, &req.email)?;
    Ok(Json(TokenResponse { token }))
}

/// One-hour expiry, no refresh: clients re-run login when the token lapses.
pub fn create_token(secret: &str, email: &str) -> anyhow::Result<String> {
    let claims = Claims {
        email: email.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}
