use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use wayfarer_types::api::{DeleteOutcome, InsertOutcome, NewWishlistItem};
use wayfarer_types::models::WishlistItem;

use crate::AppState;
use crate::error::{ApiError, parse_id};

#[derive(Debug, Deserialize)]
pub struct WishlistQuery {
    pub email: Option<String>,
}

/// GET /wishList?email= — no email means an empty list, not an error.
pub async fn list_wishlist(
    State(state): State<AppState>,
    Query(query): Query<WishlistQuery>,
) -> Result<Json<Vec<WishlistItem>>, ApiError> {
    let Some(email) = query.email.filter(|e| !e.is_empty()) else {
        return Ok(Json(Vec::new()));
    };
    Ok(Json(state.db.list_wishlist_by_email(&email)?))
}

pub async fn create_wishlist_item(
    State(state): State<AppState>,
    Json(body): Json<NewWishlistItem>,
) -> Result<Json<InsertOutcome>, ApiError> {
    if body.email.is_empty() {
        return Err(ApiError::InvalidArgument("email is required".into()));
    }
    let item = WishlistItem {
        id: Uuid::new_v4(),
        email: body.email,
        package_id: body.package_id,
        title: body.title,
        tour_type: body.tour_type,
        price: body.price,
        photo: body.photo,
    };
    state.db.create_wishlist_item(&item)?;
    Ok(Json(InsertOutcome::inserted(item.id)))
}

pub async fn delete_wishlist_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteOutcome>, ApiError> {
    let id = parse_id(&id)?;
    let n = state.db.delete_wishlist_item_by_id(&id)?;
    Ok(Json(DeleteOutcome { deleted_count: n as u64 }))
}
