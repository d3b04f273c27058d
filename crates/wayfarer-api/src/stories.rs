use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use uuid::Uuid;

use wayfarer_types::api::{InsertOutcome, NewReview};
use wayfarer_types::models::Review;

use crate::AppState;
use crate::error::{ApiError, parse_id};

// Tour stories are write-once: reviewers post once after a trip and the
// record is never edited or deleted through the API.

/// GET /tour_story
pub async fn list_stories(State(state): State<AppState>) -> Result<Json<Vec<Review>>, ApiError> {
    Ok(Json(state.db.list_reviews()?))
}

/// GET /tour_story/{id}
pub async fn get_story(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Review>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.db.get_review_by_id(&id)?))
}

/// POST /tour_story
pub async fn create_story(
    State(state): State<AppState>,
    Json(body): Json<NewReview>,
) -> Result<Json<InsertOutcome>, ApiError> {
    if body.reviewer_email.is_empty() {
        return Err(ApiError::InvalidArgument("reviewerEmail is required".into()));
    }
    let review = Review {
        id: Uuid::new_v4(),
        package_title: body.package_title,
        tour_guide_name: body.tour_guide_name,
        tour_guide_email: body.tour_guide_email,
        reviewer_name: body.reviewer_name,
        reviewer_email: body.reviewer_email,
        review: body.review,
        created_at: Utc::now(),
    };
    state.db.create_review(&review)?;
    Ok(Json(InsertOutcome::inserted(review.id)))
}
