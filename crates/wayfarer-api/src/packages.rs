use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use wayfarer_types::api::{DeleteOutcome, InsertOutcome, NewPackage};
use wayfarer_types::models::Package;

use crate::AppState;
use crate::error::{ApiError, parse_id};

#[derive(Debug, Deserialize)]
pub struct PackageQuery {
    pub search: Option<String>,
    #[serde(rename = "tourType")]
    pub tour_type: Option<String>,
}

/// A browser client sends the literal string "null" for an unset filter, so
/// it must count as absent alongside empty and missing.
fn effective(param: Option<String>) -> Option<String> {
    param.filter(|v| !v.is_empty() && v != "null")
}

/// GET /ourPackages?search=&tourType=
pub async fn list_packages(
    State(state): State<AppState>,
    Query(query): Query<PackageQuery>,
) -> Result<Json<Vec<Package>>, ApiError> {
    let search = effective(query.search);
    let tour_type = effective(query.tour_type);
    let packages = state
        .db
        .search_packages(search.as_deref(), tour_type.as_deref())?;
    Ok(Json(packages))
}

pub async fn get_package(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Package>>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.db.get_package_by_id(&id)?))
}

/// POST /ourPackages — admin-gated.
pub async fn create_package(
    State(state): State<AppState>,
    Json(body): Json<NewPackage>,
) -> Result<Json<InsertOutcome>, ApiError> {
    let package = Package {
        id: Uuid::new_v4(),
        title: body.title,
        tour_type: body.tour_type,
        price: body.price,
        description: body.description,
        photo: body.photo,
    };
    state.db.create_package(&package)?;
    Ok(Json(InsertOutcome::inserted(package.id)))
}

pub async fn delete_package(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteOutcome>, ApiError> {
    let id = parse_id(&id)?;
    let n = state.db.delete_package_by_id(&id)?;
    Ok(Json(DeleteOutcome { deleted_count: n as u64 }))
}
