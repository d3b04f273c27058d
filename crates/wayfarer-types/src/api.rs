use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{AccountStatus, PaymentStatus};

// -- JWT Claims --

/// Canonical claims definition, shared by token issuance and the auth
/// middleware. The email is the join key for every role and ownership check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// -- Users --

/// Body of POST /users and PUT /users. Role is always server-assigned;
/// a submitted status of "requested" drives the guide-application branch.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertUser {
    pub name: Option<String>,
    pub email: String,
    pub photo: Option<String>,
    pub status: Option<AccountStatus>,
}

#[derive(Debug, Serialize)]
pub struct AdminFlag {
    pub admin: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourGuideFlag {
    pub tour_guide: bool,
}

// -- Packages --

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPackage {
    pub title: String,
    pub tour_type: String,
    pub price: f64,
    pub description: Option<String>,
    pub photo: Option<String>,
}

// -- Wishlist --

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWishlistItem {
    pub email: String,
    pub package_id: Option<Uuid>,
    pub title: Option<String>,
    pub tour_type: Option<String>,
    pub price: Option<f64>,
    pub photo: Option<String>,
}

// -- Reviews --

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub package_title: String,
    pub tour_guide_name: Option<String>,
    pub tour_guide_email: Option<String>,
    pub reviewer_name: Option<String>,
    pub reviewer_email: String,
    pub review: String,
}

// -- Payments --

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub email: String,
    pub tour_guide_email: Option<String>,
    pub package_id: Option<Uuid>,
    pub package_title: Option<String>,
    pub amount: f64,
    pub status: Option<PaymentStatus>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentIntentRequest {
    pub price: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

// -- Store operation outcomes --
// Shapes mirror what document-store drivers report, so clients can key off
// insertedId / modifiedCount / deletedCount.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub inserted_id: Option<Uuid>,
}

impl InsertOutcome {
    pub fn inserted(id: Uuid) -> Self {
        Self { message: None, inserted_id: Some(id) }
    }

    pub fn already_exists() -> Self {
        Self {
            message: Some("User already exists".into()),
            inserted_id: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

impl UpdateOutcome {
    pub fn from_count(n: usize) -> Self {
        Self {
            matched_count: n as u64,
            modified_count: n as u64,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub deleted_count: u64,
}
