use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role. Stored as text in the database; a closed enum here so a
/// typo can never pass a role gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    User,
    TourGuide,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::TourGuide => "tourGuide",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Role::User),
            "tourGuide" => Some(Role::TourGuide),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// Guide-application state on a user account. Unset until the user asks to
/// become a tour guide; "verified" once an admin acts on the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountStatus {
    Requested,
    Verified,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Requested => "requested",
            AccountStatus::Verified => "verified",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "requested" => Some(AccountStatus::Requested),
            "verified" => Some(AccountStatus::Verified),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentStatus {
    Pending,
    Approved,
    Rejected,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Approved => "approved",
            PaymentStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PaymentStatus::Pending),
            "approved" => Some(PaymentStatus::Approved),
            "rejected" => Some(PaymentStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub photo: Option<String>,
    pub role: Role,
    pub status: Option<AccountStatus>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: Uuid,
    pub title: String,
    pub tour_type: String,
    pub price: f64,
    pub description: Option<String>,
    pub photo: Option<String>,
}

/// A post-trip "tour story". Write-once: there is no edit or delete path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub package_title: String,
    pub tour_guide_name: Option<String>,
    pub tour_guide_email: Option<String>,
    pub reviewer_name: Option<String>,
    pub reviewer_email: String,
    pub review: String,
    pub created_at: DateTime<Utc>,
}

/// Denormalized copy of the package fields at the time of wishlisting.
/// Deleting the package does not cascade here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: Uuid,
    pub email: String,
    pub package_id: Option<Uuid>,
    pub title: Option<String>,
    pub tour_type: Option<String>,
    pub price: Option<f64>,
    pub photo: Option<String>,
}

/// Doubles as the booking record: a guide's assigned tours are the payments
/// whose tour_guide_email matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub email: String,
    pub tour_guide_email: Option<String>,
    pub package_id: Option<Uuid>,
    pub package_title: Option<String>,
    pub amount: f64,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}
