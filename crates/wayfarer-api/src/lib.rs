pub mod auth;
pub mod error;
pub mod guards;
pub mod packages;
pub mod payments;
pub mod routes;
pub mod stories;
pub mod stripe;
pub mod users;
pub mod wishlist;

use std::sync::Arc;

use wayfarer_db::Database;

use crate::stripe::PaymentGateway;

pub type AppState = Arc<AppStateInner>;

/// Everything a handler needs, passed explicitly through router state.
/// Tests substitute an in-memory database and a fake payment gateway.
pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
    pub payments: Arc<dyn PaymentGateway>,
}
