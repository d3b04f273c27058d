use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{MethodRouter, delete, get, patch, post, put};

use crate::{AppState, auth, guards, packages, payments, stories, users, wishlist};

/// Assemble the full HTTP surface. Gates are attached per method router so
/// a path can carry a public GET next to an admin-only POST; guard order is
/// authenticate first, then the role check against the store.
pub fn router(state: AppState) -> Router {
    let authed = {
        let st = state.clone();
        move |mr: MethodRouter<AppState>| {
            mr.route_layer(from_fn_with_state(st.clone(), guards::require_auth))
        }
    };
    let admin = {
        let st = state.clone();
        move |mr: MethodRouter<AppState>| {
            mr.route_layer(from_fn_with_state(st.clone(), guards::require_admin))
                .route_layer(from_fn_with_state(st.clone(), guards::require_auth))
        }
    };
    let guide = {
        let st = state.clone();
        move |mr: MethodRouter<AppState>| {
            mr.route_layer(from_fn_with_state(st.clone(), guards::require_tour_guide))
                .route_layer(from_fn_with_state(st.clone(), guards::require_auth))
        }
    };

    Router::new()
        .route("/", get(liveness))
        .route("/jwt", post(auth::issue_token))
        // users
        .route(
            "/users",
            admin(get(users::list_users))
                .merge(post(users::create_user))
                .merge(put(users::upsert_user)),
        )
        .route(
            "/users/{email}",
            get(users::get_user).merge(admin(delete(users::delete_user))),
        )
        .route(
            "/users/admin/{id}",
            authed(get(users::check_admin)).merge(admin(patch(users::make_admin))),
        )
        .route(
            "/users/tourGuide/{id}",
            authed(get(users::check_tour_guide)).merge(admin(patch(users::make_tour_guide))),
        )
        .route("/users/makeUser/{id}", admin(patch(users::make_user)))
        .route("/allTourGuides", get(users::list_tour_guides))
        .route("/allTourGuides/{id}", get(users::get_tour_guide))
        // packages
        .route(
            "/ourPackages",
            get(packages::list_packages).merge(admin(post(packages::create_package))),
        )
        .route(
            "/ourPackages/{id}",
            get(packages::get_package).delete(packages::delete_package),
        )
        // wishlist
        .route(
            "/wishList",
            get(wishlist::list_wishlist).post(wishlist::create_wishlist_item),
        )
        .route("/wishList/{id}", delete(wishlist::delete_wishlist_item))
        // tour stories
        .route(
            "/tour_story",
            get(stories::list_stories).post(stories::create_story),
        )
        .route("/tour_story/{id}", get(stories::get_story))
        // payments and guide assignments
        .route(
            "/payments",
            authed(get(payments::list_payments)).merge(post(payments::create_payment)),
        )
        .route("/payments/{id}", delete(payments::delete_payment))
        .route(
            "/tourGuideAssignedTours/{email}",
            guide(get(payments::assigned_tours)),
        )
        .route(
            "/tourGuideAssignedTours/approved/{id}",
            guide(patch(payments::approve_assigned)),
        )
        .route(
            "/tourGuideAssignedTours/rejected/{id}",
            guide(patch(payments::reject_assigned)),
        )
        .route("/create-payment-intent", post(payments::create_payment_intent))
        .with_state(state)
}

async fn liveness() -> &'static str {
    "Wayfarer tourism API is running"
}
