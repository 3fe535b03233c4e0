use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use super::controller::{get_profile, set_admin, update_profile};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/profile/edit", post(update_profile))
        .route("/{id}/admin", put(set_admin))
}
