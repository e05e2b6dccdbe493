use crate::features::users::handlers::user_handler;
use crate::features::users::services::UserService;
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route(
            "/api/users/me",
            get(user_handler::get_profile).put(user_handler::update_profile),
        )
        .route("/api/users/collectors", get(user_handler::list_collectors))
        .with_state(service)
}
