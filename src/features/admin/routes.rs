use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::admin::handlers::stats_handler;
use crate::features::admin::services::AdminService;

/// Create admin routes (nested under `/api/admin`, admin role required)
pub fn routes(admin_service: Arc<AdminService>) -> Router {
    Router::new()
        .route("/stats", get(stats_handler::get_stats))
        .with_state(admin_service)
}
