use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::litter_reports::handlers::litter_report_handler;
use crate::features::litter_reports::services::LitterReportService;

pub fn routes(service: Arc<LitterReportService>) -> Router {
    Router::new()
        .route(
            "/api/litter-reports",
            get(litter_report_handler::list_reports).post(litter_report_handler::create_report),
        )
        .route(
            "/api/litter-reports/{id}",
            get(litter_report_handler::get_report)
                .put(litter_report_handler::update_report)
                .delete(litter_report_handler::close_report),
        )
        .with_state(service)
}
