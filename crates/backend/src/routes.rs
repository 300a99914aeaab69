use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::handlers;
use crate::shared::config::Config;

/// Route table of the application
pub fn configure_routes(config: &Config) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // D402 AFFILIATE COMMISSION DASHBOARD
        // ========================================
        .route(
            "/api/d402/uploads",
            post(handlers::d402_affiliate_commission::upload)
                .layer(DefaultBodyLimit::max(config.upload.max_bytes)),
        )
        .route(
            "/api/d402/uploads/:id",
            delete(handlers::d402_affiliate_commission::discard),
        )
        .route(
            "/api/d402/uploads/:id/values/:dimension",
            get(handlers::d402_affiliate_commission::values),
        )
        .route(
            "/api/d402/uploads/:id/report",
            post(handlers::d402_affiliate_commission::report),
        )
        .route(
            "/api/d402/uploads/:id/compare",
            post(handlers::d402_affiliate_commission::compare),
        )
        .route(
            "/api/d402/uploads/:id/top-items",
            post(handlers::d402_affiliate_commission::top_items),
        )
}
