//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.

use axum::routing::{get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the API router with all endpoints bound to the given context.
pub fn api_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/", get(endpoints::health::welcome))
        .route("/health", get(endpoints::health::check))
        .route("/care-specialists/", post(endpoints::specialists::create))
        .route(
            "/care-specialists/:specialist_id/patients",
            get(endpoints::specialists::patients),
        )
        .route("/patients/:patient_id", get(endpoints::patients::latest))
        .route(
            "/patients/:patient_id/classify",
            get(endpoints::patients::classify),
        )
        .route("/upload/patients", post(endpoints::upload::patients_csv))
        .with_state(ctx)
}
