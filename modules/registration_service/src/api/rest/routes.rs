//! Route registration for the registration endpoints

use super::{dto::*, handlers};
use crate::domain::Service;
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;

/// Build the router for the registration endpoints
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/registration/{token}", get(get_registration_handler))
        .route("/registration/complete", post(complete_registration_handler))
        .layer(Extension(service))
}

// ===== Handler wrappers that extract service from Extension =====

async fn get_registration_handler(
    Extension(service): Extension<Arc<Service>>,
    path: axum::extract::Path<String>,
) -> Result<axum::Json<RegistrationViewDto>, super::error::Problem> {
    handlers::get_registration(service, path).await
}

async fn complete_registration_handler(
    Extension(service): Extension<Arc<Service>>,
    json: axum::Json<CompleteRegistrationRequest>,
) -> Result<axum::Json<CompleteRegistrationResponse>, super::error::Problem> {
    handlers::complete_registration(service, json).await
}
