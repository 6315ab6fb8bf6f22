//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::*,
    error::{map_completion_error, map_view_error, Problem},
    mapper,
};
use crate::domain::Service;
use axum::{extract::Path, Json};
use std::sync::Arc;

/// Load the registration view for a token
pub async fn get_registration(
    service: Arc<Service>,
    Path(token): Path<String>,
) -> Result<Json<RegistrationViewDto>, Problem> {
    let (ctx, resolved) = service
        .registration_view(&token)
        .await
        .map_err(map_view_error)?;

    Ok(Json(mapper::registration_view(ctx, resolved)))
}

/// Redeem a token and finalize the registration
pub async fn complete_registration(
    service: Arc<Service>,
    Json(req): Json<CompleteRegistrationRequest>,
) -> Result<Json<CompleteRegistrationResponse>, Problem> {
    let receipt = service
        .complete_registration(&req.token, req.registration_data.into())
        .await
        .map_err(map_completion_error)?;

    Ok(Json(CompleteRegistrationResponse {
        message: "Registration completed successfully".to_string(),
        registration_id: receipt.registration_id,
    }))
}
