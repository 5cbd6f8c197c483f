//! Bearer-token authentication for the REST surface.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
};

use crate::domain::UserIdentity;

use super::state::AppState;

/// Extractor that requires a valid `Authorization: Bearer <token>` header.
///
/// Shares the `TokenVerifier` seam with the WebSocket authenticate flow, so
/// both surfaces accept exactly the same credentials.
pub struct AuthUser(pub UserIdentity);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or(StatusCode::UNAUTHORIZED)?;

        match state.token_verifier.verify(token) {
            Ok(identity) => Ok(AuthUser(identity)),
            Err(e) => {
                tracing::warn!("Rejected bearer token: {}", e);
                Err(StatusCode::UNAUTHORIZED)
            }
        }
    }
}
