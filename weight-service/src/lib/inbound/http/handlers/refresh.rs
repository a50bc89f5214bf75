use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::bearer_token;
use crate::inbound::http::router::AppState;

/// Issue a fresh access token for the bearer of a valid refresh token.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    let refresh_token = bearer_token(&headers)?;

    let access_token = state
        .auth_service
        .refresh(refresh_token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid refresh token".to_string()))?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        RefreshResponseData { access_token },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub access_token: String,
}
