use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Report who the presented access token belongs to.
pub async fn get_session(
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        SessionResponseData {
            email: user.email,
            expires_at: user.expires_at,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResponseData {
    pub email: String,
    pub expires_at: i64,
}
