use auth::TokenStatus;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated subject in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub email: String,
    pub expires_at: i64,
}

/// Middleware that admits only requests carrying a valid access token.
///
/// Expired and tampered tokens are rejected with distinct messages.
pub async fn require_access_token(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?;

    let claims = state
        .auth_service
        .verify_access_token(token)
        .map_err(|status| {
            tracing::debug!(status = %status, uri = %req.uri(), "Access token refused");
            match status {
                TokenStatus::Expired => ApiError::Unauthorized("Expired access token".to_string()),
                TokenStatus::Tampered => {
                    ApiError::Unauthorized("Tampered access token".to_string())
                }
                TokenStatus::Valid => {
                    ApiError::InternalServerError("Unexpected token status".to_string())
                }
            }
        })?;

    req.extensions_mut().insert(AuthenticatedUser {
        email: claims.email,
        expires_at: claims.exp,
    });

    Ok(next.run(req).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            tracing::debug!("Missing token");
            ApiError::BadRequest("Missing token".to_string())
        })
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));

        assert_eq!(bearer_token(&headers), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_missing_or_malformed() {
        let missing = HeaderMap::new();
        assert!(matches!(bearer_token(&missing), Err(ApiError::BadRequest(_))));

        for value in ["abc.def.ghi", "Basic dXNlcjpwYXNz", "Bearer ", "Bearer    "] {
            let mut headers = HeaderMap::new();
            headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
            assert!(
                matches!(bearer_token(&headers), Err(ApiError::BadRequest(_))),
                "accepted {value:?}"
            );
        }
    }
}
