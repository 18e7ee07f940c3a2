use http::{header, HeaderMap};

use crate::error::ApiError;

/// Decides whether a request may regenerate the schedule.
pub trait AdminAuthorizer: Send + Sync {
    fn authorize(&self, headers: &HeaderMap) -> Result<(), ApiError>;
}

/// Accepts `Authorization: Bearer <token>` matching the configured admin token.
/// Without a configured token every caller is refused.
pub struct BearerTokenAuthorizer {
    token: Option<String>,
}

impl BearerTokenAuthorizer {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

impl AdminAuthorizer for BearerTokenAuthorizer {
    fn authorize(&self, headers: &HeaderMap) -> Result<(), ApiError> {
        let presented = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::Unauthorized)?;

        match &self.token {
            Some(expected) if expected == presented => Ok(()),
            _ => Err(ApiError::Forbidden),
        }
    }
}
