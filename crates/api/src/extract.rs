//! Request extractors.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};

use crate::{error::ApiError, AppState};

/// Verified claims of an admin caller.
///
/// Taking this as a handler argument makes the route admin-only: a missing,
/// invalid, expired or non-admin token is rejected with 401 before the
/// handler body runs.
#[derive(Debug, Clone)]
pub struct AdminUser(pub auth::Claims);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        let token = auth::bearer_token(header)?;
        let claims = state.keys.verify(token)?;
        claims.require_admin()?;
        Ok(Self(claims))
    }
}
