//! Authentication extractors
//!
//! Branches authenticate with their configured name + static PIN, the admin
//! with the static admin password. Plain string equality against the
//! read-only credential table; there are no sessions or tokens.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::validation::credentials_match;

use crate::error::AppError;
use crate::AppState;

/// Header carrying the branch name on branch requests.
pub const BRANCH_NAME_HEADER: &str = "x-branch-name";

/// Header carrying the branch PIN on branch requests.
pub const BRANCH_PIN_HEADER: &str = "x-branch-pin";

/// Header carrying the admin password on admin requests.
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Extractor for an authenticated branch. Holds the verified branch name.
#[derive(Clone, Debug)]
pub struct BranchAuth {
    pub branch: String,
}

/// Extractor guarding admin-only endpoints.
#[derive(Clone, Debug)]
pub struct AdminAuth;

fn header<'a>(parts: &'a Parts, name: &str) -> Result<&'a str, AppError> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized(format!("Missing {name} header")))
}

#[axum::async_trait]
impl FromRequestParts<AppState> for BranchAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let branch = header(parts, BRANCH_NAME_HEADER)?;
        let pin = header(parts, BRANCH_PIN_HEADER)?;

        let expected = state
            .config
            .branch_pin(branch)
            .ok_or(AppError::InvalidCredentials)?;
        if !credentials_match(pin, expected) {
            tracing::warn!(branch, "branch login with incorrect PIN");
            return Err(AppError::InvalidCredentials);
        }

        Ok(BranchAuth {
            branch: branch.to_string(),
        })
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let password = header(parts, ADMIN_PASSWORD_HEADER)?;
        if !credentials_match(password, &state.config.admin_password) {
            tracing::warn!("admin login with incorrect password");
            return Err(AppError::InvalidCredentials);
        }
        Ok(AdminAuth)
    }
}
