//! Admin password authentication extractor.
//!
//! Extracts the admin password from:
//! - `x-admin-password: <password>` header
//! - `password=<password>` query parameter
//!
//! Both sides are SHA-256 hashed before comparison, so the check runs on
//! fixed-length digests rather than on the password strings themselves.

use std::collections::HashMap;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use sha2::{Digest, Sha256};

use crate::http::error::AppError;
use crate::state::AppState;

/// Admin request marker. Extracting this validates the admin password.
pub struct AdminAuth;

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let password = extract_password(parts).await?;

        if hash_password(&password) == state.admin_password_hash {
            Ok(AdminAuth)
        } else {
            Err(AppError::Unauthorized("Invalid admin password".to_string()))
        }
    }
}

/// Extract the admin password from the header or query string.
async fn extract_password(parts: &mut Parts) -> Result<String, AppError> {
    if let Some(header) = parts.headers.get("x-admin-password") {
        let value = header.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid x-admin-password header encoding".to_string())
        })?;
        return Ok(value.trim().to_string());
    }

    let Query(query): Query<HashMap<String, String>> =
        Query::try_from_uri(&parts.uri)
            .map_err(|_| AppError::Unauthorized("Invalid query string".to_string()))?;
    if let Some(password) = query.get("password") {
        return Ok(password.clone());
    }

    Err(AppError::Unauthorized(
        "Missing admin password. Provide via 'x-admin-password' header or 'password' query parameter.".to_string(),
    ))
}

/// Compute SHA-256 hash of a password (lowercase hex).
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    format!("{:x}", digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_is_deterministic_hex() {
        let a = hash_password("admin123");
        let b = hash_password("admin123");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_different_passwords_hash_differently() {
        assert_ne!(hash_password("admin123"), hash_password("admin124"));
    }
}
