//! Bearer-token role gate. The token is the user's id, resolved against the
//! users file on every request.
use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use records::{Role, User};
use tracing::warn;

use crate::{error::AppError, state::State};

const BEARER: &str = "Bearer ";

pub struct CurrentUser(pub User);

impl FromRequestParts<Arc<State>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<State>) -> Result<Self, Self::Rejection> {
        resolve_user(&parts.headers, state).map(CurrentUser)
    }
}

pub fn resolve_user(headers: &HeaderMap, state: &State) -> Result<User, AppError> {
    let token = bearer_token(headers).ok_or(AppError::Unauthorized)?;

    state
        .files
        .read_users()?
        .into_iter()
        .find(|user| user.id == token)
        .ok_or_else(|| {
            warn!("Rejected unknown bearer token");
            AppError::Unauthorized
        })
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER)
        .filter(|token| !token.is_empty())
}

pub fn require_admin(user: &User, denied: &'static str) -> Result<(), AppError> {
    if user.is_admin() {
        return Ok(());
    }

    warn!(username = %user.username, "{denied}");
    Err(AppError::Forbidden(denied))
}

/// Admins see every sale, cashiers only their own.
pub fn can_view_sale(user: &User, cashier_id: &str) -> bool {
    match user.role {
        Role::Admin => true,
        Role::Cashier => user.username == cashier_id,
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn extracts_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer admin-001"));
        assert_eq!(bearer_token(&headers), Some("admin-001"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn cashier_sees_only_own_sales() {
        let cashier = User::new("Casey", "casey", "secret1", Role::Cashier);
        let admin = User::default_admin("password");

        assert!(can_view_sale(&cashier, "casey"));
        assert!(!can_view_sale(&cashier, "morgan"));
        assert!(can_view_sale(&admin, "morgan"));
        assert!(require_admin(&cashier, "Only admins can view users.").is_err());
        assert!(require_admin(&admin, "Only admins can view users.").is_ok());
    }
}
