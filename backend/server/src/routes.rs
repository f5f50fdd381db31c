use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State as AppState},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use records::{PublicUser, User};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use crate::{
    auth::{CurrentUser, require_admin, resolve_user},
    error::AppError,
    payloads::{Login, NewUser, UserUpdate},
    state::State,
    utils::{parse, validate_new_user, validate_user_update},
};

#[derive(Serialize)]
pub struct LoginResponse {
    pub user: PublicUser,
    pub token: String,
}

pub async fn login_handler(
    AppState(state): AppState<Arc<State>>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let Login { username, password } = parse(&body)?;

    let user = state
        .files
        .read_users()?
        .into_iter()
        .find(|user| user.username == username)
        .filter(|user| user.password_matches(&password));

    let Some(user) = user else {
        warn!(%username, "Failed login");
        return Err(AppError::InvalidCredentials);
    };

    info!(username = %user.username, "Logged in");

    Ok(Json(LoginResponse {
        user: user.public(),
        token: user.id,
    }))
}

/// Tokens are stateless; logging out only drops the caller's open cart.
pub async fn logout_handler(
    AppState(state): AppState<Arc<State>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Ok(user) = resolve_user(&headers, &state) {
        state.carts.lock().await.remove(&user.id);
    }

    Json(json!({ "message": "Logged out successfully" }))
}

pub async fn list_users_handler(
    AppState(state): AppState<Arc<State>>,
    CurrentUser(caller): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&caller, "Only admins can view users.")?;

    let users: Vec<PublicUser> = state.files.read_users()?.iter().map(User::public).collect();

    Ok(Json(users))
}

pub async fn create_user_handler(
    AppState(state): AppState<Arc<State>>,
    CurrentUser(caller): CurrentUser,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&caller, "Only admins can create users.")?;

    let payload: NewUser = parse(&body)?;
    validate_new_user(&payload)?;

    let _writer = state.writer.lock().await;
    let mut users = state.files.read_users()?;

    if users.iter().any(|user| user.username == payload.username) {
        return Err(AppError::Conflict("Username already exists"));
    }

    let user = User::new(
        &payload.name,
        &payload.username,
        &payload.password,
        records::Role::Cashier,
    );
    users.push(user.clone());
    state.files.write_users(&users)?;

    info!(created = %user.username, by = %caller.username, "User created");

    Ok((StatusCode::CREATED, Json(user.public())))
}

pub async fn get_user_handler(
    AppState(state): AppState<Arc<State>>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&caller, "Only admins can view user details.")?;

    state
        .files
        .read_users()?
        .iter()
        .find(|user| user.id == id)
        .map(|user| Json(user.public()))
        .ok_or(AppError::NotFound("User not found"))
}

pub async fn update_user_handler(
    AppState(state): AppState<Arc<State>>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&caller, "Only admins can update users.")?;

    if id == records::DEFAULT_ADMIN_ID && !caller.is_default_admin() {
        return Err(AppError::Forbidden(
            "Default admin user cannot be modified by other admins.",
        ));
    }

    let payload: UserUpdate = parse(&body)?;
    let role = validate_user_update(&payload)?;

    let _writer = state.writer.lock().await;
    let mut users = state.files.read_users()?;

    let user = users
        .iter_mut()
        .find(|user| user.id == id)
        .ok_or(AppError::NotFound("User not found"))?;

    if user.is_default_admin() && role.is_some_and(|role| role != records::Role::Admin) {
        return Err(AppError::Forbidden(
            "Default admin user role cannot be changed.",
        ));
    }

    if let Some(name) = payload.name {
        user.name = name;
    }
    if let Some(password) = payload.password {
        user.password = Some(password);
    }
    if let Some(role) = role {
        user.role = role;
    }

    let updated = user.public();
    state.files.write_users(&users)?;

    info!(updated = %updated.username, by = %caller.username, "User updated");

    Ok(Json(updated))
}

pub async fn delete_user_handler(
    AppState(state): AppState<Arc<State>>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    require_admin(&caller, "Only admins can delete users.")?;

    if id == records::DEFAULT_ADMIN_ID {
        return Err(AppError::Forbidden("Default admin user cannot be deleted."));
    }

    let _writer = state.writer.lock().await;
    let mut users = state.files.read_users()?;
    let before = users.len();
    users.retain(|user| user.id != id);

    if users.len() == before {
        return Err(AppError::NotFound("User not found"));
    }

    state.files.write_users(&users)?;
    state.carts.lock().await.remove(&id);

    info!(deleted = %id, by = %caller.username, "User deleted");

    Ok(Json(json!({ "message": "User deleted successfully" })))
}
