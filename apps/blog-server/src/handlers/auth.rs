//! Account handlers - registration, login and the current principal.

use std::sync::Arc;

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpResponse, web};

use blog_core::domain::User;
use blog_core::ports::{PasswordService, TokenService};
use blog_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest, UserResponse};

use crate::middleware::auth::{AUTH_COOKIE, Identity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn token_response(
    token_service: &dyn TokenService,
    user: &User,
    builder: &mut actix_web::HttpResponseBuilder,
) -> AppResult<HttpResponse> {
    let token = token_service
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let cookie = Cookie::build(AUTH_COOKIE, token.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();

    Ok(builder.cookie(cookie).json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds().max(0) as u64,
    }))
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let username = req.username.trim();

    if username.is_empty() {
        return Err(AppError::BadRequest("Username is required".to_string()));
    }
    if req.password.is_empty() {
        return Err(AppError::BadRequest("Password is required".to_string()));
    }

    if state.users.find_by_username(username).await?.is_some() {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }

    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = state
        .users
        .insert(User::new(username.to_string(), password_hash))
        .await?;
    tracing::info!(user_id = %user.id, "User registered");

    token_response(token_service.get_ref().as_ref(), &user, &mut HttpResponse::Created())
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_username(req.username.trim())
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    token_response(token_service.get_ref().as_ref(), &user, &mut HttpResponse::Ok())
}

/// GET /api/auth/me - Protected route
pub async fn me(identity: Identity) -> AppResult<HttpResponse> {
    let Identity(principal) = identity;

    Ok(HttpResponse::Ok().json(UserResponse {
        id: principal.user_id.to_string(),
        username: principal.username,
    }))
}
