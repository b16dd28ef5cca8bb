//! Authentication extractors.
//!
//! The access token is read from an `Authorization: Bearer` header first, then
//! from the `auth_token` cookie set by the login endpoint.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};

use blog_core::domain::Principal;
use blog_core::ports::{AuthError, TokenService};
use blog_shared::ErrorResponse;

use crate::state::AppState;

pub const AUTH_COOKIE: &str = "auth_token";

type LocalBoxFuture<T> = Pin<Box<dyn Future<Output = T>>>;

/// Authenticated requester. Extraction fails with 401 when no valid token is sent.
#[derive(Debug, Clone)]
pub struct Identity(pub Principal);

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match &self.0 {
            AuthError::HashingError(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            _ => actix_web::http::StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                .with_detail("Your authentication token has expired. Please login again."),
            AuthError::InvalidToken(msg) => {
                ErrorResponse::new(401, "Invalid Token").with_detail(msg.clone())
            }
            AuthError::MissingAuth => ErrorResponse::new(401, "Authentication Required")
                .with_detail("Send a Bearer token or log in to receive the auth cookie."),
            AuthError::InvalidCredentials => ErrorResponse::unauthorized()
                .with_detail("The account for this token no longer exists."),
            AuthError::HashingError(_) => ErrorResponse::internal_error(),
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

fn token_from_request(req: &HttpRequest) -> Result<String, AuthError> {
    if let Some(value) = req.headers().get(header::AUTHORIZATION) {
        let auth_str = value
            .to_str()
            .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

        return auth_str
            .strip_prefix("Bearer ")
            .map(str::to_string)
            .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()));
    }

    req.cookie(AUTH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(AuthError::MissingAuth)
}

/// Resolve the requester from the token. The token's user must still exist,
/// and the principal carries the stored username.
async fn authenticate(req: HttpRequest) -> Result<Principal, AuthError> {
    let Some(token_service) = req.app_data::<web::Data<Arc<dyn TokenService>>>() else {
        tracing::error!("TokenService not found in app data");
        return Err(AuthError::InvalidToken(
            "Server configuration error".to_string(),
        ));
    };
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        tracing::error!("AppState not found in app data");
        return Err(AuthError::InvalidToken(
            "Server configuration error".to_string(),
        ));
    };

    let token = token_from_request(&req)?;
    let claims = token_service.validate_token(&token)?;

    match state.users.find_by_id(claims.user_id).await {
        Ok(Some(user)) => Ok(user.principal()),
        Ok(None) => {
            tracing::debug!(user_id = %claims.user_id, "Token for unknown user");
            Err(AuthError::InvalidCredentials)
        }
        Err(e) => {
            tracing::error!(error = %e, "User lookup failed");
            Err(AuthError::InvalidToken("Could not verify user".to_string()))
        }
    }
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = LocalBoxFuture<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            authenticate(req)
                .await
                .map(Identity)
                .map_err(AuthenticationError)
        })
    }
}

/// Optional identity extractor - anonymous requests get `None` instead of a 401.
pub struct OptionalIdentity(pub Option<Principal>);

impl OptionalIdentity {
    pub fn principal(&self) -> Option<&Principal> {
        self.0.as_ref()
    }
}

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let principal = match authenticate(req).await {
                Ok(principal) => Some(principal),
                Err(AuthError::MissingAuth) => None,
                Err(e) => {
                    tracing::debug!(error = %e, "Ignoring invalid credentials");
                    None
                }
            };

            Ok(OptionalIdentity(principal))
        })
    }
}
