//! In-process application wiring for handler tests.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::{test, web};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use blog_core::domain::User;
use blog_core::ports::{
    Clock, FixedClock, PasswordService, PostRepository, TokenService, UserRepository,
};
use blog_infra::{
    Argon2PasswordService, InMemoryPostRepository, InMemoryUserRepository, JwtConfig,
    JwtTokenService,
};

use crate::handlers::configure_routes;
use crate::state::AppState;

pub struct TestApp {
    pub state: AppState,
    pub posts: Arc<dyn PostRepository>,
    pub clock: Arc<FixedClock>,
    pub tokens: Arc<dyn TokenService>,
}

impl TestApp {
    pub fn new(now: DateTime<Utc>) -> Self {
        let clock = Arc::new(FixedClock::new(now));
        let posts: Arc<dyn PostRepository> = Arc::new(InMemoryPostRepository::new());
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            ..JwtConfig::default()
        }));

        Self {
            state: AppState::from_parts(posts.clone(), users, clock.clone() as Arc<dyn Clock>),
            posts,
            clock,
            tokens,
        }
    }

    /// Store a user named `username` and return a bearer token for it.
    pub async fn token_for(&self, username: &str) -> String {
        let user = self
            .state
            .users
            .insert(User::new(username.to_string(), "unused-hash".to_string()))
            .await
            .unwrap();
        self.tokens.generate_token(user.id, &user.username).unwrap()
    }

    /// A correctly signed token whose user was never stored.
    pub fn token_for_unknown_user(&self) -> String {
        self.tokens.generate_token(Uuid::new_v4(), "ghost").unwrap()
    }

    /// Register state, auth services and routes on an `App`.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::default());

        cfg.app_data(web::Data::new(self.state.clone()))
            .app_data(web::Data::new(self.tokens.clone()))
            .app_data(web::Data::new(passwords))
            .configure(configure_routes);
    }
}

pub async fn body_string<B: MessageBody>(resp: ServiceResponse<B>) -> String {
    let bytes = test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).unwrap()
}
