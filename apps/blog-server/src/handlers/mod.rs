//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;

use actix_web::web;

use crate::views::PageError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Undecodable form bodies get the HTML error page
    let form_config = web::FormConfig::default()
        .error_handler(|err, _req| PageError::BadRequest(err.to_string()).into());

    cfg.app_data(form_config)
        // Blog pages
        .route("/", web::get().to(posts::post_list))
        .service(
            web::resource("/post/new/")
                .route(web::get().to(posts::post_new_form))
                .route(web::post().to(posts::post_new)),
        )
        .route(r"/post/{id:\d+}/", web::get().to(posts::post_detail))
        .service(
            web::resource(r"/post/{id:\d+}/edit/")
                .route(web::get().to(posts::post_edit_form))
                .route(web::post().to(posts::post_edit)),
        )
        // JSON API
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register))
                        .route("/login", web::post().to(auth::login))
                        .route("/me", web::get().to(auth::me)),
                ),
        );
}
