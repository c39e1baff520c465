#[cfg(test)]
#[macro_use]
mod test_support;

pub mod health;
pub mod jokes;
pub mod pages;

use actix_web::{
    cookie::{time, Cookie, SameSite},
    http::header::ContentType,
    web, HttpResponse,
};
use std::time::Duration;

use crate::utils::{AppError, SESSION_COOKIE};

/// Registers every route plus the form/JSON error handlers.
///
/// Shared state (`UserStore`, `JokeClient`, `SessionStore`,
/// `TemplateRegistry`) must already be on the `App` as `web::Data`.
pub fn configure(static_dir: String) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::FormConfig::default().error_handler(|err, _req| {
            log::warn!("❌ Malformed form body: {}", err);
            AppError::Validation(err.to_string()).into()
        }))
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            log::warn!("❌ Malformed JSON body: {}", err);
            AppError::Validation(err.to_string()).into()
        }))
        .route("/health", web::get().to(health::health_check))
        // Pages
        .route("/", web::get().to(pages::login_page))
        .service(
            web::resource("/home")
                .route(web::post().to(pages::login))
                .route(web::get().to(pages::home)),
        )
        .route("/signup", web::get().to(pages::signup_page))
        .route("/signupact", web::post().to(pages::signup))
        .route("/logout", web::get().to(pages::logout))
        // Joke fragments (swapped in by home.js)
        .service(
            web::scope("/jokes")
                .route("/random", web::get().to(jokes::random_joke))
                .route("/personal", web::get().to(jokes::personal_joke))
                .route("/custom", web::post().to(jokes::custom_joke)),
        )
        .service(actix_files::Files::new("/web/static", static_dir));
    }
}

pub(crate) fn html(status: actix_web::http::StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body)
}

pub(crate) fn session_cookie(token: String, ttl: Duration) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)))
        .finish()
}

/// Logs a failed request before `?` turns it into a bare status
pub(crate) fn logged(route: &'static str) -> impl Fn(AppError) -> AppError {
    move |err| {
        match &err {
            AppError::Validation(_) | AppError::Authentication(_) | AppError::NotFound(_) => {
                log::warn!("❌ {} failed: {}", route, err)
            }
            _ => log::error!("❌ {} failed: {}", route, err),
        }
        err
    }
}
