use actix_web::{http::StatusCode, web, HttpResponse};

use crate::{
    api::{html, logged},
    models::CustomJokeRequest,
    services::JokeClient,
    templates::{
        JokeFragment, TemplateRegistry, CUSTOM_JOKE_FRAGMENT, PERSONAL_JOKE_FRAGMENT,
        RANDOM_JOKE_FRAGMENT,
    },
    utils::{AppError, CurrentSession},
};

// GET /jokes/random
pub async fn random_joke(
    jokes: web::Data<JokeClient>,
    templates: web::Data<TemplateRegistry>,
) -> Result<HttpResponse, AppError> {
    log::info!("🃏 GET /jokes/random");

    let joke = jokes
        .fetch_random_joke()
        .await
        .map_err(logged("GET /jokes/random"))?;

    let body = templates.render(RANDOM_JOKE_FRAGMENT, &JokeFragment { joke })?;
    Ok(html(StatusCode::OK, body))
}

// GET /jokes/personal - names come from the session
pub async fn personal_joke(
    session: Option<web::ReqData<CurrentSession>>,
    jokes: web::Data<JokeClient>,
    templates: web::Data<TemplateRegistry>,
) -> Result<HttpResponse, AppError> {
    let session = session
        .ok_or_else(|| AppError::Authentication("no live session".to_string()))
        .map_err(logged("GET /jokes/personal"))?;
    let entry = &session.entry;

    log::info!("🃏 GET /jokes/personal - {} {}", entry.first_name, entry.last_name);

    let joke = jokes
        .fetch_personal_joke(&entry.first_name, &entry.last_name)
        .await
        .map_err(logged("GET /jokes/personal"))?;

    let body = templates.render(PERSONAL_JOKE_FRAGMENT, &JokeFragment { joke })?;
    Ok(html(StatusCode::OK, body))
}

// POST /jokes/custom {"first": "...", "last": "..."}
pub async fn custom_joke(
    request: web::Json<CustomJokeRequest>,
    jokes: web::Data<JokeClient>,
    templates: web::Data<TemplateRegistry>,
) -> Result<HttpResponse, AppError> {
    let first = request.first.trim();
    let last = request.last.trim();
    log::info!("🃏 POST /jokes/custom - {} {}", first, last);

    if first.is_empty() || last.is_empty() {
        return Err(logged("POST /jokes/custom")(AppError::Validation(
            "both first and last name are required".to_string(),
        )));
    }

    let joke = jokes
        .fetch_personal_joke(first, last)
        .await
        .map_err(logged("POST /jokes/custom"))?;

    let body = templates.render(CUSTOM_JOKE_FRAGMENT, &JokeFragment { joke })?;
    Ok(html(StatusCode::OK, body))
}
