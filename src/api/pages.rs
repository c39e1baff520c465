use actix_web::{
    cookie::Cookie,
    http::{header, StatusCode},
    web, HttpResponse,
};

use crate::{
    api::{html, logged, session_cookie},
    models::{Credentials, NewUser},
    services::{JokeClient, UserStore},
    templates::{
        Greeting, HomePage, LoginPage, RegistrationPage, TemplateRegistry, HOME_PAGE, LOGIN_PAGE,
        REGISTRATION_PAGE,
    },
    utils::{AppError, CurrentSession, SessionEntry, SessionStore, SESSION_COOKIE},
};

// GET /
pub async fn login_page(templates: web::Data<TemplateRegistry>) -> Result<HttpResponse, AppError> {
    log::info!("📄 GET /");
    render_login(&templates, StatusCode::OK, LoginPage::default())
}

// POST /home
pub async fn login(
    form: web::Form<Credentials>,
    users: web::Data<UserStore>,
    jokes: web::Data<JokeClient>,
    sessions: web::Data<SessionStore>,
    templates: web::Data<TemplateRegistry>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔐 POST /home");

    let credentials = match form.into_inner().validated() {
        Ok(credentials) => credentials,
        Err(e) => return login_failed(&templates, e),
    };

    let user = match users.user_login(&credentials).await {
        Ok(user) => user,
        Err(e @ (AppError::NotFound(_) | AppError::Authentication(_))) => {
            return login_failed(&templates, e)
        }
        Err(e) => return Err(logged("POST /home")(e)),
    };

    let random_joke = jokes.fetch_random_joke().await.map_err(logged("POST /home"))?;
    let personal_joke = jokes
        .fetch_personal_joke(&user.first_name, &user.last_name)
        .await
        .map_err(logged("POST /home"))?;

    let body = templates.render(
        HOME_PAGE,
        &HomePage {
            user: Greeting::from(&user),
            random_joke,
            personal_joke,
        },
    )?;

    let token = sessions.create(SessionEntry {
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
    });

    log::info!("✅ Login successful: {}", user.username);

    let mut response = html(StatusCode::OK, body);
    response
        .add_cookie(&session_cookie(token, sessions.ttl()))
        .map_err(|e| AppError::Template(format!("Failed to set session cookie: {}", e)))?;
    Ok(response)
}

// GET /home
pub async fn home(
    session: Option<web::ReqData<CurrentSession>>,
    jokes: web::Data<JokeClient>,
    templates: web::Data<TemplateRegistry>,
) -> Result<HttpResponse, AppError> {
    let Some(session) = session else {
        log::info!("📄 GET /home - no session, showing login");
        return render_login(&templates, StatusCode::OK, LoginPage::default());
    };
    let entry = &session.entry;
    log::info!("📄 GET /home - {} {}", entry.first_name, entry.last_name);

    let random_joke = jokes.fetch_random_joke().await.map_err(logged("GET /home"))?;
    let personal_joke = jokes
        .fetch_personal_joke(&entry.first_name, &entry.last_name)
        .await
        .map_err(logged("GET /home"))?;

    let body = templates.render(
        HOME_PAGE,
        &HomePage {
            user: Greeting {
                first_name: entry.first_name.clone(),
                last_name: entry.last_name.clone(),
                username: None,
                email: None,
                member_since: None,
            },
            random_joke,
            personal_joke,
        },
    )?;

    Ok(html(StatusCode::OK, body))
}

// GET /signup
pub async fn signup_page(templates: web::Data<TemplateRegistry>) -> Result<HttpResponse, AppError> {
    log::info!("📄 GET /signup");
    let body = templates.render(REGISTRATION_PAGE, &RegistrationPage::default())?;
    Ok(html(StatusCode::OK, body))
}

// POST /signupact
pub async fn signup(
    form: web::Form<NewUser>,
    users: web::Data<UserStore>,
    templates: web::Data<TemplateRegistry>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /signupact - username: {}", form.username);

    let submitted = form.into_inner();
    let new_user = match submitted.clone().validated() {
        Ok(user) => user,
        Err(e) => return signup_failed(&templates, &submitted, e),
    };

    if let Err(e) = users.insert_user(&new_user).await {
        return signup_failed(&templates, &new_user, e);
    }

    render_login(
        &templates,
        StatusCode::OK,
        LoginPage {
            error: None,
            notice: Some("Account created. Log in with your new credentials.".to_string()),
        },
    )
}

// GET /logout
pub async fn logout(
    session: Option<web::ReqData<CurrentSession>>,
    sessions: web::Data<SessionStore>,
) -> HttpResponse {
    if let Some(session) = session {
        sessions.remove(&session.token);
        log::info!("👋 Logged out {} {}", session.entry.first_name, session.entry.last_name);
    }

    let mut response = HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish();
    let removal = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    if let Err(e) = response.add_removal_cookie(&removal) {
        log::warn!("⚠️  Failed to clear session cookie: {}", e);
    }
    response
}

fn render_login(
    templates: &TemplateRegistry,
    status: StatusCode,
    page: LoginPage,
) -> Result<HttpResponse, AppError> {
    let body = templates.render(LOGIN_PAGE, &page)?;
    Ok(html(status, body))
}

fn login_failed(templates: &TemplateRegistry, err: AppError) -> Result<HttpResponse, AppError> {
    log::warn!("❌ Login failed: {}", err);
    render_login(
        templates,
        actix_web::ResponseError::status_code(&err),
        LoginPage {
            error: Some(err.user_message()),
            notice: None,
        },
    )
}

fn signup_failed(
    templates: &TemplateRegistry,
    form: &NewUser,
    err: AppError,
) -> Result<HttpResponse, AppError> {
    log::warn!("❌ Registration failed: {} - {}", form.username, err);
    let page = RegistrationPage {
        error: Some(err.user_message()),
        username: form.username.clone(),
        email: form.email.clone(),
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
    };
    let body = templates.render(REGISTRATION_PAGE, &page)?;
    Ok(html(actix_web::ResponseError::status_code(&err), body))
}
