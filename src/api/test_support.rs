// Shared fixtures for handler tests: in-memory users table, a wiremock
// joke API, real templates from web/templates.

use actix_web::web;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::database::{memory::MemoryUserTable, UserTable};
use crate::models::NewUser;
use crate::services::{JokeClient, UserStore};
use crate::templates::{test_registry, TemplateRegistry};
use crate::utils::SessionStore;

pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/web/static");

pub struct TestContext {
    pub users: web::Data<UserStore>,
    pub jokes: web::Data<JokeClient>,
    pub sessions: web::Data<SessionStore>,
    pub templates: web::Data<TemplateRegistry>,
    pub upstream: MockServer,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_table(Arc::new(MemoryUserTable::new())).await
    }

    pub async fn with_table(table: Arc<dyn UserTable>) -> Self {
        let upstream = MockServer::start().await;
        let jokes = JokeClient::new(format!("{}/jokes/random", upstream.uri()), None)
            .expect("client builds");

        Self {
            users: web::Data::new(UserStore::new(table, 4)),
            jokes: web::Data::new(jokes),
            sessions: web::Data::new(SessionStore::new(Duration::from_secs(60))),
            templates: web::Data::new(test_registry()),
            upstream,
        }
    }

    /// Upstream answers every plain request with `text`
    pub async fn serve_random_joke(&self, text: &str) {
        Mock::given(method("GET"))
            .and(path("/jokes/random"))
            .respond_with(ResponseTemplate::new(200).set_body_json(joke_envelope(1, text)))
            .mount(&self.upstream)
            .await;
    }

    /// Upstream answers requests naming `first`/`last` with `text`
    pub async fn serve_personal_joke(&self, first: &str, last: &str, text: &str) {
        Mock::given(method("GET"))
            .and(path("/jokes/random"))
            .and(query_param("firstName", first))
            .and(query_param("lastName", last))
            .respond_with(ResponseTemplate::new(200).set_body_json(joke_envelope(2, text)))
            .with_priority(1)
            .mount(&self.upstream)
            .await;
    }

    pub async fn fail_upstream(&self) {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&self.upstream)
            .await;
    }

    pub async fn register_ann(&self) {
        self.users
            .insert_user(&NewUser {
                username: "ann".into(),
                email: "ann@example.com".into(),
                first_name: "Ann".into(),
                last_name: "Lee".into(),
                password: "P@ssw0rd".into(),
            })
            .await
            .expect("registration succeeds");
    }
}

pub fn joke_envelope(id: i64, text: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "success",
        "value": { "id": id, "joke": text, "categories": [] }
    })
}

macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($ctx.users.clone())
                .app_data($ctx.jokes.clone())
                .app_data($ctx.sessions.clone())
                .app_data($ctx.templates.clone())
                .wrap($crate::middleware::SessionLoader::new($ctx.sessions.clone()))
                .wrap($crate::middleware::SecurityHeaders)
                .configure($crate::api::configure(
                    $crate::api::test_support::STATIC_DIR.to_string(),
                )),
        )
        .await
    };
}
