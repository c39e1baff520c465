// Template registry: parsed once at startup, read-only afterwards.
// Each handler fills its own page struct; nothing is shared between requests.

use serde::Serialize;
use tera::{Context, Tera};

use crate::models::{JokeData, User};
use crate::utils::AppError;

pub const LOGIN_PAGE: &str = "login.html";
pub const HOME_PAGE: &str = "home.html";
pub const REGISTRATION_PAGE: &str = "registration.html";
pub const RANDOM_JOKE_FRAGMENT: &str = "fragments/random_joke.html";
pub const PERSONAL_JOKE_FRAGMENT: &str = "fragments/personal_joke.html";
pub const CUSTOM_JOKE_FRAGMENT: &str = "fragments/custom_joke.html";

const REQUIRED: [&str; 6] = [
    LOGIN_PAGE,
    HOME_PAGE,
    REGISTRATION_PAGE,
    RANDOM_JOKE_FRAGMENT,
    PERSONAL_JOKE_FRAGMENT,
    CUSTOM_JOKE_FRAGMENT,
];

#[derive(Debug, Serialize, Default)]
pub struct LoginPage {
    pub error: Option<String>,
    pub notice: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct RegistrationPage {
    pub error: Option<String>,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// What the home page shows about the user
#[derive(Debug, Serialize)]
pub struct Greeting {
    pub first_name: String,
    pub last_name: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub member_since: Option<String>,
}

impl From<&User> for Greeting {
    fn from(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: Some(user.username.clone()),
            email: Some(user.email.clone()),
            member_since: Some(user.created_on.format("%B %e, %Y").to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub user: Greeting,
    pub random_joke: JokeData,
    pub personal_joke: JokeData,
}

#[derive(Debug, Serialize)]
pub struct JokeFragment {
    pub joke: JokeData,
}

pub struct TemplateRegistry {
    tera: Tera,
}

impl TemplateRegistry {
    /// Parses every `*.html` under `dir` and checks the pages we render exist
    pub fn load(dir: &str) -> Result<Self, AppError> {
        let glob = format!("{}/**/*.html", dir.trim_end_matches('/'));
        let tera = Tera::new(&glob)?;

        let loaded: Vec<&str> = tera.get_template_names().collect();
        for name in REQUIRED {
            if !loaded.contains(&name) {
                return Err(AppError::Template(format!(
                    "template '{}' not found in {}",
                    name, dir
                )));
            }
        }

        log::info!("📄 Loaded {} templates from {}", loaded.len(), dir);
        Ok(Self { tera })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, AppError> {
        let context = Context::from_serialize(data)?;
        Ok(self.tera.render(name, &context)?)
    }
}

#[cfg(test)]
pub(crate) fn test_registry() -> TemplateRegistry {
    TemplateRegistry::load(concat!(env!("CARGO_MANIFEST_DIR"), "/web/templates"))
        .expect("templates should load")
}
