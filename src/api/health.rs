use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::services::UserStore;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
    pub database: String,
}

// GET /health
pub async fn health_check(users: web::Data<UserStore>) -> impl Responder {
    let database = match users.ping().await {
        Ok(()) => "up",
        Err(e) => {
            log::warn!("⚠️  Health check: database unreachable: {}", e);
            "down"
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: if database == "up" { "healthy" } else { "degraded" }.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        database: database.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::TestContext;
    use crate::database::memory::BrokenUserTable;
    use actix_web::test;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_health_reports_database() {
        let ctx = TestContext::new().await;
        let app = test_app!(ctx);

        let resp: HealthResponse =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(resp.status, "healthy");
        assert_eq!(resp.database, "up");
        assert_eq!(resp.service, "jokers");
    }

    #[actix_web::test]
    async fn test_health_degraded_without_database() {
        let ctx = TestContext::with_table(Arc::new(BrokenUserTable)).await;
        let app = test_app!(ctx);

        let resp: HealthResponse =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(resp.status, "degraded");
        assert_eq!(resp.database, "down");
    }
}
