use actix_web::{get, web, Responder};
use serde::Serialize;

use crate::error::Error;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[get("/version")]
pub async fn version() -> Result<impl Responder, Error> {
    Ok(web::Json(VersionResponse { version: VERSION }))
}

/// Liveness only; upstream availability shows up per report section.
#[get("/health")]
pub async fn health() -> Result<impl Responder, Error> {
    Ok(web::Json(HealthResponse { status: "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_status_endpoints() {
        let app = test::init_service(
            App::new().service(
                web::scope("/api").service(version).service(health),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "status": "ok" }));

        let req = test::TestRequest::get().uri("/api/version").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["version"], json!(VERSION));
    }
}
