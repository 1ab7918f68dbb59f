use actix_web::{post, web, HttpResponse};

use crate::{
    configuration::{AppState, State},
    error::Error,
    handler::generate_report,
    types::AnalysisRequest,
};

/// Builds a risk report for one wallet. Admission (payment) is enforced in
/// front of this service.
#[post("/report")]
pub async fn index(
    state: web::Data<AppState<State>>,
    request: web::Json<AnalysisRequest>,
) -> Result<HttpResponse, Error> {
    let report = generate_report(&state.http, &request).await?;

    Ok(HttpResponse::Ok().json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        configuration::{Config, UpstreamEndpoints},
        provider::HTTP,
        server::json_config,
    };
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};
    use url::Url;

    fn app_state() -> AppState<State> {
        // nothing listens on the discard port, so every upstream is Absent
        let url = Url::parse("http://127.0.0.1:9/").unwrap();
        let config = Config {
            server_host: String::from("127.0.0.1"),
            port: 0,
            allowed_origins: vec![String::from("*")],
            timeout: 1,
            internal_secret: String::from("s3cr3t"),
            endpoints: UpstreamEndpoints {
                lending: url.clone(),
                yields: url.clone(),
                lp_analysis: url.clone(),
                portfolio: url.clone(),
                perps: url.clone(),
                arbitrage: url,
            },
        };
        let http = HTTP::new(config.clone()).unwrap();
        AppState::new(State::new(config, http))
    }

    #[actix_web::test]
    async fn test_report_with_unavailable_upstreams() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .app_data(json_config())
                .service(web::scope("/api").service(index)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/report")
            .set_json(json!({
                "wallet_address": "0x742d35Cc6634C0532925a3b844Bc454e4438f44e",
                "include_perps": true
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["overall_risk_score"], json!(0));
        assert_eq!(body["critical_alerts"], json!([]));
        assert_eq!(body["lending_analysis"], Value::Null);
        assert_eq!(body["perps_analysis"], Value::Null);
        assert!(body.get("arbitrage_opportunities").is_some());
        assert!(body["summary"]
            .as_str()
            .unwrap()
            .contains("No active positions"));
    }

    #[actix_web::test]
    async fn test_invalid_wallet_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .app_data(json_config())
                .service(web::scope("/api").service(index)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/report")
            .set_json(json!({ "wallet_address": "not-an-address" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], json!(400));
    }

    #[actix_web::test]
    async fn test_malformed_body_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .app_data(json_config())
                .service(web::scope("/api").service(index)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/report")
            .set_json(json!({ "chain_ids": [1] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
