//! Notewise HTTP server
//!
//! actix-web REST API for note cleansing jobs and LLM summaries

pub mod auth;
pub mod error;
pub mod job_manager;
pub mod routes;
pub mod state;
pub mod types;
pub mod workflow;

pub use error::ApiError;
pub use job_manager::JobManager;
pub use state::AppState;
pub use workflow::SummaryWorkflow;

use actix_cors::Cors;
use actix_web::{http::Method, web, App, HttpServer};
use notewise_common::{AppConfig, NotewiseError, Result};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

/// JSON body limits and error mapping shared by all routes
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(4 * 1024 * 1024)
        .error_handler(|err, _req| {
            ApiError::from(NotewiseError::invalid_input(err.to_string())).into()
        })
}

fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_any_header()
}

/// Build state from `config` and serve until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    let bind_addr = config.server_bind_address();
    let state = Arc::new(AppState::new(config)?);

    info!(
        "Starting Notewise server on {} (LLM platform: {})",
        bind_addr,
        state.workflow.platform()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors())
            .app_data(web::Data::new(state.clone()))
            .app_data(json_config())
            .configure(routes::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("Notewise server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use async_trait::async_trait;
    use notewise_llm::{GenerationParams, LlmProvider, ParamProfiles, PromptLibrary};
    use serde_json::{json, Value};
    use std::time::Duration;

    const KEY: &str = "test-key";

    /// Echoes a fixed reply per prompt, or fails every call
    struct StubProvider {
        params: ParamProfiles,
        reply: Option<String>,
    }

    #[async_trait]
    impl LlmProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        fn params(&self) -> &ParamProfiles {
            &self.params
        }

        async fn generate_text(
            &self,
            prompts: &[String],
            _params: &GenerationParams,
        ) -> Result<Vec<String>> {
            match &self.reply {
                Some(reply) => Ok(prompts.iter().map(|_| reply.clone()).collect()),
                None => Err(NotewiseError::connection(
                    "Exception occurred while connecting to LLM platform: refused",
                )),
            }
        }
    }

    fn state_with_reply(reply: Option<&str>) -> Arc<AppState> {
        let config = AppConfig {
            app_api_key: KEY.to_string(),
            ..AppConfig::default()
        };
        let provider = Arc::new(StubProvider {
            params: ParamProfiles::load(None).unwrap(),
            reply: reply.map(str::to_string),
        });
        Arc::new(AppState::with_provider(
            config,
            provider,
            PromptLibrary::load(None).unwrap(),
        ))
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .app_data(json_config())
                    .configure(routes::configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_health_needs_no_key() {
        let app = app!(state_with_reply(Some("x")));
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"status": "ok", "platform": "stub"}));
    }

    #[actix_web::test]
    async fn test_wrong_api_key_rejected() {
        let app = app!(state_with_reply(Some("x")));
        let req = test::TestRequest::post()
            .uri("/text-tools/long-summary")
            .insert_header(("api-key", "wrong"))
            .set_json(json!({"work_note": "db down"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"detail": "Could not validate api-key!"}));

        let req = test::TestRequest::get()
            .uri("/text-tools/cleanse-note/status/abc")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_cleanse_lifecycle() {
        let state = state_with_reply(Some("x"));
        let app = app!(state.clone());

        let req = test::TestRequest::post()
            .uri("/text-tools/cleanse-note")
            .insert_header(("api-key", KEY))
            .set_json(json!({"work_note": "2024-01-01 10:00:00 Disk full on node 3\nthanks"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::ACCEPTED);
        let body: Value = test::read_body_json(resp).await;
        let id = body["transaction_id"].as_str().unwrap().to_string();
        assert_eq!(body["status"], "In progress");

        let mut status = String::new();
        for _ in 0..100 {
            let req = test::TestRequest::get()
                .uri(&format!("/text-tools/cleanse-note/status/{}", id))
                .insert_header(("api-key", KEY))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            status = body["status"].as_str().unwrap().to_string();
            if status != "In progress" {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(status, "Success");

        let req = test::TestRequest::get()
            .uri(&format!("/text-tools/cleanse-note/{}", id))
            .insert_header(("api-key", KEY))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            json!({"transaction_id": id, "status": "Success", "result": "Disk full on node 3"})
        );
        assert_eq!(state.job_manager.len().await, 1);
    }

    #[actix_web::test]
    async fn test_unknown_transaction() {
        let app = app!(state_with_reply(Some("x")));
        let req = test::TestRequest::get()
            .uri("/text-tools/cleanse-note/nope")
            .insert_header(("api-key", KEY))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({"transaction_id": "nope", "status": "Not found", "result": "NA"})
        );
    }

    #[actix_web::test]
    async fn test_long_summary() {
        let app = app!(state_with_reply(Some("Disk was full.")));
        let req = test::TestRequest::post()
            .uri("/text-tools/long-summary")
            .insert_header(("api-key", KEY))
            .set_json(json!({"work_note": "Node 3 ran out of disk. Logs rotated."}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"summary": "Disk was full."}));
    }

    #[actix_web::test]
    async fn test_short_summary_is_local() {
        // A failing provider proves no LLM call happens
        let app = app!(state_with_reply(None));
        let req = test::TestRequest::post()
            .uri("/text-tools/short-summary")
            .insert_header(("api-key", KEY))
            .set_json(json!({"work_note": "Disk full on node 3."}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"summary": "Disk full on node 3."}));
    }

    #[actix_web::test]
    async fn test_structured_summary() {
        let app = app!(state_with_reply(Some(
            r#"{"Issue Title": "Disk full", "Resolver Group": "storage"}"#
        )));
        let req = test::TestRequest::post()
            .uri("/text-tools/structured-summary")
            .insert_header(("api-key", KEY))
            .set_json(json!({"work_note": "Node 3 ran out of disk."}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["issue_title"], "Disk full");
        assert_eq!(body["resolver_group"], "storage");
        assert_eq!(body["root_cause"], "");
    }

    #[actix_web::test]
    async fn test_build_summary_route_has_trailing_slash() {
        let app = app!(state_with_reply(Some(r#"{"version": "2.0"}"#)));
        let req = test::TestRequest::post()
            .uri("/text-tools/build-summary/")
            .insert_header(("api-key", KEY))
            .set_json(json!({"logs": "build 2.0 failed at step test"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["version"], "2.0");
    }

    #[actix_web::test]
    async fn test_major_incident_email_is_trimmed() {
        let app = app!(state_with_reply(Some(
            "Subject: P1\nDear all,\nCRM is unavailable.\nBest regards"
        )));
        let req = test::TestRequest::post()
            .uri("/text-tools/major-incident-communication")
            .insert_header(("api-key", KEY))
            .set_json(json!({"work_note": "CRM down"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"email_content": "CRM is unavailable."}));
    }

    #[actix_web::test]
    async fn test_telemetry_summary() {
        let app = app!(state_with_reply(Some("Heap exhausted.")));
        let req = test::TestRequest::post()
            .uri("/text-tools/telemetry-summary")
            .insert_header(("api-key", KEY))
            .set_json(json!({"anomaly": "spike", "metric": "memory", "error": "OOM"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"summary": "Heap exhausted."}));
    }

    #[actix_web::test]
    async fn test_oversized_note_rejected() {
        let app = app!(state_with_reply(Some("x")));
        let req = test::TestRequest::post()
            .uri("/text-tools/long-summary")
            .insert_header(("api-key", KEY))
            .set_json(json!({"work_note": "a".repeat(35_001 * 4)}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .contains("Cannot process more than 35000 tokens"));
    }

    #[actix_web::test]
    async fn test_malformed_body_is_bad_request() {
        let app = app!(state_with_reply(Some("x")));
        let req = test::TestRequest::post()
            .uri("/text-tools/long-summary")
            .insert_header(("api-key", KEY))
            .set_json(json!({"note": "wrong field"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_platform_failure_surfaces_message() {
        let app = app!(state_with_reply(None));
        let req = test::TestRequest::post()
            .uri("/text-tools/long-summary")
            .insert_header(("api-key", KEY))
            .set_json(json!({"work_note": "db down"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["detail"],
            "Exception occurred while connecting to LLM platform: refused"
        );
    }
}
