pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/parse-resume", post(handlers::handle_parse_resume))
        .route("/api/v1/evaluate", post(handlers::handle_evaluate))
        .route(
            "/api/v1/evaluate/sections",
            post(handlers::handle_evaluate_sections),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::mock::ScriptedCollaborator;

    const BOUNDARY: &str = "evaluator-test-boundary";
    const RESUME: &str =
        "John Doe\nEDUCATION\nBS Computer Science, 2020\nEXPERIENCE\nEngineer at Acme, 2021-2023\nSKILLS\nPython, SQL";

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a str),
    }

    fn test_state(collaborator: ScriptedCollaborator) -> AppState {
        AppState {
            collaborator: Arc::new(collaborator),
            config: Config {
                anthropic_api_key: "test-key".to_string(),
                llm_api_url: None,
                llm_timeout: Duration::from_secs(1),
                llm_max_retries: 0,
                max_upload_bytes: 1024 * 1024,
                port: 0,
                rust_log: "info".to_string(),
            },
        }
    }

    fn multipart_body(parts: &[Part]) -> String {
        let mut body = String::new();
        for part in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match part {
                Part::Text(name, value) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )),
                Part::File(name, filename, content) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n{content}\r\n"
                )),
            }
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn multipart_request(uri: &str, parts: &[Part]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state(ScriptedCollaborator::replying("{}")));
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_parse_resume_heuristic() {
        let app = build_router(test_state(ScriptedCollaborator::replying("{}")));
        let request = multipart_request(
            "/api/v1/parse-resume?method=heuristic",
            &[Part::File("file", "resume.txt", RESUME)],
        );
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["method"], "heuristic");
        assert_eq!(body["parsed"]["PROFILE/SUMMARY"], "John Doe");
        assert_eq!(body["parsed"]["EDUCATION"], "BS Computer Science, 2020");
    }

    #[tokio::test]
    async fn test_parse_resume_rejects_unknown_extension() {
        let app = build_router(test_state(ScriptedCollaborator::replying("{}")));
        let request = multipart_request(
            "/api/v1/parse-resume",
            &[Part::File("file", "resume.exe", RESUME)],
        );
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_FILE_TYPE");
    }

    #[tokio::test]
    async fn test_parse_resume_llm_unavailable_is_bad_gateway() {
        let app = build_router(test_state(ScriptedCollaborator::failing(500, "down")));
        let request = multipart_request(
            "/api/v1/parse-resume?method=llm",
            &[Part::File("file", "resume.txt", RESUME)],
        );
        let (status, _) = send(app, request).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_evaluate_end_to_end() {
        let reply = r#"```json
{"suitability_score": 7, "reasoning": "Good fit", "strengths": ["Python"], "weaknesses": [], "recommendations": []}
```"#;
        let app = build_router(test_state(ScriptedCollaborator::replying(reply)));
        let request = multipart_request(
            "/api/v1/evaluate",
            &[
                Part::File("resume", "resume.txt", RESUME),
                Part::Text("job_description", "Required Skills: Python, SQL, Kubernetes"),
            ],
        );
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["filename"], "resume.txt");
        assert_eq!(body["evaluation"]["status"], "success");
        assert_eq!(body["evaluation"]["suitability_score"], 7);
        assert_eq!(
            body["evaluation"]["knockout_checks"]["knockout_reasons"],
            json!(["Missing required skill: kubernetes"])
        );
        assert!(body["evaluation"].get("error").is_none());
        assert!(body["evaluation_id"].is_string());
    }

    #[tokio::test]
    async fn test_evaluate_degrades_when_llm_down() {
        let app = build_router(test_state(ScriptedCollaborator::failing(529, "overloaded")));
        let request = multipart_request(
            "/api/v1/evaluate",
            &[
                Part::File("resume", "resume.txt", RESUME),
                Part::Text("job_description", "Python engineer with SQL skills"),
            ],
        );
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["evaluation"]["status"], "failed");
        assert_eq!(body["evaluation"]["suitability_score"], 0);
        assert!(body["evaluation"]["technical_metrics"]["keyword_density"].as_f64().unwrap() > 0.0);
    }

    #[tokio::test]
    async fn test_evaluate_requires_job_description() {
        let app = build_router(test_state(ScriptedCollaborator::replying("{}")));
        let request = multipart_request(
            "/api/v1/evaluate",
            &[Part::File("resume", "resume.txt", RESUME)],
        );
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_evaluate_sections_json() {
        let app = build_router(test_state(ScriptedCollaborator::replying("garbage")));
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/evaluate/sections")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({
                    "sections": {"SKILLS": {"technical": ["Rust", "SQL"]}},
                    "job_description": "Rust and SQL developer"
                })
                .to_string(),
            ))
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["evaluation"]["status"], "degraded");
        assert!(body["evaluation"]["error"]
            .as_str()
            .unwrap()
            .contains("garbage"));
        assert!(body.get("filename").is_none());
    }
}
