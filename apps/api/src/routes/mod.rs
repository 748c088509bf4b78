pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::jobpost::handlers as jobpost_handlers;
use crate::state::AppState;
use crate::tailoring::handlers as tailoring_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Tailoring API
        .route("/api/v1/tailor", post(tailoring_handlers::handle_tailor))
        .route(
            "/api/v1/tailor/job-terms",
            post(tailoring_handlers::handle_job_terms),
        )
        // Job Post API
        .route(
            "/api/v1/job-posts/parse",
            post(jobpost_handlers::handle_parse_job_post),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::tailoring::nlp::Capabilities;
    use crate::tailoring::settings::{ContactInfo, TailorConfig};

    fn state() -> AppState {
        let mut tailor_config = TailorConfig::default();
        tailor_config.contact = ContactInfo {
            email: "jane@example.com".to_string(),
            location: "Austin, TX".to_string(),
            phone: "555-0100".to_string(),
        };
        AppState {
            tailor_config: Arc::new(tailor_config),
            capabilities: Capabilities::simple_only(),
        }
    }

    async fn send(method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };
        let response = build_router(state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send("GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "tailor-api");
    }

    #[tokio::test]
    async fn test_tailor_endpoint() {
        let resume = "# Jane\n{{CONTACT_LINE}}\n\n## PROFESSIONAL_EXPERIENCE\n### Engineer\n\
                      - Led migration of billing system\n- Helped with onboarding\n";
        let (status, body) = send(
            "POST",
            "/api/v1/tailor",
            Some(json!({
                "resume_markdown": resume,
                "job_text": "billing migration",
                "title": "Engineer",
                "company": "Globex",
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["run_id"].is_string());
        assert!(body["resume_filename"]
            .as_str()
            .unwrap()
            .ends_with("_resume_globex_engineer.md"));
        assert_eq!(body["report"]["tokenizer_mode"], "simple");
        let kept = &body["report"]["roles"][0]["kept"];
        assert_eq!(kept[0]["bullet"], "- Led migration of billing system");
        assert!(body["markdown"].as_str().unwrap().contains("| jane@example.com |"));
    }

    #[tokio::test]
    async fn test_tailor_requires_title_and_company() {
        let (status, body) = send(
            "POST",
            "/api/v1/tailor",
            Some(json!({ "resume_markdown": "# Jane\n", "job_text": "rust" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Missing required fields: company, title");
    }

    #[tokio::test]
    async fn test_job_terms_endpoint() {
        let (status, body) = send(
            "POST",
            "/api/v1/tailor/job-terms",
            Some(json!({ "job_text": "python python sql", "use_linguistic": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "simple");
        assert_eq!(body["job_terms"], json!(["python", "sql"]));
    }

    #[tokio::test]
    async fn test_job_terms_rejects_empty_text() {
        let (status, _) = send(
            "POST",
            "/api/v1/tailor/job-terms",
            Some(json!({ "job_text": "   " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_parse_job_post_endpoint() {
        let (status, body) = send(
            "POST",
            "/api/v1/job-posts/parse",
            Some(json!({
                "url": "https://www.linkedin.com/jobs/view/1",
                "text": "Acme\nData Engineer\nAustin, TX · Remote\nAbout the job\nBuild things.",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "linkedin");
        assert_eq!(body["company"], "Acme");
        assert_eq!(body["title"], "Data Engineer");
        assert_eq!(body["attributes"]["location"], "Austin, TX");
        assert_eq!(body["attributes"]["workplace_type"], "Remote");
        let date = body["date_pulled"].as_str().unwrap();
        assert_eq!(body["jobpost_filename"], format!("{date}_acme_data_engineer.md"));
        assert!(body["jobpost_markdown"]
            .as_str()
            .unwrap()
            .contains("attributes:\n  location: \"Austin, TX\"\n  workplace_type: \"Remote\"\n"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (status, _) = send("GET", "/api/v1/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
