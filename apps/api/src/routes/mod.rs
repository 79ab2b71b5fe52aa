pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::documents::handlers as documents;
use crate::export::handlers as export;
use crate::letters::handlers as letters;
use crate::profiles::handlers as profiles;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Identity and profile
        .route("/api/v1/auth/events", post(profiles::handle_auth_event))
        .route("/api/v1/profile", get(profiles::handle_get_profile))
        // Résumé upload
        .route(
            "/api/v1/documents/upload",
            post(documents::handle_upload).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        // Letters
        .route("/api/v1/letters", get(letters::handle_list_letters))
        .route("/api/v1/letters/generate", post(letters::handle_generate))
        .route("/api/v1/letters/export", post(export::handle_export))
        .route("/api/v1/letters/:id", get(letters::handle_get_letter))
        .route("/api/v1/letters/:id/pdf", get(export::handle_letter_pdf))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::auth::testing::StaticVerifier;
    use crate::auth::Identity;
    use crate::config::Config;
    use crate::llm_client::LlmClient;

    const TOKEN: &str = "valid-token";

    /// Router whose database and LLM point at unroutable addresses. Any test
    /// that reaches them would fail, so these only cover paths that must not.
    fn test_router() -> Router {
        let config = Config::for_tests();
        let db = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        let llm = LlmClient::new(config.openai_api_key.clone(), config.openai_base_url.clone())
            .unwrap();
        let identity = Arc::new(StaticVerifier {
            token: TOKEN,
            identity: Identity {
                uid: "uid-1".to_string(),
                email: Some("ada@example.com".to_string()),
            },
        });

        build_router(AppState {
            db,
            llm,
            identity,
            archive: None,
            config,
        })
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn multipart_request(field: &str, file_name: &str, content_type: &str, data: &str) -> Request<Body> {
        let boundary = "coverly-test-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
             Content-Type: {content_type}\r\n\r\n\
             {data}\r\n\
             --{boundary}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/api/v1/documents/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_ok() {
        let response = test_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "coverly-api");
    }

    #[tokio::test]
    async fn test_generate_rejects_missing_input() {
        let response = test_router()
            .oneshot(json_request(
                "POST",
                "/api/v1/letters/generate",
                r#"{"resume_text": "   ", "job_description": "Rust engineer"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["error"]["message"],
            "Missing input: resume_text and job_description are required"
        );
    }

    #[tokio::test]
    async fn test_generate_rejects_absent_fields() {
        let response = test_router()
            .oneshot(json_request("POST", "/api/v1/letters/generate", "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_profile_requires_token() {
        let response = test_router()
            .oneshot(Request::get("/api/v1/profile").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_invalid_token_is_unauthorized() {
        let response = test_router()
            .oneshot(
                Request::get("/api/v1/letters")
                    .header(header::AUTHORIZATION, "Bearer forged")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_signup_with_missing_fields_rejected() {
        let mut request = json_request(
            "POST",
            "/api/v1/auth/events",
            r#"{"event": "signup", "profile": {"full_name": "Ada Lovelace", "address": ""}}"#,
        );
        request.headers_mut().insert(
            header::AUTHORIZATION,
            format!("Bearer {TOKEN}").parse().unwrap(),
        );

        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Please fill all profile fields.");
    }

    #[tokio::test]
    async fn test_export_returns_pdf_attachment() {
        let response = test_router()
            .oneshot(json_request(
                "POST",
                "/api/v1/letters/export",
                r#"{"cover_letter": "Ada Lovelace\n\nDear Hiring Manager,\n\nSincerely,\nAda"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"cover-letter.pdf\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_export_rejects_empty_letter() {
        let response = test_router()
            .oneshot(json_request(
                "POST",
                "/api/v1/letters/export",
                r#"{"cover_letter": ""}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_text_file_returns_text() {
        let response = test_router()
            .oneshot(multipart_request(
                "file",
                "resume.txt",
                "text/plain",
                "Ada Lovelace\nAnalyst",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["text"], "Ada Lovelace\nAnalyst");
        assert!(body.get("archived_key").is_none());
    }

    #[tokio::test]
    async fn test_upload_without_file_field_rejected() {
        let response = test_router()
            .oneshot(multipart_request(
                "attachment",
                "resume.txt",
                "text/plain",
                "Ada",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "No file uploaded");
    }

    #[tokio::test]
    async fn test_upload_unsupported_type() {
        let response = test_router()
            .oneshot(multipart_request("file", "scan.png", "image/png", "not an image"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
