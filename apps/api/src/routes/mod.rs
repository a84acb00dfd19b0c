pub mod health;

use axum::{
    http::Uri,
    routing::{get, post, put},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::editor::handlers as editor;
use crate::errors::AppError;
use crate::render::handlers as render;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless operations
        .route("/api/v1/normalize", post(editor::handle_normalize))
        .route("/api/v1/keywords", post(analysis::handle_keywords))
        .route("/api/v1/ats", post(analysis::handle_ats))
        .route("/api/v1/render/:mode", post(render::handle_render))
        // Editor session
        .route("/api/v1/document", get(editor::handle_get_document))
        .route("/api/v1/document/form", put(editor::handle_apply_form))
        .route("/api/v1/document/edits", post(editor::handle_apply_edit))
        .route(
            "/api/v1/document/keywords",
            post(editor::handle_extract_keywords),
        )
        .route("/api/v1/document/reset", post(editor::handle_reset))
        .route("/api/v1/document/sample", post(editor::handle_load_sample))
        .route("/api/v1/document/import", post(editor::handle_import))
        .route("/api/v1/document/export", get(editor::handle_export))
        .route("/api/v1/document/ats", get(editor::handle_document_ats))
        .route(
            "/api/v1/document/preview/:mode",
            get(render::handle_preview),
        )
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::ats::RuleBasedScorer;
    use crate::config::Config;
    use crate::editor::session::EditorSession;
    use crate::editor::store::MemoryStore;

    async fn app() -> Router {
        let config = Config::from_lookup(|_| None).unwrap();
        let session = EditorSession::open(Arc::new(MemoryStore::default())).await;
        build_router(AppState::new(config, session, Arc::new(RuleBasedScorer)))
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .await
            .oneshot(empty_request(Method::GET, "/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage_key"], "resume_builder_pro_v2_premium");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = app()
            .await
            .oneshot(empty_request(Method::GET, "/api/v1/nothing"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_keywords_endpoint() {
        let response = app()
            .await
            .oneshot(json_request(
                Method::POST,
                "/api/v1/keywords",
                json!({"text": "kafka kafka kafka rust rust go"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["keywords"], json!(["kafka", "rust"]));
        assert_eq!(body["ranked"][0]["frequency"], 3);
    }

    #[tokio::test]
    async fn test_ats_endpoint_scores_empty_resume() {
        let response = app()
            .await
            .oneshot(json_request(Method::POST, "/api/v1/ats", json!({})))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["score"], 45);
        assert_eq!(body["warnings"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_normalize_endpoint_fills_defaults() {
        let response = app()
            .await
            .oneshot(json_request(
                Method::POST,
                "/api/v1/normalize",
                json!({"resume": {"basics": {"name": "Lina"}}}),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["resume"]["basics"]["name"], "Lina");
        assert_eq!(body["resume"]["experience"], json!([]));
        assert_eq!(body["options"]["templateStyle"], "clean");
    }

    #[tokio::test]
    async fn test_render_endpoint() {
        let app = app().await;
        let response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/v1/render/cover",
                json!({"resume": {"basics": {"name": "<b>Lina</b>"}}}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        let html = body_text(response).await;
        assert!(html.contains("&lt;b&gt;Lina&lt;/b&gt;"));

        let response = app
            .oneshot(json_request(Method::POST, "/api/v1/render/pdf", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"]["code"],
            "VALIDATION_ERROR"
        );
    }

    #[tokio::test]
    async fn test_malformed_bodies_are_validation_errors() {
        let app = app().await;
        let requests = [
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/normalize")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{ bad"))
                .unwrap(),
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/render/ats")
                .body(Body::from("{}"))
                .unwrap(),
            json_request(
                Method::POST,
                "/api/v1/document/edits",
                json!({"op": "remove_item", "list": "links", "index": -1}),
            ),
        ];

        for request in requests {
            let uri = request.uri().clone();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            let body = body_json(response).await;
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR", "{uri}");
        }
    }

    #[tokio::test]
    async fn test_edit_out_of_range_is_rejected() {
        let response = app()
            .await
            .oneshot(json_request(
                Method::POST,
                "/api/v1/document/edits",
                json!({"op": "remove_item", "list": "links", "index": 0}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(response).await["error"]["code"],
            "INDEX_OUT_OF_RANGE"
        );
    }

    #[tokio::test]
    async fn test_form_then_edit_round_trip() {
        let app = app().await;
        let response = app
            .clone()
            .oneshot(json_request(
                Method::PUT,
                "/api/v1/document/form",
                json!({"name": " Lina Haddad ", "outputLanguage": "en", "skillsCore": "Rust, Go"}),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["saved"], true);
        assert_eq!(body["save_error"], Value::Null);
        assert_eq!(body["document"]["resume"]["basics"]["name"], "Lina Haddad");

        app.clone()
            .oneshot(json_request(
                Method::POST,
                "/api/v1/document/edits",
                json!({"op": "add_item", "list": "experience"}),
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(empty_request(Method::GET, "/api/v1/document"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["resume"]["skills"]["core"], json!(["Rust", "Go"]));
        assert_eq!(body["resume"]["experience"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_keywords_without_job_description_is_validation_error() {
        let response = app()
            .await
            .oneshot(empty_request(Method::POST, "/api/v1/document/keywords"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_import_is_rejected() {
        let app = app().await;
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/v1/document/import")
                    .body(Body::from("{ not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "IMPORT_ERROR");

        let response = app
            .oneshot(empty_request(Method::GET, "/api/v1/document"))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["resume"]["basics"]["name"], "");
    }

    #[tokio::test]
    async fn test_sample_export_and_preview() {
        let app = app().await;
        app.clone()
            .oneshot(empty_request(Method::POST, "/api/v1/document/sample"))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(empty_request(Method::GET, "/api/v1/document/export"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"resume_سعود_العتيبي.json\""
        );
        let exported = body_json(response).await;
        assert_eq!(exported["resume"]["basics"]["name"], "سعود العتيبي");

        let response = app
            .clone()
            .oneshot(empty_request(Method::GET, "/api/v1/document/ats"))
            .await
            .unwrap();
        assert!(body_json(response).await["score"].as_u64().unwrap() >= 80);

        let response = app
            .oneshot(empty_request(Method::GET, "/api/v1/document/preview/ats"))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("<html lang=\"ar\" dir=\"rtl\">"));
        assert!(html.contains("سعود العتيبي"));
    }
}
