//! Application router configuration.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::ServerState;

/// Create the application router.
pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .route("/api/mods", get(handlers::list_mods))
        .route("/api/mods/:name/current", get(handlers::current))
        .route("/api/mods/:name/save", post(handlers::save))
        .route("/api/mods/:name/do", post(handlers::apply))
        .route("/api/restart", post(handlers::restart))
        .route("/api/restore-backpack", post(handlers::restore_backpack))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::path::PathBuf;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    use wired_core::{ModInfo, ModRegistry, Modification, Result as ModResult};
    use wired_device::{
        CommandChannel, DeviceLifecycle, LifecycleTiming, ServiceController, SubmitStatus,
    };

    struct EchoMod {
        info: ModInfo,
        saved: tokio::sync::Mutex<String>,
    }

    #[async_trait]
    impl Modification for EchoMod {
        fn info(&self) -> &ModInfo {
            &self.info
        }

        fn accepts(&self) -> &str {
            "application/json"
        }

        fn default_json(&self) -> serde_json::Value {
            serde_json::json!({"value": 0})
        }

        async fn load(&mut self) -> ModResult<()> {
            Ok(())
        }

        async fn current(&self) -> String {
            self.saved.lock().await.clone()
        }

        fn set_fs_root(&mut self, _root: PathBuf) {}

        async fn save(&self, content_type: &str, payload: &str) -> ModResult<()> {
            self.check_content_type(content_type)?;
            *self.saved.lock().await = payload.to_string();
            Ok(())
        }

        async fn apply(&self, content_type: &str, payload: &str) -> ModResult<()> {
            self.save(content_type, payload).await
        }
    }

    struct NoopController;

    #[async_trait]
    impl ServiceController for NoopController {
        async fn stop_unit(&self, _unit: &str) -> SubmitStatus {
            SubmitStatus::Confirmed
        }

        async fn start_unit(&self, _unit: &str) -> SubmitStatus {
            SubmitStatus::Confirmed
        }

        async fn is_active(&self, _unit: &str) -> wired_device::Result<bool> {
            Ok(true)
        }
    }

    fn test_router() -> Router {
        let mut registry = ModRegistry::new();
        registry
            .register(EchoMod {
                info: ModInfo::new("LED", "LED control"),
                saved: tokio::sync::Mutex::new(String::new()),
            })
            .unwrap();

        let lifecycle = DeviceLifecycle::new(Arc::new(NoopController))
            .with_channel(CommandChannel::with_url("ws://127.0.0.1:9/socket"))
            .with_timing(LifecycleTiming::immediate());
        let state = ServerState::new(Arc::new(registry), Arc::new(lifecycle), "/tmp");
        create_router(state)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn list_includes_registered_mods() {
        let response = test_router()
            .oneshot(Request::get("/api/mods").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains(r#""name":"LED""#));
        assert!(body.contains(r#""restartRequired":false"#));
    }

    #[tokio::test]
    async fn save_then_current_round_trips() {
        let router = test_router();

        let response = router
            .clone()
            .oneshot(
                Request::post("/api/mods/LED/save")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"value":7}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, r#"{"status":"success"}"#);

        let response = router
            .oneshot(
                Request::get("/api/mods/LED/current")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(body_string(response).await, r#"{"value":7}"#);
    }

    #[tokio::test]
    async fn unknown_mod_renders_error_envelope() {
        let response = test_router()
            .oneshot(
                Request::post("/api/mods/Camera/save")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_string(response).await;
        assert!(body.contains(r#""status":"error""#));
        assert!(body.contains("mod not found: Camera"));
    }

    #[tokio::test]
    async fn wrong_content_type_renders_error_envelope() {
        let response = test_router()
            .oneshot(
                Request::post("/api/mods/LED/do")
                    .header(header::CONTENT_TYPE, "text/plain")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_string(response).await.contains("unsupported content type"));
    }

    #[tokio::test]
    async fn restart_reports_success() {
        let response = test_router()
            .oneshot(Request::post("/api/restart").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, r#"{"status":"success"}"#);
    }
}
