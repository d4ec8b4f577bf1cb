use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::is_admin::is_admin;
use super::handlers::login::login;
use super::handlers::register::register;
use crate::domain::auth::ports::AuthServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub request_timeout: Duration,
}

pub fn create_router(auth_service: Arc<dyn AuthServicePort>, request_timeout: Duration) -> Router {
    let state = AppState {
        auth_service,
        request_timeout,
    };

    let routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/users/:user_id/admin", get(is_admin));

    // Request headers stay out of the span.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    routes
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use std::sync::Mutex;

    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::inbound::http::handlers::REQUEST_ID_HEADER;
    use crate::domain::auth::context::RequestContext;
    use crate::domain::auth::errors::AuthError;
    use crate::domain::auth::models::LoginCommand;
    use crate::domain::auth::models::RegisterCommand;
    use crate::domain::auth::models::UserId;

    /// Service stub answering every call with fixed results and remembering
    /// the correlation id it was handed.
    #[derive(Default)]
    struct StubAuthService {
        correlation_ids: Mutex<Vec<Uuid>>,
    }

    #[async_trait::async_trait]
    impl AuthServicePort for StubAuthService {
        async fn login(
            &self,
            _ctx: &RequestContext,
            command: LoginCommand,
        ) -> Result<String, AuthError> {
            if command.password == "right" {
                Ok("stub.token.value".to_string())
            } else {
                Err(AuthError::InvalidCredentials { op: "auth.login" })
            }
        }

        async fn register(
            &self,
            _ctx: &RequestContext,
            _command: RegisterCommand,
        ) -> Result<UserId, AuthError> {
            Ok(UserId(5))
        }

        async fn is_admin(
            &self,
            ctx: &RequestContext,
            user_id: UserId,
        ) -> Result<bool, AuthError> {
            self.correlation_ids
                .lock()
                .unwrap()
                .push(ctx.correlation_id());
            match user_id {
                UserId(1) => Ok(true),
                _ => Err(AuthError::UserNotFound { op: "auth.is_admin" }),
            }
        }
    }

    fn router() -> Router {
        create_router(Arc::new(StubAuthService::default()), Duration::from_secs(5))
    }

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_login_route() {
        let (status, body) = send(post_json(
            "/api/auth/login",
            serde_json::json!({"email": "a@example.com", "password": "right", "app_id": 1}),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status_code"], 200);
        assert_eq!(body["data"]["token"], "stub.token.value");
    }

    #[tokio::test]
    async fn test_login_route_rejects_bad_credentials() {
        let (status, body) = send(post_json(
            "/api/auth/login",
            serde_json::json!({"email": "a@example.com", "password": "wrong", "app_id": 1}),
        ))
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["data"]["message"], "invalid email or password");
    }

    #[tokio::test]
    async fn test_login_route_requires_app_id() {
        let (status, body) = send(post_json(
            "/api/auth/login",
            serde_json::json!({"email": "a@example.com", "password": "right"}),
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["data"]["message"], "app_id is required");
    }

    #[tokio::test]
    async fn test_register_route() {
        let (status, body) = send(post_json(
            "/api/auth/register",
            serde_json::json!({"email": "a@example.com", "password": "pw"}),
        ))
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["user_id"], 5);
    }

    #[tokio::test]
    async fn test_is_admin_route() {
        let request = Request::builder()
            .uri("/api/users/1/admin")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["is_admin"], true);

        let request = Request::builder()
            .uri("/api/users/2/admin")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["data"]["message"], "user not found");

        let request = Request::builder()
            .uri("/api/users/0/admin")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["data"]["message"], "user_id is required");
    }

    #[tokio::test]
    async fn test_request_id_header_sets_correlation_id() {
        let service = Arc::new(StubAuthService::default());
        let router = create_router(service.clone(), Duration::from_secs(5));
        let request_id = Uuid::new_v4();

        let request = Request::builder()
            .uri("/api/users/1/admin")
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let request = Request::builder()
            .uri("/api/users/1/admin")
            .header(REQUEST_ID_HEADER, "not-a-uuid")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let ids = service.correlation_ids.lock().unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0], request_id);
        assert_ne!(ids[1], request_id);
        assert!(!ids[1].is_nil());
    }
}
