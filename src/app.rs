use crate::{modules, types::Context};
use axum::{
    extract::{DefaultBodyLimit, Request},
    http::{header, HeaderValue, Method},
    routing::get,
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::{
    cors,
    normalize_path::{NormalizePath, NormalizePathLayer},
    services::{ServeDir, ServeFile},
    trace,
};

fn cors_layer(origins: &[String]) -> cors::CorsLayer {
    let origins = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect::<Vec<_>>();

    cors::CorsLayer::new()
        .allow_methods([
            Method::OPTIONS,
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_origin(cors::AllowOrigin::list(origins))
        .allow_credentials(true)
}

/// Trailing slashes are trimmed before routing, so `/api/bookings/` reaches
/// the same handlers as `/api/bookings`.
pub fn router(ctx: Arc<Context>) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/health", get(modules::health_check))
        .nest("/api", modules::get_router());

    let router = match ctx.app.static_dir.as_deref() {
        Some(static_dir) => {
            let index = format!("{}/index.html", static_dir.trim_end_matches('/'));
            router.fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index)))
        }
        None => router.fallback(modules::not_found),
    };

    let router = router
        .with_state(ctx.clone())
        .layer(Extension(ctx.clone()))
        .layer(DefaultBodyLimit::max(1024 * 1024 * 10))
        .layer(trace::TraceLayer::new_for_http())
        .layer(cors_layer(&ctx.app.cors_origins));

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

pub struct App {
    ctx: Arc<Context>,
    router: NormalizePath<Router>,
}

impl App {
    pub fn new(ctx: Arc<Context>) -> Self {
        Self {
            router: router(ctx.clone()),
            ctx,
        }
    }

    pub async fn serve(self) {
        let address = format!("{}:{}", self.ctx.app.host, self.ctx.app.port);
        let listener = match TcpListener::bind(&address).await {
            Ok(listener) => listener,
            Err(err) => {
                tracing::error!("Failed to bind {}: {}", address, err);
                return;
            }
        };

        tracing::info!("App is running on {}", address);

        let service = axum::ServiceExt::<Request>::into_make_service(self.router);
        if let Err(err) = axum::serve(listener, service).await {
            tracing::error!("Server stopped unexpectedly: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::testing;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = router(testing::context()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, body)
    }

    #[tokio::test]
    async fn health_is_served_at_root_and_under_api() {
        for uri in ["/health", "/api/health"] {
            let (status, body) = send(Request::get(uri).body(Body::empty()).unwrap()).await;

            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["status"], "healthy");
        }
    }

    #[tokio::test]
    async fn protected_routes_require_a_session() {
        for uri in ["/api/auth/me", "/api/users/profile", "/api/bookings", "/api/users/addresses"] {
            let (status, body) = send(Request::get(uri).body(Body::empty()).unwrap()).await;

            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
            assert_eq!(body, json!({ "error": "Authentication required" }));
        }
    }

    #[tokio::test]
    async fn send_otp_rejects_malformed_email() {
        let request = Request::post("/api/auth/send-otp")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "email": "not-an-email" }).to_string()))
            .unwrap();

        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"]["email"].is_array());
    }

    fn post_json(uri: &str, body: String) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn missing_fields_answer_json_400() {
        let cases = [
            ("/api/auth/send-otp", json!({}), "Email is required"),
            ("/api/auth/send-otp", json!({ "email": "  " }), "Email is required"),
            (
                "/api/auth/verify-otp",
                json!({ "email": "user@example.com" }),
                "Email and OTP are required",
            ),
            (
                "/api/auth/register",
                json!({ "email": "user@example.com" }),
                "Email and name are required",
            ),
        ];

        for (uri, payload, message) in cases {
            let (status, body) = send(post_json(uri, payload.to_string())).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri} {payload}");
            assert_eq!(body, json!({ "error": message }));
        }
    }

    #[tokio::test]
    async fn malformed_json_answers_json_400() {
        for payload in ["{not json", r#"{"email": 42}"#] {
            let (status, body) = send(post_json("/api/auth/send-otp", payload.to_string())).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{payload}");
            assert!(body["error"].is_string(), "{payload}");
        }
    }

    #[tokio::test]
    async fn bookings_accept_a_trailing_slash() {
        let requests = [
            Request::get("/api/bookings/").body(Body::empty()).unwrap(),
            post_json("/api/bookings/", json!({ "waste_category": "ewaste" }).to_string()),
            Request::get("/api/users/addresses/").body(Body::empty()).unwrap(),
        ];

        for request in requests {
            let uri = request.uri().to_string();
            let (status, body) = send(request).await;

            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
            assert_eq!(body, json!({ "error": "Authentication required" }));
        }
    }

    #[tokio::test]
    async fn session_lookup_failure_is_a_server_error() {
        let request = Request::get("/api/auth/me")
            .header(header::AUTHORIZATION, "Bearer some-session-token")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Sorry an error occurred" }));
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn expired_sessions_are_rejected(pool: sqlx::PgPool) {
        let ctx = testing::context_with_pool(pool.clone());
        let auth = testing::signed_in(ctx.clone(), "asha@example.com").await;
        let token = crate::modules::auth::service::auth::create_session(
            ctx.clone(),
            &pool,
            auth.user.id.clone(),
        )
        .await
        .unwrap();

        let me = || {
            Request::get("/api/auth/me")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap()
        };

        let response = router(ctx.clone()).oneshot(me()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        sqlx::query("UPDATE sessions SET expires_at = $1")
            .bind(chrono::Utc::now().naive_utc() - chrono::Duration::minutes(1))
            .execute(&pool)
            .await
            .unwrap();

        let response = router(ctx).oneshot(me()).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_api_paths_answer_json_404() {
        let (status, body) =
            send(Request::get("/api/nothing-here").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Not found" }));
    }

    #[tokio::test]
    async fn cors_preflight_allows_configured_origin() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/auth/send-otp")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = router(testing::context()).oneshot(request).await.unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "http://localhost:5173"
        );
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .unwrap(),
            "true"
        );
    }
}
