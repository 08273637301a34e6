//! HTTP layers wrapped around the task board router.
//!
//! Every request gets an `x-request-id` (client supplied, or a fresh UUID v7),
//! echoed on the response and recorded on the request span together with the
//! matched route.

use axum::extract::MatchedPath;
use axum::http::{HeaderValue, Method, Request};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Methods used by the task and category routes
const API_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::PUT, Method::DELETE];

#[derive(Clone, Copy, Default)]
pub struct TimeOrderedRequestId;

impl MakeRequestId for TimeOrderedRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Span named after the matched route so `/tarefa?id=1` and `/tarefa?id=2`
/// group together
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let route = request
            .extensions()
            .get::<MatchedPath>()
            .map(MatchedPath::as_str)
            .unwrap_or_else(|| request.uri().path());
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "http",
            method = %request.method(),
            route = %route,
            query = request.uri().query().unwrap_or(""),
            request_id = %request_id,
        )
    }
}

/// CORS for the configured origins. `*` anywhere in the list allows any origin.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods(API_METHODS.to_vec())
        .allow_headers(Any);

    if allowed_origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

/// Wrap `router` with CORS, tracing and request id handling.
///
/// The request id is set outermost so the trace span and the response both
/// see it.
pub fn with_http_layers(router: Router, allowed_origins: &[String]) -> Router {
    router
        .layer(cors_layer(allowed_origins))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(RequestSpan)
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::x_request_id(TimeOrderedRequestId))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::{HeaderName, ORIGIN};
    use axum::routing::get;
    use axum_test::TestServer;

    fn server(origins: &[&str]) -> TestServer {
        let origins: Vec<String> = origins.iter().map(|o| o.to_string()).collect();
        let router = Router::new().route("/tarefas", get(|| async { "ok" }));
        TestServer::new(with_http_layers(router, &origins)).unwrap()
    }

    #[test]
    fn test_request_ids_are_distinct_v7_uuids() {
        let request = Request::new(());
        let mut maker = TimeOrderedRequestId;

        let first = maker.make_request_id(&request).unwrap();
        let second = maker.make_request_id(&request).unwrap();

        let first = Uuid::parse_str(first.header_value().to_str().unwrap()).unwrap();
        let second = Uuid::parse_str(second.header_value().to_str().unwrap()).unwrap();
        assert_ne!(first, second);
        assert_eq!(first.get_version_num(), 7);
    }

    #[tokio::test]
    async fn test_response_carries_generated_request_id() {
        let response = server(&["*"]).get("/tarefas").await;

        response.assert_status_ok();
        let id = response.header(REQUEST_ID_HEADER);
        assert!(Uuid::parse_str(id.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_client_request_id_is_echoed() {
        let response = server(&["*"])
            .get("/tarefas")
            .add_header(
                HeaderName::from_static(REQUEST_ID_HEADER),
                HeaderValue::from_static("client-42"),
            )
            .await;

        assert_eq!(response.header(REQUEST_ID_HEADER), "client-42");
    }

    #[tokio::test]
    async fn test_cors_allows_only_listed_origins() {
        let server = server(&["http://localhost:8080", "not a header\nvalue"]);

        let allowed = server
            .get("/tarefas")
            .add_header(ORIGIN, HeaderValue::from_static("http://localhost:8080"))
            .await;
        assert_eq!(
            allowed.header("access-control-allow-origin"),
            "http://localhost:8080"
        );

        let denied = server
            .get("/tarefas")
            .add_header(ORIGIN, HeaderValue::from_static("http://evil.example"))
            .await;
        assert!(denied
            .headers()
            .get("access-control-allow-origin")
            .is_none());
    }
}
