//! HTTP server implementation
//!
//! hyper http1 with TokioIo, one task per connection. Requests are read into
//! an [`ApiRequest`] and routed by [`dispatch`], which never touches the
//! socket.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full, Limited};
use hyper::body::Incoming;
use hyper::header::{self, HeaderMap, HeaderValue};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use super::AppState;
use crate::contact::{ContactRequest, spawn_prune_task};
use crate::revalidate::cache::ContentResource;

type BoxBody = http_body_util::combinators::BoxBody<Bytes, hyper::Error>;

const SEND_MESSAGE_PATH: &str = "/api/send-message";
const REVALIDATE_PATH: &str = "/api/revalidate";

/// Largest request body accepted
const MAX_BODY_BYTES: usize = 64 * 1024;

/// How often stale rate limit entries are dropped
const PRUNE_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Request as seen by the router
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub client_ip: String,
    pub user_agent: Option<String>,
    pub body: Bytes,
}

/// Run the HTTP server
pub async fn run(state: Arc<AppState>) -> std::io::Result<()> {
    let listener = TcpListener::bind(state.config.listen).await?;

    info!(
        "Listening on {} (content source: {})",
        state.config.listen,
        state.content.name()
    );

    spawn_prune_task(Arc::clone(&state.rate_limits), PRUNE_INTERVAL);
    info!(
        "Contact rate limit: {} per {}s",
        state.contact.config().max_requests,
        state.contact.config().window_secs
    );

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> Result<Response<BoxBody>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);
    let client_ip = client_ip(req.headers(), addr);
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    debug!("[{}] {} {}", client_ip, method, path);

    let body = match Limited::new(req.into_body(), MAX_BODY_BYTES).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!("Failed to read request body from {}: {}", client_ip, e);
            return Ok(to_boxed(error_response(
                StatusCode::BAD_REQUEST,
                "Failed to read request body",
            )));
        }
    };

    let request = ApiRequest {
        method,
        path,
        query,
        client_ip,
        user_agent,
        body,
    };
    Ok(to_boxed(dispatch(&state, request).await))
}

/// Route a request to its handler
pub async fn dispatch(state: &AppState, request: ApiRequest) -> Response<Full<Bytes>> {
    if request.method == Method::OPTIONS {
        return preflight_response();
    }

    if let Some(resource) = ContentResource::from_path(&request.path) {
        if request.method != Method::GET && request.method != Method::HEAD {
            return method_not_allowed_response("GET");
        }
        return match state.cache.get(resource).await {
            Ok(snapshot) => json_response(StatusCode::OK, snapshot.as_ref()),
            Err(e) => {
                error!("Failed to load {}: {}", request.path, e);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load content")
            }
        };
    }

    match request.path.as_str() {
        SEND_MESSAGE_PATH => {
            let contact_request = ContactRequest {
                method: request.method.to_string(),
                client_ip: Some(request.client_ip),
                user_agent: request.user_agent,
                body: request.body.to_vec(),
            };
            let response = state.contact.handle(contact_request).await;
            json_response(status_code(response.status), &response.body)
        }
        REVALIDATE_PATH => {
            let secret = query_param(request.query.as_deref(), "secret");
            let response = state
                .revalidate
                .handle(request.method.as_str(), secret.as_deref(), &request.body)
                .await;
            json_response(status_code(response.status), &response.body)
        }
        _ => not_found_response(&request.path),
    }
}

/// First `x-forwarded-for` entry, else the peer address
fn client_ip(headers: &HeaderMap, addr: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| addr.ip().to_string())
}

fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    query?.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key != name {
            return None;
        }
        let value = value.replace('+', " ");
        Some(
            urlencoding::decode(&value)
                .map(|decoded| decoded.into_owned())
                .unwrap_or(value),
        )
    })
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Convert a Full<Bytes> body to BoxBody
fn to_boxed(response: Response<Full<Bytes>>) -> Response<BoxBody> {
    response.map(|body| body.map_err(|never| match never {}).boxed())
}

fn response(status: StatusCode, body: Bytes) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

fn json_response<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let (status, body) = match serde_json::to_vec(body) {
        Ok(bytes) => (status, Bytes::from(bytes)),
        Err(e) => {
            error!("Failed to serialize response: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Bytes::from_static(br#"{"error":"Internal serialization error"}"#),
            )
        }
    };

    let mut response = response(status, body);
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}

fn error_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    json_response(status, &serde_json::json!({ "error": message }))
}

/// CORS preflight response
fn preflight_response() -> Response<Full<Bytes>> {
    let mut response = response(StatusCode::NO_CONTENT, Bytes::new());
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    response
}

fn method_not_allowed_response(allow: &'static str) -> Response<Full<Bytes>> {
    let mut response = error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
    response
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static(allow));
    response
}

fn not_found_response(path: &str) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::NOT_FOUND,
        &serde_json::json!({ "error": "Not Found", "path": path }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Args;
    use crate::contact::InMemorySubmissionStore;
    use crate::content::{ContentBackend, ContentFacade};
    use clap::Parser;
    use serde_json::{Value, json};

    fn state(store: Arc<InMemorySubmissionStore>) -> AppState {
        let args = Args::try_parse_from([
            "summit-content",
            "--use-sanity",
            "false",
            "--revalidate-secret",
            "s3cret",
        ])
        .unwrap();
        let content = ContentFacade::new(ContentBackend::Static, None).unwrap();
        AppState::new(args, content, store)
    }

    fn request(method: Method, path: &str, body: &str) -> ApiRequest {
        let (path, query) = match path.split_once('?') {
            Some((p, q)) => (p.to_string(), Some(q.to_string())),
            None => (path.to_string(), None),
        };
        ApiRequest {
            method,
            path,
            query,
            client_ip: "203.0.113.9".to_string(),
            user_agent: None,
            body: Bytes::from(body.to_string()),
        }
    }

    async fn body_json(response: Response<Full<Bytes>>) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_client_ip() {
        let addr: SocketAddr = "10.0.0.1:5000".parse().unwrap();
        let mut headers = HeaderMap::new();
        assert_eq!(client_ip(&headers, addr), "10.0.0.1");

        headers.insert("x-forwarded-for", HeaderValue::from_static("198.51.100.1, 10.0.0.2"));
        assert_eq!(client_ip(&headers, addr), "198.51.100.1");
    }

    #[test]
    fn test_query_param() {
        assert_eq!(query_param(Some("secret=abc"), "secret").as_deref(), Some("abc"));
        assert_eq!(query_param(Some("a=1&secret=a%2Bb"), "secret").as_deref(), Some("a+b"));
        assert_eq!(query_param(Some("secrets=abc"), "secret"), None);
        assert_eq!(query_param(None, "secret"), None);
    }

    #[tokio::test]
    async fn test_content_routes() {
        let state = state(Arc::new(InMemorySubmissionStore::new()));

        let response = dispatch(&state, request(Method::GET, "/api/speakers", "")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let speakers = body_json(response).await;
        assert_eq!(speakers[0]["type"], "speaker");

        let response = dispatch(&state, request(Method::GET, "/api/site-settings", "")).await;
        let settings = body_json(response).await;
        assert_eq!(settings["primaryCta"]["text"], "Get Tickets");

        let response = dispatch(&state, request(Method::DELETE, "/api/team", "")).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let state = state(Arc::new(InMemorySubmissionStore::new()));
        let response = dispatch(&state, request(Method::GET, "/nope", "")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["path"], "/nope");
    }

    #[tokio::test]
    async fn test_preflight() {
        let state = state(Arc::new(InMemorySubmissionStore::new()));
        let response = dispatch(&state, request(Method::OPTIONS, SEND_MESSAGE_PATH, "")).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    }

    #[tokio::test]
    async fn test_send_message() {
        let store = Arc::new(InMemorySubmissionStore::new());
        let state = state(store.clone());
        let body = json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "message": "Hello"
        });

        let response =
            dispatch(&state, request(Method::POST, SEND_MESSAGE_PATH, &body.to_string())).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["success"], true);
        assert_eq!(store.submissions()[0].ip_address.as_deref(), Some("203.0.113.9"));

        let response = dispatch(&state, request(Method::GET, SEND_MESSAGE_PATH, "")).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_revalidate_evicts_cache() {
        let state = state(Arc::new(InMemorySubmissionStore::new()));
        dispatch(&state, request(Method::GET, "/api/home", "")).await;
        assert_eq!(state.cache.len(), 1);

        let response = dispatch(&state, request(Method::POST, "/api/revalidate?secret=nope", "")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(state.cache.len(), 1);

        let response =
            dispatch(&state, request(Method::POST, "/api/revalidate?secret=s3cret", "")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["revalidated"], true);
        assert!(state.cache.is_empty());
    }
}
