//! HTTP transport for microsvc: maps REST requests to command dispatch.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /health` returns `{ "ok": true, "commands": [...] }`.
//! - Every [`Route`] in the table given to [`router`] dispatches its command.
//!   The input is the JSON body merged with the query string and the path
//!   parameters (path wins, then body, then query).
//!
//! Non-public routes need an `Authorization: Bearer <token>` header, which
//! the repository resolves into a [`Session`] through [`Authenticate`].

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, on, MethodFilter};
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::error::HandlerError;
use super::service::Service;
use super::session::Session;

/// Resolves a bearer token into a session.
pub trait Authenticate {
    /// `Ok(None)` means the token is unknown or expired.
    fn authenticate(&self, token: &str) -> Result<Option<Session>, HandlerError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Patch,
    Delete,
}

impl Verb {
    fn filter(self) -> MethodFilter {
        match self {
            Verb::Get => MethodFilter::GET,
            Verb::Post => MethodFilter::POST,
            Verb::Patch => MethodFilter::PATCH,
            Verb::Delete => MethodFilter::DELETE,
        }
    }
}

/// One REST endpoint bound to a command.
#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub verb: Verb,
    pub path: &'static str,
    pub command: &'static str,
    /// Status returned on success. `204` responses carry no body.
    pub status: StatusCode,
    /// Public routes skip bearer authentication.
    pub public: bool,
}

impl Route {
    pub const fn new(verb: Verb, path: &'static str, command: &'static str) -> Self {
        let status = match verb {
            Verb::Delete => StatusCode::NO_CONTENT,
            _ => StatusCode::OK,
        };
        Self {
            verb,
            path,
            command,
            status,
            public: false,
        }
    }

    pub const fn created(mut self) -> Self {
        self.status = StatusCode::CREATED;
        self
    }

    pub const fn no_content(mut self) -> Self {
        self.status = StatusCode::NO_CONTENT;
        self
    }

    pub const fn public(mut self) -> Self {
        self.public = true;
        self
    }
}

/// Build an axum `Router` that dispatches `routes` via the given service.
pub fn router<R>(service: Arc<Service<R>>, routes: &'static [Route]) -> Router
where
    R: Authenticate + Send + Sync + 'static,
{
    let mut router = Router::new().route("/health", get(health_handler::<R>));

    for route in routes {
        let route = *route;
        let handler = move |State(service): State<Arc<Service<R>>>,
                            params: Option<Path<HashMap<String, String>>>,
                            Query(query): Query<HashMap<String, String>>,
                            headers: HeaderMap,
                            body: Bytes| async move {
            let params = params.map(|Path(params)| params).unwrap_or_default();
            match route_handler(&service, route, params, query, &headers, &body) {
                Ok(response) => response,
                Err(e) => error_response(&e),
            }
        };
        router = router.route(route.path, on(route.verb.filter(), handler));
    }

    router
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serve the service over HTTP at `addr` until Ctrl-C.
pub async fn serve<R>(
    service: Arc<Service<R>>,
    routes: &'static [Route],
    addr: SocketAddr,
) -> Result<(), std::io::Error>
where
    R: Authenticate + Send + Sync + 'static,
{
    let app = router(service, routes);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}

async fn health_handler<R: Send + Sync + 'static>(
    State(service): State<Arc<Service<R>>>,
) -> impl IntoResponse {
    Json(json!({ "ok": true, "commands": service.commands() }))
}

async fn not_found_handler() -> Response {
    error_response(&HandlerError::NotFound("route".into()))
}

fn route_handler<R>(
    service: &Service<R>,
    route: Route,
    params: HashMap<String, String>,
    query: HashMap<String, String>,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Response, HandlerError>
where
    R: Authenticate + Send + Sync + 'static,
{
    let session = if route.public {
        Session::new()
    } else {
        let token = bearer_token(headers)
            .ok_or_else(|| HandlerError::Unauthorized("missing bearer token".into()))?;
        service
            .repo()
            .authenticate(token)?
            .ok_or_else(|| HandlerError::Unauthorized("invalid or expired token".into()))?
    };

    let input = merge_input(body, query, params)?;
    let value = service.dispatch(route.command, input, session)?;

    if route.status == StatusCode::NO_CONTENT {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok((route.status, Json(value)).into_response())
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn merge_input(
    body: &[u8],
    query: HashMap<String, String>,
    params: HashMap<String, String>,
) -> Result<Value, HandlerError> {
    let mut input = if body.iter().all(u8::is_ascii_whitespace) {
        Map::new()
    } else {
        match serde_json::from_slice(body)? {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            _ => {
                return Err(HandlerError::DecodeFailed(
                    "request body must be a JSON object".into(),
                ))
            }
        }
    };

    for (key, value) in query {
        input.entry(key).or_insert(Value::String(value));
    }
    for (key, value) in params {
        input.insert(key, Value::String(value));
    }
    Ok(Value::Object(input))
}

fn error_response(e: &HandlerError) -> Response {
    let status = StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(e.body())).into_response()
}
