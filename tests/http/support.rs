use std::sync::Arc;

use reqwest::Response;
use serde_json::Value;

use librarium::domain::Role;
use librarium::handlers::{self, users::register::create_account};
use librarium::{microsvc, routes, Library};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const PASSWORD: &str = "password1";

/// A running server and a reqwest client pointed at it.
pub struct Client {
    base: String,
    http: reqwest::Client,
}

impl Client {
    /// Serve a fresh in-memory library (with one admin) on port 0.
    pub async fn start() -> Self {
        let library = Library::in_memory();
        create_account(library.db(), ADMIN_EMAIL, "Admin", PASSWORD, Role::Admin).unwrap();
        let service = Arc::new(handlers::service(library));

        let app = microsvc::router(service, routes::ROUTES);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{addr}"),
            http: reqwest::Client::new(),
        }
    }

    fn authorized(&self, request: reqwest::RequestBuilder, token: Option<&str>) -> reqwest::RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Response {
        let request = self.http.get(format!("{}{path}", self.base));
        self.authorized(request, token).send().await.unwrap()
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> Response {
        let request = self.http.post(format!("{}{path}", self.base)).json(&body);
        self.authorized(request, token).send().await.unwrap()
    }

    pub async fn patch(&self, path: &str, token: Option<&str>, body: Value) -> Response {
        let request = self.http.patch(format!("{}{path}", self.base)).json(&body);
        self.authorized(request, token).send().await.unwrap()
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Response {
        let request = self.http.delete(format!("{}{path}", self.base));
        self.authorized(request, token).send().await.unwrap()
    }

    /// Log in with the shared test password and return the token body.
    pub async fn login(&self, email: &str) -> Value {
        let resp = self
            .post(
                "/users/login",
                None,
                serde_json::json!({ "email": email, "password": PASSWORD }),
            )
            .await;
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        resp.json().await.unwrap()
    }
}
