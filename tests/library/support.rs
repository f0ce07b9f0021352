//! Shared fixtures: a service over an in-memory library and seeded data.

use serde_json::{json, Value};
use uuid::Uuid;

use librarium::domain::Role;
use librarium::handlers::{self, users::register::create_account};
use librarium::microsvc::{HandlerError, Service, Session};
use librarium::{Aggregate, Library};

pub struct Harness {
    pub service: Service<Library>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            service: handlers::service(Library::in_memory()),
        }
    }

    pub fn call(&self, session: &Session, command: &str, input: Value) -> Result<Value, HandlerError> {
        self.service.dispatch(command, input, session.clone())
    }

    /// Dispatch and unwrap, naming the command on failure.
    pub fn ok(&self, session: &Session, command: &str, input: Value) -> Value {
        match self.call(session, command, input) {
            Ok(value) => value,
            Err(err) => panic!("{command} failed: {err}"),
        }
    }

    /// Dispatch expecting a failure and return its HTTP status.
    pub fn status(&self, session: &Session, command: &str, input: Value) -> u16 {
        match self.call(session, command, input) {
            Ok(value) => panic!("{command} unexpectedly succeeded: {value}"),
            Err(err) => err.status_code(),
        }
    }

    /// Register a reader and return their session.
    pub fn reader(&self, email: &str) -> Session {
        let user = self.ok(
            &Session::new(),
            "users.register",
            json!({ "email": email, "name": "Reader", "password": "password1" }),
        );
        Session::authenticated(id(&user), Role::User)
    }

    pub fn admin(&self) -> Session {
        let admin = create_account(
            self.service.repo().db(),
            "admin@example.com",
            "Admin",
            "password1",
            Role::Admin,
        )
        .unwrap();
        Session::authenticated(admin.id(), Role::Admin)
    }

    /// An approved book with one author, in a fresh category.
    pub fn book(&self, admin: &Session, title: &str, isbn: &str) -> Value {
        let author = self.ok(admin, "authors.create", json!({ "name": format!("Author of {title}") }));
        let category = self.ok(admin, "categories.create", json!({ "name": format!("Category of {title}") }));
        self.ok(
            admin,
            "books.create",
            json!({
                "title": title,
                "isbn": isbn,
                "publisher": "Czytelnik",
                "releaseYear": 1961,
                "language": "pl",
                "format": "paperback",
                "categoryId": category["id"],
                "authorIds": [author["id"]],
            }),
        )
    }

    /// The id of one of the caller's shelves by type.
    pub fn shelf(&self, session: &Session, shelf_type: &str) -> Uuid {
        let shelves = self.ok(session, "bookshelves.find_many", json!({ "type": shelf_type }));
        id(&shelves["data"][0])
    }
}

pub fn id(value: &Value) -> Uuid {
    value["id"]
        .as_str()
        .and_then(|id| id.parse().ok())
        .unwrap_or_else(|| panic!("no id in {value}"))
}
