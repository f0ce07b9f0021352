use serde_json::json;

use librarium::microsvc::Session;
use librarium::repository::QuoteQuery;
use librarium::store::Pagination;

use crate::support::{id, Harness};

fn login(harness: &Harness, email: &str, password: &str) -> serde_json::Value {
    harness.ok(
        &Session::new(),
        "users.login",
        json!({ "email": email, "password": password }),
    )
}

#[test]
fn registration_creates_default_shelves() {
    let harness = Harness::new();
    let reader = harness.reader("ada@example.com");

    let shelves = harness.ok(&reader, "bookshelves.find_many", json!({}));
    assert_eq!(shelves["metadata"]["total"], 2);
    let mut types: Vec<&str> = shelves["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|shelf| shelf["type"].as_str().unwrap())
        .collect();
    types.sort();
    assert_eq!(types, vec!["archive", "borrowing"]);
}

#[test]
fn duplicate_email_conflicts() {
    let harness = Harness::new();
    harness.reader("ada@example.com");

    let status = harness.status(
        &Session::new(),
        "users.register",
        json!({ "email": "ADA@example.com", "name": "Other", "password": "password1" }),
    );
    assert_eq!(status, 409);
}

#[test]
fn registration_validates_input() {
    let harness = Harness::new();
    let anonymous = Session::new();

    assert_eq!(
        harness.status(
            &anonymous,
            "users.register",
            json!({ "email": "ada@example.com", "name": "Ada", "password": "short" }),
        ),
        400
    );
    assert_eq!(
        harness.status(
            &anonymous,
            "users.register",
            json!({ "email": "not-an-email", "name": "Ada", "password": "password1" }),
        ),
        400
    );
    assert_eq!(
        harness.status(&anonymous, "users.register", json!({ "email": "ada@example.com" })),
        400
    );
}

#[test]
fn login_issues_tokens() {
    let harness = Harness::new();
    harness.reader("ada@example.com");

    let tokens = login(&harness, "ada@example.com", "password1");
    assert_eq!(tokens["tokenType"], "Bearer");
    assert_eq!(tokens["expiresIn"], 900);
    assert!(tokens["accessToken"].as_str().unwrap().len() >= 32);
    assert_eq!(tokens["user"]["email"], "ada@example.com");

    let anonymous = Session::new();
    assert_eq!(
        harness.status(
            &anonymous,
            "users.login",
            json!({ "email": "ada@example.com", "password": "wrong-password" }),
        ),
        401
    );
    assert_eq!(
        harness.status(
            &anonymous,
            "users.login",
            json!({ "email": "nobody@example.com", "password": "password1" }),
        ),
        401
    );
}

#[test]
fn refresh_rotates_and_logout_revokes() {
    let harness = Harness::new();
    let reader = harness.reader("ada@example.com");
    let anonymous = Session::new();
    let tokens = login(&harness, "ada@example.com", "password1");

    let rotated = harness.ok(
        &anonymous,
        "users.refresh",
        json!({ "refreshToken": tokens["refreshToken"] }),
    );
    assert_ne!(rotated["refreshToken"], tokens["refreshToken"]);
    assert_eq!(
        harness.status(
            &anonymous,
            "users.refresh",
            json!({ "refreshToken": tokens["refreshToken"] }),
        ),
        401
    );

    let logout = harness.ok(&reader, "users.logout", json!({}));
    assert!(logout["revoked"].as_u64().unwrap() >= 2);
    assert_eq!(
        harness.status(
            &anonymous,
            "users.refresh",
            json!({ "refreshToken": rotated["refreshToken"] }),
        ),
        401
    );
}

#[test]
fn profile_requires_a_session() {
    let harness = Harness::new();
    let reader = harness.reader("ada@example.com");

    assert_eq!(harness.status(&Session::new(), "users.me", json!({})), 401);
    let me = harness.ok(&reader, "users.me", json!({}));
    assert_eq!(me["email"], "ada@example.com");
    assert_eq!(me["role"], "user");
    assert!(me.get("passwordHash").is_none());
}

#[test]
fn password_change_needs_current_password() {
    let harness = Harness::new();
    let reader = harness.reader("ada@example.com");

    let status = harness.status(&reader, "users.update_me", json!({ "password": "new-password" }));
    assert_eq!(status, 400);

    let updated = harness.ok(
        &reader,
        "users.update_me",
        json!({ "name": "Ada Lovelace", "password": "new-password", "currentPassword": "password1" }),
    );
    assert_eq!(updated["name"], "Ada Lovelace");
    login(&harness, "ada@example.com", "new-password");
    assert_eq!(
        harness.status(
            &Session::new(),
            "users.login",
            json!({ "email": "ada@example.com", "password": "password1" }),
        ),
        401
    );
}

#[test]
fn user_administration() {
    let harness = Harness::new();
    let admin = harness.admin();
    let ada = harness.reader("ada@example.com");
    let bob = harness.reader("bob@example.com");

    assert_eq!(harness.status(&ada, "users.find_many", json!({})), 403);
    let users = harness.ok(&admin, "users.find_many", json!({ "pageSize": "2" }));
    assert_eq!(users["metadata"]["total"], 3);
    assert_eq!(users["data"].as_array().unwrap().len(), 2);

    let bob_id = bob.user_id().unwrap();
    assert_eq!(harness.status(&ada, "users.delete", json!({ "id": bob_id })), 403);
    harness.ok(&admin, "users.delete", json!({ "id": bob_id }));
    assert_eq!(harness.status(&bob, "users.me", json!({})), 404);

    harness.ok(&ada, "users.delete", json!({ "id": ada.user_id().unwrap() }));
    let users = harness.ok(&admin, "users.find_many", json!({}));
    assert_eq!(users["metadata"]["total"], 1);
}

#[test]
fn last_admin_is_kept() {
    let harness = Harness::new();
    let admin = harness.admin();

    let status = harness.status(&admin, "users.delete", json!({ "id": admin.user_id().unwrap() }));
    assert_eq!(status, 400);
}

#[test]
fn deleting_a_user_removes_their_data() {
    let harness = Harness::new();
    let admin = harness.admin();
    let ada = harness.reader("ada@example.com");
    let book = harness.book(&admin, "Solaris", "9788308045135");
    let shelf = harness.shelf(&ada, "archive");
    let user_book = harness.ok(
        &ada,
        "user_books.create",
        json!({ "bookId": book["id"], "bookshelfId": shelf }),
    );
    harness.ok(&ada, "quotes.create", json!({ "bookId": book["id"], "content": "Nie ma odpowiedzi." }));

    harness.ok(&admin, "users.delete", json!({ "id": ada.user_id().unwrap() }));

    let db = harness.service.repo().db();
    assert!(db.user_books().find_details(id(&user_book)).unwrap().is_none());
    assert!(db.bookshelves().find_view(shelf).unwrap().is_none());
    let quotes = db
        .quotes()
        .find_many(&QuoteQuery::default(), Pagination::default())
        .unwrap();
    assert_eq!(quotes.metadata.total, 0);
    // the catalog book stays
    harness.ok(&admin, "books.find", json!({ "id": book["id"] }));
}
