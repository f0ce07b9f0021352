use serde_json::json;
use uuid::Uuid;

use crate::support::{id, Harness};

#[test]
fn proposal_keeps_only_changed_fields() {
    let harness = Harness::new();
    let admin = harness.admin();
    let reader = harness.reader("ada@example.com");
    let book = harness.book(&admin, "Solaris", "9788308045135");

    let request = harness.ok(
        &reader,
        "book_change_requests.create",
        json!({
            "bookId": book["id"],
            "title": "Solaris",
            "publisher": "Wydawnictwo Literackie",
            "releaseYear": 1961,
        }),
    );
    assert_eq!(request["changes"]["publisher"], "Wydawnictwo Literackie");
    assert!(request["changes"]["title"].is_null());
    assert!(request["changes"]["releaseYear"].is_null());
    assert_eq!(request["bookTitle"], "Solaris");
}

#[test]
fn proposal_without_changes_is_rejected() {
    let harness = Harness::new();
    let admin = harness.admin();
    let reader = harness.reader("ada@example.com");
    let book = harness.book(&admin, "Solaris", "9788308045135");

    let status = harness.status(
        &reader,
        "book_change_requests.create",
        json!({ "bookId": book["id"], "title": " Solaris ", "authorIds": [book["authors"][0]["id"]] }),
    );
    assert_eq!(status, 400);
}

#[test]
fn users_see_their_own_requests() {
    let harness = Harness::new();
    let admin = harness.admin();
    let ada = harness.reader("ada@example.com");
    let bob = harness.reader("bob@example.com");
    let book = harness.book(&admin, "Solaris", "9788308045135");

    harness.ok(&ada, "book_change_requests.create", json!({ "bookId": book["id"], "pages": 204 }));
    harness.ok(&bob, "book_change_requests.create", json!({ "bookId": book["id"], "pages": 205 }));

    let own = harness.ok(&ada, "book_change_requests.find_many", json!({ "userId": bob.user_id() }));
    assert_eq!(own["metadata"]["total"], 1);
    assert_eq!(own["data"][0]["changes"]["pages"], 204);

    let all = harness.ok(&admin, "book_change_requests.find_many", json!({ "bookId": book["id"] }));
    assert_eq!(all["metadata"]["total"], 2);
}

#[test]
fn apply_updates_book_and_removes_request() {
    let harness = Harness::new();
    let admin = harness.admin();
    let reader = harness.reader("ada@example.com");
    let book = harness.book(&admin, "Solaris", "9788308045135");
    let coauthor = harness.ok(&admin, "authors.create", json!({ "name": "Second Author" }));

    let request = harness.ok(
        &reader,
        "book_change_requests.create",
        json!({
            "bookId": book["id"],
            "title": "Solaris (wydanie II)",
            "translator": "Nobody",
            "authorIds": [coauthor["id"]],
        }),
    );

    assert_eq!(
        harness.status(&reader, "book_change_requests.apply", json!({ "id": request["id"] })),
        403
    );
    let updated = harness.ok(&admin, "book_change_requests.apply", json!({ "id": request["id"] }));
    assert_eq!(updated["title"], "Solaris (wydanie II)");
    assert_eq!(updated["translator"], "Nobody");
    assert_eq!(updated["authors"].as_array().unwrap().len(), 1);
    assert_eq!(updated["authors"][0]["name"], "Second Author");

    let remaining = harness.ok(&admin, "book_change_requests.find_many", json!({}));
    assert_eq!(remaining["metadata"]["total"], 0);
    assert_eq!(
        harness.status(&admin, "book_change_requests.apply", json!({ "id": request["id"] })),
        404
    );
}

#[test]
fn failed_apply_writes_nothing() {
    let harness = Harness::new();
    let admin = harness.admin();
    let reader = harness.reader("ada@example.com");
    let book = harness.book(&admin, "Solaris", "9788308045135");
    harness.book(&admin, "Lalka", "9788324040640");

    let request = harness.ok(
        &reader,
        "book_change_requests.create",
        json!({ "bookId": book["id"], "title": "Renamed", "isbn": "978-83-240-4064-0" }),
    );

    let status = harness.status(&admin, "book_change_requests.apply", json!({ "id": request["id"] }));
    assert_eq!(status, 409);

    let stored = harness.ok(&admin, "books.find", json!({ "id": book["id"] }));
    assert_eq!(stored["title"], "Solaris");
    let pending = harness.ok(&admin, "book_change_requests.find_many", json!({}));
    assert_eq!(pending["metadata"]["total"], 1);
    assert_eq!(id(&pending["data"][0]), id(&request));
}

#[test]
fn requests_are_withdrawn_by_owner_or_admin() {
    let harness = Harness::new();
    let admin = harness.admin();
    let ada = harness.reader("ada@example.com");
    let bob = harness.reader("bob@example.com");
    let book = harness.book(&admin, "Solaris", "9788308045135");

    let first = harness.ok(&ada, "book_change_requests.create", json!({ "bookId": book["id"], "pages": 204 }));
    let second = harness.ok(&ada, "book_change_requests.create", json!({ "bookId": book["id"], "pages": 206 }));

    assert_eq!(
        harness.status(&bob, "book_change_requests.delete", json!({ "id": first["id"] })),
        403
    );
    harness.ok(&ada, "book_change_requests.delete", json!({ "id": first["id"] }));
    harness.ok(&admin, "book_change_requests.delete", json!({ "id": second["id"] }));

    let remaining = harness.ok(&admin, "book_change_requests.find_many", json!({}));
    assert_eq!(remaining["metadata"]["total"], 0);
}

#[test]
fn proposal_must_reference_existing_catalog_entries() {
    let harness = Harness::new();
    let admin = harness.admin();
    let reader = harness.reader("ada@example.com");
    let book = harness.book(&admin, "Solaris", "9788308045135");

    let unknown_category = harness.status(
        &reader,
        "book_change_requests.create",
        json!({ "bookId": book["id"], "categoryId": Uuid::new_v4() }),
    );
    assert_eq!(unknown_category, 404);

    let unknown_author = harness.status(
        &reader,
        "book_change_requests.create",
        json!({ "bookId": book["id"], "authorIds": [book["authors"][0]["id"], Uuid::new_v4()] }),
    );
    assert_eq!(unknown_author, 404);

    let pending = harness.ok(&admin, "book_change_requests.find_many", json!({}));
    assert_eq!(pending["metadata"]["total"], 0);
}

#[test]
fn unapproved_books_only_take_proposals_from_their_creator() {
    let harness = Harness::new();
    let admin = harness.admin();
    let ada = harness.reader("ada@example.com");
    let bob = harness.reader("bob@example.com");
    let approved = harness.book(&admin, "Solaris", "9788308045135");

    let draft = harness.ok(
        &ada,
        "books.create",
        json!({
            "title": "Samizdat",
            "isbn": "837319062X",
            "publisher": "NOWa",
            "releaseYear": 1980,
            "language": "pl",
            "format": "paperback",
            "categoryId": approved["category"]["id"],
            "authorIds": [approved["authors"][0]["id"]],
        }),
    );

    let hidden = harness.status(
        &bob,
        "book_change_requests.create",
        json!({ "bookId": draft["id"], "pages": 120 }),
    );
    assert_eq!(hidden, 404);

    harness.ok(&ada, "book_change_requests.create", json!({ "bookId": draft["id"], "pages": 120 }));
    harness.ok(&admin, "book_change_requests.create", json!({ "bookId": draft["id"], "pages": 121 }));
}
