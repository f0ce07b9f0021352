use serde_json::json;

use crate::support::{id, Harness};

#[test]
fn reader_authors_wait_for_approval() {
    let harness = Harness::new();
    let admin = harness.admin();
    let reader = harness.reader("ada@example.com");

    let pending = harness.ok(&reader, "authors.create", json!({ "name": "Olga Tokarczuk" }));
    assert_eq!(pending["isApproved"], false);
    let approved = harness.ok(&admin, "authors.create", json!({ "name": "Bolesław Prus" }));
    assert_eq!(approved["isApproved"], true);

    let visible = harness.ok(&reader, "authors.find_many", json!({ "isApproved": "false" }));
    assert_eq!(visible["metadata"]["total"], 1);
    assert_eq!(visible["data"][0]["name"], "Bolesław Prus");

    let queue = harness.ok(&admin, "authors.find_many", json!({ "isApproved": "false" }));
    assert_eq!(queue["data"][0]["name"], "Olga Tokarczuk");

    assert_eq!(
        harness.status(&reader, "authors.update", json!({ "id": pending["id"], "isApproved": true })),
        403
    );
    let updated = harness.ok(&admin, "authors.update", json!({ "id": pending["id"], "isApproved": true }));
    assert_eq!(updated["isApproved"], true);
}

#[test]
fn author_names_are_unique() {
    let harness = Harness::new();
    let admin = harness.admin();
    harness.ok(&admin, "authors.create", json!({ "name": "Stanisław Lem" }));

    let status = harness.status(&admin, "authors.create", json!({ "name": "  stanisław   LEM " }));
    assert_eq!(status, 409);
}

#[test]
fn sole_author_cannot_be_deleted() {
    let harness = Harness::new();
    let admin = harness.admin();
    let book = harness.book(&admin, "Solaris", "9788308045135");
    let author = book["authors"][0]["id"].clone();

    assert_eq!(harness.status(&admin, "authors.delete", json!({ "id": author })), 400);
    harness.ok(&admin, "books.delete", json!({ "id": book["id"] }));
    harness.ok(&admin, "authors.delete", json!({ "id": author }));
    assert_eq!(harness.status(&admin, "authors.delete", json!({ "id": author })), 404);
}

#[test]
fn only_admins_extend_categories_and_genres() {
    let harness = Harness::new();
    let admin = harness.admin();
    let reader = harness.reader("ada@example.com");

    assert_eq!(harness.status(&reader, "categories.create", json!({ "name": "Poetry" })), 403);
    assert_eq!(harness.status(&reader, "genres.create", json!({ "name": "Sonnet" })), 403);

    harness.ok(&admin, "categories.create", json!({ "name": "Poetry" }));
    harness.ok(&admin, "categories.create", json!({ "name": "Prose" }));
    harness.ok(&admin, "genres.create", json!({ "name": "Sonnet" }));
    assert_eq!(harness.status(&admin, "genres.create", json!({ "name": "sonnet" })), 409);

    let categories = harness.ok(&reader, "categories.find_many", json!({ "name": "po" }));
    assert_eq!(categories["metadata"]["total"], 1);
    let genres = harness.ok(&reader, "genres.find_many", json!({}));
    assert_eq!(genres["data"][0]["name"], "Sonnet");
}

#[test]
fn book_references_must_exist() {
    let harness = Harness::new();
    let admin = harness.admin();
    let category = harness.ok(&admin, "categories.create", json!({ "name": "Prose" }));

    let status = harness.status(
        &admin,
        "books.create",
        json!({
            "title": "Lalka",
            "isbn": "9788324040640",
            "publisher": "PIW",
            "releaseYear": 1890,
            "language": "pl",
            "format": "hardcover",
            "categoryId": category["id"],
            "authorIds": [uuid::Uuid::new_v4()],
        }),
    );
    assert_eq!(status, 404);
}

#[test]
fn isbn_is_unique_across_formats() {
    let harness = Harness::new();
    let admin = harness.admin();
    harness.book(&admin, "Solaris", "978-83-08-04513-5");

    let author = harness.ok(&admin, "authors.create", json!({ "name": "Someone" }));
    let category = harness.ok(&admin, "categories.create", json!({ "name": "Other" }));
    let status = harness.status(
        &admin,
        "books.create",
        json!({
            "title": "Solaris again",
            "isbn": "9788308045135",
            "publisher": "Wydawnictwo Literackie",
            "releaseYear": 2012,
            "language": "pl",
            "format": "ebook",
            "categoryId": category["id"],
            "authorIds": [author["id"]],
        }),
    );
    assert_eq!(status, 409);
}

#[test]
fn unapproved_books_stay_private() {
    let harness = Harness::new();
    let admin = harness.admin();
    let ada = harness.reader("ada@example.com");
    let bob = harness.reader("bob@example.com");
    let approved = harness.book(&admin, "Solaris", "9788308045135");

    let author = &approved["authors"][0]["id"];
    let category = &approved["category"]["id"];
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
            "categoryId": category,
            "authorIds": [author],
        }),
    );
    assert_eq!(draft["isApproved"], false);

    harness.ok(&ada, "books.find", json!({ "id": draft["id"] }));
    assert_eq!(harness.status(&bob, "books.find", json!({ "id": draft["id"] })), 404);
    harness.ok(&admin, "books.find", json!({ "id": draft["id"] }));

    let listed = harness.ok(&bob, "books.find_many", json!({ "isApproved": "false" }));
    assert_eq!(listed["metadata"]["total"], 1);
    assert_eq!(listed["data"][0]["title"], "Solaris");

    let pending = harness.ok(&admin, "books.find_many", json!({ "isApproved": "false" }));
    assert_eq!(pending["data"][0]["title"], "Samizdat");
}

#[test]
fn books_search_sort_and_paginate() {
    let harness = Harness::new();
    let admin = harness.admin();
    let reader = harness.reader("ada@example.com");
    harness.book(&admin, "Solaris", "9788308045135");
    harness.book(&admin, "Lalka", "9788324040640");
    harness.book(&admin, "Bieguni", "9788308041571");

    let by_author = harness.ok(&reader, "books.find_many", json!({ "search": "author of lalka" }));
    assert_eq!(by_author["metadata"]["total"], 1);

    let by_isbn = harness.ok(&reader, "books.find_many", json!({ "search": "978-83-08" }));
    assert_eq!(by_isbn["metadata"]["total"], 2);

    let page = harness.ok(
        &reader,
        "books.find_many",
        json!({ "sort": "title", "order": "desc", "page": "2", "pageSize": "2" }),
    );
    assert_eq!(page["metadata"]["total"], 3);
    assert_eq!(page["data"].as_array().unwrap().len(), 1);
    assert_eq!(page["data"][0]["title"], "Bieguni");
}

#[test]
fn book_update_is_admin_only_and_diffed() {
    let harness = Harness::new();
    let admin = harness.admin();
    let reader = harness.reader("ada@example.com");
    let book = harness.book(&admin, "Solaris", "9788308045135");
    let second = harness.ok(&admin, "authors.create", json!({ "name": "Translator Turned Author" }));
    let genre = harness.ok(&admin, "genres.create", json!({ "name": "Science fiction" }));

    assert_eq!(
        harness.status(&reader, "books.update", json!({ "id": book["id"], "title": "Mine" })),
        403
    );
    assert_eq!(harness.status(&admin, "books.update", json!({ "id": book["id"] })), 400);

    let updated = harness.ok(
        &admin,
        "books.update",
        json!({
            "id": book["id"],
            "title": "Solaris",
            "pages": 260,
            "authorIds": [book["authors"][0]["id"], second["id"]],
            "genreIds": [genre["id"]],
        }),
    );
    assert_eq!(updated["pages"], 260);
    assert_eq!(updated["authors"].as_array().unwrap().len(), 2);
    assert_eq!(updated["genres"][0]["name"], "Science fiction");

    let cleared = harness.ok(&admin, "books.update", json!({ "id": book["id"], "pages": null }));
    assert!(cleared["pages"].is_null());

    let status = harness.status(&admin, "books.update", json!({ "id": book["id"], "authorIds": [] }));
    assert_eq!(status, 400);
}

#[test]
fn deleting_a_book_cascades_to_user_copies() {
    let harness = Harness::new();
    let admin = harness.admin();
    let reader = harness.reader("ada@example.com");
    let book = harness.book(&admin, "Solaris", "9788308045135");
    let shelf = harness.shelf(&reader, "archive");
    let user_book = harness.ok(
        &reader,
        "user_books.create",
        json!({ "bookId": book["id"], "bookshelfId": shelf }),
    );

    assert_eq!(harness.status(&reader, "books.delete", json!({ "id": book["id"] })), 403);
    harness.ok(&admin, "books.delete", json!({ "id": book["id"] }));

    assert_eq!(harness.status(&admin, "books.find", json!({ "id": book["id"] })), 404);
    assert_eq!(
        harness.status(&reader, "user_books.find", json!({ "id": id(&user_book) })),
        404
    );
}
