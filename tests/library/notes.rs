use serde_json::json;

use crate::support::{id, Harness};

#[test]
fn quotes_lifecycle() {
    let harness = Harness::new();
    let admin = harness.admin();
    let reader = harness.reader("ada@example.com");
    let book = harness.book(&admin, "Solaris", "9788308045135");

    assert_eq!(
        harness.status(&reader, "quotes.create", json!({ "bookId": book["id"], "content": "   " })),
        400
    );
    let quote = harness.ok(
        &reader,
        "quotes.create",
        json!({ "bookId": book["id"], "content": "We don't want other worlds.", "page": "72" }),
    );
    assert_eq!(quote["bookTitle"], "Solaris");
    assert_eq!(quote["page"], "72");
    assert_eq!(quote["isFavorite"], false);
    harness.ok(
        &reader,
        "quotes.create",
        json!({ "bookId": book["id"], "content": "Man has gone out to explore other worlds." }),
    );

    let updated = harness.ok(
        &reader,
        "quotes.update",
        json!({ "id": quote["id"], "isFavorite": true, "page": null }),
    );
    assert_eq!(updated["isFavorite"], true);
    assert!(updated["page"].is_null());

    let favourites = harness.ok(&reader, "quotes.find_many", json!({ "isFavorite": "true" }));
    assert_eq!(favourites["metadata"]["total"], 1);
    let matching = harness.ok(&reader, "quotes.find_many", json!({ "content": "EXPLORE" }));
    assert_eq!(matching["metadata"]["total"], 1);
    let for_book = harness.ok(&reader, "quotes.find_many", json!({ "bookId": book["id"] }));
    assert_eq!(for_book["metadata"]["total"], 2);

    harness.ok(&reader, "quotes.delete", json!({ "id": quote["id"] }));
    let remaining = harness.ok(&reader, "quotes.find_many", json!({}));
    assert_eq!(remaining["metadata"]["total"], 1);
}

#[test]
fn quotes_are_private() {
    let harness = Harness::new();
    let admin = harness.admin();
    let ada = harness.reader("ada@example.com");
    let bob = harness.reader("bob@example.com");
    let book = harness.book(&admin, "Solaris", "9788308045135");
    let quote = harness.ok(&ada, "quotes.create", json!({ "bookId": book["id"], "content": "Ocean." }));

    assert_eq!(
        harness.status(&bob, "quotes.update", json!({ "id": quote["id"], "content": "Mine" })),
        403
    );
    assert_eq!(harness.status(&bob, "quotes.delete", json!({ "id": quote["id"] })), 403);
    let listed = harness.ok(&bob, "quotes.find_many", json!({}));
    assert_eq!(listed["metadata"]["total"], 0);
    // admins get no bypass on personal data
    assert_eq!(harness.status(&admin, "quotes.delete", json!({ "id": quote["id"] })), 403);
}

#[test]
fn quotes_need_a_visible_book() {
    let harness = Harness::new();
    let admin = harness.admin();
    let ada = harness.reader("ada@example.com");
    let bob = harness.reader("bob@example.com");
    let book = harness.book(&admin, "Solaris", "9788308045135");
    let draft = harness.ok(
        &ada,
        "books.create",
        json!({
            "title": "Drafts",
            "isbn": "837319062X",
            "publisher": "Self",
            "releaseYear": 2020,
            "language": "pl",
            "format": "ebook",
            "categoryId": book["category"]["id"],
            "authorIds": [book["authors"][0]["id"]],
        }),
    );

    harness.ok(&ada, "quotes.create", json!({ "bookId": draft["id"], "content": "Mine." }));
    assert_eq!(
        harness.status(&bob, "quotes.create", json!({ "bookId": draft["id"], "content": "Theirs." })),
        404
    );
}

#[test]
fn collections_lifecycle() {
    let harness = Harness::new();
    let admin = harness.admin();
    let reader = harness.reader("ada@example.com");
    let book = harness.book(&admin, "Solaris", "9788308045135");
    let shelf = harness.shelf(&reader, "archive");

    let collection = harness.ok(&reader, "collections.create", json!({ "name": "Sci-fi" }));
    assert_eq!(collection["userBookCount"], 0);
    assert_eq!(harness.status(&reader, "collections.create", json!({ "name": "SCI-FI" })), 409);

    let user_book = harness.ok(
        &reader,
        "user_books.create",
        json!({ "bookId": book["id"], "bookshelfId": shelf, "collectionIds": [collection["id"]] }),
    );

    let renamed = harness.ok(
        &reader,
        "collections.update",
        json!({ "id": collection["id"], "name": "Science fiction" }),
    );
    assert_eq!(renamed["name"], "Science fiction");
    assert_eq!(renamed["userBookCount"], 1);

    let listed = harness.ok(&reader, "collections.find_many", json!({ "name": "science" }));
    assert_eq!(listed["metadata"]["total"], 1);

    let bob = harness.reader("bob@example.com");
    assert_eq!(harness.status(&bob, "collections.delete", json!({ "id": collection["id"] })), 403);

    harness.ok(&reader, "collections.delete", json!({ "id": collection["id"] }));
    let kept = harness.ok(&reader, "user_books.find", json!({ "id": id(&user_book) }));
    assert_eq!(kept["collectionIds"], json!([]));
}
