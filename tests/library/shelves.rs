use serde_json::{json, Value};

use librarium::microsvc::Session;

use crate::support::{id, Harness};

/// A reader with one approved book placed on their Archive shelf.
struct Shelved {
    harness: Harness,
    admin: Session,
    reader: Session,
    book: Value,
    user_book: Value,
}

fn shelved() -> Shelved {
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
    Shelved {
        harness,
        admin,
        reader,
        book,
        user_book,
    }
}

#[test]
fn standard_shelves_are_named_uniquely() {
    let harness = Harness::new();
    let reader = harness.reader("ada@example.com");

    let shelf = harness.ok(&reader, "bookshelves.create", json!({ "name": "Favourites" }));
    assert_eq!(shelf["type"], "standard");
    assert_eq!(shelf["bookCount"], 0);

    assert_eq!(harness.status(&reader, "bookshelves.create", json!({ "name": "favourites" })), 409);
    assert_eq!(harness.status(&reader, "bookshelves.create", json!({ "name": "archive" })), 409);

    // another user may reuse the name
    let other = harness.reader("bob@example.com");
    harness.ok(&other, "bookshelves.create", json!({ "name": "Favourites" }));
}

#[test]
fn default_shelves_are_fixed() {
    let harness = Harness::new();
    let reader = harness.reader("ada@example.com");
    let archive = harness.shelf(&reader, "archive");

    let status = harness.status(&reader, "bookshelves.update", json!({ "id": archive, "name": "Old" }));
    assert_eq!(status, 400);
    assert_eq!(harness.status(&reader, "bookshelves.delete", json!({ "id": archive })), 400);

    let pictured = harness.ok(
        &reader,
        "bookshelves.update",
        json!({ "id": archive, "imageUrl": "https://img.example/archive.jpg" }),
    );
    assert_eq!(pictured["imageUrl"], "https://img.example/archive.jpg");
}

#[test]
fn shelves_belong_to_their_owner() {
    let harness = Harness::new();
    let ada = harness.reader("ada@example.com");
    let bob = harness.reader("bob@example.com");
    let shelf = harness.ok(&ada, "bookshelves.create", json!({ "name": "Private" }));

    assert_eq!(harness.status(&bob, "bookshelves.find", json!({ "id": shelf["id"] })), 403);
    assert_eq!(
        harness.status(&bob, "bookshelves.update", json!({ "id": shelf["id"], "name": "Mine" })),
        403
    );
    assert_eq!(harness.status(&bob, "bookshelves.delete", json!({ "id": shelf["id"] })), 403);

    let listed = harness.ok(&bob, "bookshelves.find_many", json!({ "name": "private" }));
    assert_eq!(listed["metadata"]["total"], 0);

    let renamed = harness.ok(&ada, "bookshelves.update", json!({ "id": shelf["id"], "name": "Shared" }));
    assert_eq!(renamed["name"], "Shared");
    harness.ok(&ada, "bookshelves.delete", json!({ "id": shelf["id"] }));
    assert_eq!(harness.status(&ada, "bookshelves.find", json!({ "id": shelf["id"] })), 404);
}

#[test]
fn non_empty_shelf_cannot_be_deleted() {
    let Shelved {
        harness,
        reader,
        user_book,
        ..
    } = shelved();
    let shelf = harness.ok(&reader, "bookshelves.create", json!({ "name": "Current" }));
    harness.ok(
        &reader,
        "user_books.update",
        json!({ "id": user_book["id"], "bookshelfId": shelf["id"] }),
    );

    assert_eq!(harness.status(&reader, "bookshelves.delete", json!({ "id": shelf["id"] })), 400);
    let found = harness.ok(&reader, "bookshelves.find", json!({ "id": shelf["id"] }));
    assert_eq!(found["bookCount"], 1);
}

#[test]
fn one_copy_per_book() {
    let Shelved {
        harness,
        reader,
        book,
        user_book,
        ..
    } = shelved();
    assert_eq!(user_book["status"], "toRead");
    assert_eq!(user_book["book"]["title"], "Solaris");

    let shelf = harness.shelf(&reader, "borrowing");
    let status = harness.status(
        &reader,
        "user_books.create",
        json!({ "bookId": book["id"], "bookshelfId": shelf }),
    );
    assert_eq!(status, 409);
}

#[test]
fn user_books_require_own_shelf_and_collections() {
    let Shelved {
        harness,
        admin,
        reader,
        ..
    } = shelved();
    let other_book = harness.book(&admin, "Lalka", "9788324040640");
    let bob = harness.reader("bob@example.com");
    let bob_shelf = harness.shelf(&bob, "archive");
    let bob_collection = harness.ok(&bob, "collections.create", json!({ "name": "Classics" }));
    let own_shelf = harness.shelf(&reader, "archive");

    assert_eq!(
        harness.status(
            &reader,
            "user_books.create",
            json!({ "bookId": other_book["id"], "bookshelfId": bob_shelf }),
        ),
        403
    );
    assert_eq!(
        harness.status(
            &reader,
            "user_books.create",
            json!({
                "bookId": other_book["id"],
                "bookshelfId": own_shelf,
                "collectionIds": [bob_collection["id"]],
            }),
        ),
        404
    );
    assert_eq!(
        harness.status(
            &reader,
            "user_books.create",
            json!({ "bookId": uuid::Uuid::new_v4(), "bookshelfId": own_shelf }),
        ),
        404
    );
}

#[test]
fn user_books_are_private() {
    let Shelved {
        harness, user_book, ..
    } = shelved();
    let bob = harness.reader("bob@example.com");

    assert_eq!(harness.status(&bob, "user_books.find", json!({ "id": user_book["id"] })), 403);
    assert_eq!(
        harness.status(&bob, "user_books.update", json!({ "id": user_book["id"], "isFavorite": true })),
        403
    );
    assert_eq!(harness.status(&bob, "user_books.delete", json!({ "id": user_book["id"] })), 403);
    let listed = harness.ok(&bob, "user_books.find_many", json!({}));
    assert_eq!(listed["metadata"]["total"], 0);
}

#[test]
fn user_book_update_and_filters() {
    let Shelved {
        harness,
        reader,
        user_book,
        ..
    } = shelved();
    let collection = harness.ok(&reader, "collections.create", json!({ "name": "Sci-fi" }));

    let updated = harness.ok(
        &reader,
        "user_books.update",
        json!({
            "id": user_book["id"],
            "status": "finished",
            "isFavorite": true,
            "collectionIds": [collection["id"]],
        }),
    );
    assert_eq!(updated["status"], "finished");
    assert_eq!(updated["isFavorite"], true);
    assert_eq!(updated["collectionIds"], json!([collection["id"]]));

    let favourites = harness.ok(&reader, "user_books.find_many", json!({ "isFavorite": "true" }));
    assert_eq!(favourites["metadata"]["total"], 1);
    let in_collection = harness.ok(
        &reader,
        "user_books.find_many",
        json!({ "collectionId": collection["id"], "title": "author of solaris" }),
    );
    assert_eq!(in_collection["metadata"]["total"], 1);
    let reading = harness.ok(&reader, "user_books.find_many", json!({ "status": "inProgress" }));
    assert_eq!(reading["metadata"]["total"], 0);

    let uncollected = harness.ok(
        &reader,
        "user_books.update",
        json!({ "id": user_book["id"], "collectionIds": [] }),
    );
    assert_eq!(uncollected["collectionIds"], json!([]));

    harness.ok(&reader, "user_books.delete", json!({ "id": user_book["id"] }));
    assert_eq!(harness.status(&reader, "user_books.find", json!({ "id": user_book["id"] })), 404);
}

#[test]
fn moving_off_the_borrowing_shelf_returns_the_book() {
    let Shelved {
        harness,
        reader,
        user_book,
        ..
    } = shelved();
    let borrowing_shelf = harness.shelf(&reader, "borrowing");
    let archive = harness.shelf(&reader, "archive");

    harness.ok(
        &reader,
        "user_books.update",
        json!({ "id": user_book["id"], "bookshelfId": borrowing_shelf }),
    );
    let borrowing = harness.ok(
        &reader,
        "borrowings.create",
        json!({ "userBookId": user_book["id"], "borrower": "Bob", "startedAt": "2024-03-01" }),
    );
    assert_eq!(borrowing["isOpen"], true);

    let moved = harness.ok(
        &reader,
        "user_books.update",
        json!({ "id": user_book["id"], "bookshelfId": archive }),
    );
    assert_eq!(id(&moved["bookshelf"]), archive);

    let borrowings = harness.ok(
        &reader,
        "borrowings.find_many",
        json!({ "userBookId": user_book["id"] }),
    );
    assert_eq!(borrowings["data"][0]["isOpen"], false);
    assert!(borrowings["data"][0]["endedAt"].is_string());
    let open = harness.ok(&reader, "borrowings.find_many", json!({ "isOpen": "true" }));
    assert_eq!(open["metadata"]["total"], 0);
}

#[test]
fn one_open_borrowing_per_user_book() {
    let Shelved {
        harness,
        reader,
        user_book,
        ..
    } = shelved();
    let create = |borrower: &str, started_at: &str| {
        harness.call(
            &reader,
            "borrowings.create",
            json!({ "userBookId": user_book["id"], "borrower": borrower, "startedAt": started_at }),
        )
    };

    let first = create("Bob", "2024-01-10").unwrap();
    assert_eq!(create("Cecil", "2024-02-01").unwrap_err().status_code(), 409);

    let closed = harness.ok(
        &reader,
        "borrowings.update",
        json!({ "id": first["id"], "endedAt": "2024-01-31" }),
    );
    assert_eq!(closed["isOpen"], false);
    let second = create("Cecil", "2024-02-01").unwrap();

    // reopening the first would leave two open borrowings
    let status = harness.status(&reader, "borrowings.update", json!({ "id": first["id"], "endedAt": null }));
    assert_eq!(status, 409);

    let status = harness.status(
        &reader,
        "borrowings.update",
        json!({ "id": second["id"], "endedAt": "2024-01-01" }),
    );
    assert_eq!(status, 400);
}

#[test]
fn borrowings_are_scoped_to_their_user_book() {
    let Shelved {
        harness,
        reader,
        user_book,
        ..
    } = shelved();
    let borrowing = harness.ok(
        &reader,
        "borrowings.create",
        json!({ "userBookId": user_book["id"], "borrower": "Bob", "startedAt": "2024-01-10" }),
    );
    let elsewhere = uuid::Uuid::new_v4();

    let status = harness.status(
        &reader,
        "borrowings.update",
        json!({ "userBookId": elsewhere, "id": borrowing["id"], "borrower": "Cecil" }),
    );
    assert_eq!(status, 404);
    assert_eq!(
        harness.status(
            &reader,
            "borrowings.delete",
            json!({ "userBookId": elsewhere, "id": borrowing["id"] }),
        ),
        404
    );

    let bob = harness.reader("bob@example.com");
    assert_eq!(harness.status(&bob, "borrowings.delete", json!({ "id": borrowing["id"] })), 403);

    harness.ok(
        &reader,
        "borrowings.delete",
        json!({ "userBookId": user_book["id"], "id": borrowing["id"] }),
    );
    let remaining = harness.ok(&reader, "borrowings.find_many", json!({}));
    assert_eq!(remaining["metadata"]["total"], 0);
}

#[test]
fn reading_history() {
    let Shelved {
        harness,
        reader,
        user_book,
        ..
    } = shelved();

    let status = harness.status(
        &reader,
        "book_readings.create",
        json!({ "userBookId": user_book["id"], "startedAt": "2024-05-10", "endedAt": "2024-05-01" }),
    );
    assert_eq!(status, 400);
    let status = harness.status(
        &reader,
        "book_readings.create",
        json!({ "userBookId": user_book["id"], "startedAt": "2024-05-10", "rating": 11 }),
    );
    assert_eq!(status, 400);

    let reading = harness.ok(
        &reader,
        "book_readings.create",
        json!({ "userBookId": user_book["id"], "startedAt": "2024-05-01", "rating": 8 }),
    );
    assert_eq!(reading["rating"], 8);

    // both ends move together
    let moved = harness.ok(
        &reader,
        "book_readings.update",
        json!({
            "userBookId": user_book["id"],
            "id": reading["id"],
            "startedAt": "2024-06-10",
            "endedAt": "2024-06-20",
            "comment": "Second time round",
        }),
    );
    assert_eq!(moved["startedAt"], "2024-06-10");
    assert_eq!(moved["endedAt"], "2024-06-20");
    assert_eq!(moved["comment"], "Second time round");

    let cleared = harness.ok(&reader, "book_readings.update", json!({ "id": reading["id"], "rating": null }));
    assert!(cleared["rating"].is_null());

    let history = harness.ok(
        &reader,
        "book_readings.find_many",
        json!({ "userBookId": user_book["id"] }),
    );
    assert_eq!(history["metadata"]["total"], 1);

    let bob = harness.reader("bob@example.com");
    assert_eq!(
        harness.status(&bob, "book_readings.find_many", json!({ "userBookId": user_book["id"] })),
        403
    );
    assert_eq!(
        harness.status(
            &reader,
            "book_readings.delete",
            json!({ "userBookId": uuid::Uuid::new_v4(), "id": reading["id"] }),
        ),
        404
    );
    harness.ok(&reader, "book_readings.delete", json!({ "id": reading["id"] }));
}
