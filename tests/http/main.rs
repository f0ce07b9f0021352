//! REST integration tests: the axum router on an ephemeral port, driven by reqwest.

mod support;

use reqwest::StatusCode;
use serde_json::{json, Value};

use support::{Client, ADMIN_EMAIL, PASSWORD};

#[tokio::test]
async fn health_is_public() {
    let client = Client::start().await;

    let resp = client.get("/health", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    let commands = body["commands"].as_array().unwrap();
    assert_eq!(commands.len(), 51);
    assert!(commands.contains(&json!("books.find_many")));
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let client = Client::start().await;

    let resp = client.get("/nowhere", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn account_flow() {
    let client = Client::start().await;

    let resp = client
        .post(
            "/users/register",
            None,
            json!({ "email": "ada@example.com", "name": "Ada", "password": PASSWORD }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    assert_eq!(client.get("/users/me", None).await.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        client.get("/users/me", Some("not-a-token")).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let tokens = client.login("ada@example.com").await;
    let access = tokens["accessToken"].as_str().unwrap();
    let me: Value = client.get("/users/me", Some(access)).await.json().await.unwrap();
    assert_eq!(me["email"], "ada@example.com");

    let resp = client
        .patch("/users/me", Some(access), json!({ "name": "Ada Lovelace" }))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .post(
            "/users/token/refresh",
            None,
            json!({ "refreshToken": tokens["refreshToken"] }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let rotated: Value = resp.json().await.unwrap();
    let fresh = rotated["accessToken"].as_str().unwrap();

    let resp = client.post("/users/logout", Some(fresh), json!({})).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(resp.bytes().await.unwrap().is_empty());
    assert_eq!(client.get("/users/me", Some(fresh)).await.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn validation_errors_carry_context() {
    let client = Client::start().await;
    let admin = client.login(ADMIN_EMAIL).await;
    let token = admin["accessToken"].as_str().unwrap();

    let resp = client
        .post("/authors", Some(token), json!({ "name": "" }))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], 400);
    assert_eq!(body["context"]["field"], "name");

    let resp = client.post("/authors", Some(token), json!(["not", "an", "object"])).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn catalog_and_shelves_over_http() {
    let client = Client::start().await;
    let admin = client.login(ADMIN_EMAIL).await;
    let admin = admin["accessToken"].as_str().unwrap();

    let author: Value = client
        .post("/authors", Some(admin), json!({ "name": "Stanisław Lem" }))
        .await
        .json()
        .await
        .unwrap();
    let resp = client
        .post("/categories", Some(admin), json!({ "name": "Science fiction" }))
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let category: Value = resp.json().await.unwrap();

    let resp = client
        .post(
            "/books",
            Some(admin),
            json!({
                "title": "Solaris",
                "isbn": "978-83-08-04513-5",
                "publisher": "Wydawnictwo Literackie",
                "releaseYear": 1961,
                "language": "pl",
                "format": "paperback",
                "categoryId": category["id"],
                "authorIds": [author["id"]],
            }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let book: Value = resp.json().await.unwrap();
    let book_id = book["id"].as_str().unwrap();

    client
        .post(
            "/users/register",
            None,
            json!({ "email": "ada@example.com", "name": "Ada", "password": PASSWORD }),
        )
        .await;
    let reader = client.login("ada@example.com").await;
    let reader = reader["accessToken"].as_str().unwrap();

    let found: Value = client
        .get("/books?search=lem&releaseYearFrom=1950&page=1&pageSize=5", Some(reader))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(found["metadata"]["total"], 1);
    assert_eq!(found["metadata"]["pageSize"], 5);

    let resp = client
        .patch(&format!("/books/{book_id}"), Some(reader), json!({ "pages": 204 }))
        .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let shelves: Value = client
        .get("/bookshelves?type=archive", Some(reader))
        .await
        .json()
        .await
        .unwrap();
    let archive = shelves["data"][0]["id"].clone();

    let resp = client
        .post(
            "/user-books",
            Some(reader),
            json!({ "bookId": book_id, "bookshelfId": archive }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let user_book: Value = resp.json().await.unwrap();
    let user_book_id = user_book["id"].as_str().unwrap();

    let resp = client
        .post(
            &format!("/user-books/{user_book_id}/readings"),
            Some(reader),
            json!({ "startedAt": "2024-05-01", "rating": 9 }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let reading: Value = resp.json().await.unwrap();
    assert_eq!(reading["userBookId"], user_book["id"]);

    let history: Value = client
        .get(&format!("/user-books/{user_book_id}/readings"), Some(reader))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(history["metadata"]["total"], 1);

    let resp = client
        .delete(
            &format!("/user-books/{user_book_id}/readings/{}", reading["id"].as_str().unwrap()),
            Some(reader),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let favourites: Value = client
        .get("/user-books?isFavorite=false&status=toRead", Some(reader))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(favourites["metadata"]["total"], 1);

    let resp = client.delete(&format!("/books/{book_id}"), Some(admin)).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = client.get(&format!("/user-books/{user_book_id}"), Some(reader)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn path_id_wins_over_body() {
    let client = Client::start().await;
    client
        .post(
            "/users/register",
            None,
            json!({ "email": "ada@example.com", "name": "Ada", "password": PASSWORD }),
        )
        .await;
    let reader = client.login("ada@example.com").await;
    let reader = reader["accessToken"].as_str().unwrap();

    let shelf: Value = client
        .post("/bookshelves", Some(reader), json!({ "name": "Holiday" }))
        .await
        .json()
        .await
        .unwrap();
    let shelf_id = shelf["id"].as_str().unwrap();

    let resp = client
        .patch(
            &format!("/bookshelves/{shelf_id}"),
            Some(reader),
            json!({ "id": uuid::Uuid::new_v4(), "name": "Summer" }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let renamed: Value = resp.json().await.unwrap();
    assert_eq!(renamed["id"], shelf["id"]);
    assert_eq!(renamed["name"], "Summer");
}
