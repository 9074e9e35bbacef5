//! API integration tests
//!
//! These run against a live server backed by a migrated database:
//! `cargo test -- --ignored`

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

/// Suffix that keeps unique columns distinct between runs
fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

async fn post(client: &Client, path: &str, body: Value) -> (StatusCode, Value) {
    let response = client
        .post(format!("{}{}", BASE_URL, path))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.expect("Failed to parse response"))
}

async fn patch(client: &Client, path: &str, body: Value) -> (StatusCode, Value) {
    let response = client
        .patch(format!("{}{}", BASE_URL, path))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.expect("Failed to parse response"))
}

async fn get(client: &Client, path: &str) -> (StatusCode, Value) {
    let response = client
        .get(format!("{}{}", BASE_URL, path))
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.expect("Failed to parse response"))
}

async fn create_genre(client: &Client, name: &str) -> i64 {
    let (status, body) = post(client, "/genres", json!({ "genre": name })).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().expect("No id in response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let (status, body) = get(&client, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_create_book_and_fetch_it() {
    let client = Client::new();

    let (status, created) = post(
        &client,
        "/books",
        json!({ "title": "X", "author": "Y", "ISBN": 123 }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["title"], "X");
    assert_eq!(created["ISBN"], 123);

    let id = created["id"].as_i64().unwrap();
    let (status, fetched) = get(&client, &format!("/books/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], created["title"]);
    assert_eq!(fetched["author"], created["author"]);
    assert_eq!(fetched["ISBN"], created["ISBN"]);
}

#[tokio::test]
#[ignore]
async fn test_create_book_with_empty_fields() {
    let client = Client::new();

    let (status, body) = post(&client, "/books", json!({ "title": "", "author": "" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let messages = body["error"].as_array().expect("error should be a list");
    assert!(messages.contains(&json!("Title cannot be empty")));
    assert!(messages.contains(&json!("Author cannot be empty")));
}

#[tokio::test]
#[ignore]
async fn test_book_embeds_its_genre() {
    let client = Client::new();
    let genre_name = unique("Crime");
    let genre_id = create_genre(&client, &genre_name).await;

    let (status, created) = post(
        &client,
        "/books",
        json!({
            "title": "A Song for the Dark Times",
            "author": "Ian Rankin",
            "ISBN": 9781409176978u64,
            "genre_id": genre_id
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let book_id = created["id"].as_i64().unwrap();

    let (_, fetched) = get(&client, &format!("/books/{}", book_id)).await;
    assert_eq!(fetched["genre"]["id"], genre_id);
    assert_eq!(fetched["genre"]["genre"], genre_name);

    let (_, listed) = get(&client, "/books").await;
    let listed_book = listed
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["id"] == book_id)
        .expect("book missing from list");
    assert_eq!(listed_book["genre"]["id"], genre_id);

    let (_, genre) = get(&client, &format!("/genres/{}", genre_id)).await;
    assert!(genre["books"]
        .as_array()
        .unwrap()
        .iter()
        .any(|b| b["id"] == book_id));
}

#[tokio::test]
#[ignore]
async fn test_book_with_unknown_genre_is_rejected() {
    let client = Client::new();

    let (status, body) = post(
        &client,
        "/books",
        json!({ "title": "X", "author": "Y", "genre_id": 2147483000 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!(["genre_id must reference an existing genre"]));
}

#[tokio::test]
#[ignore]
async fn test_duplicate_genre_is_rejected() {
    let client = Client::new();
    let name = unique("Sci fi");
    create_genre(&client, &name).await;

    let (status, body) = post(&client, "/genres", json!({ "genre": name })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"][0].as_str().unwrap();
    assert!(message.contains("must be unique"));

    let (_, genres) = get(&client, "/genres").await;
    let copies = genres
        .as_array()
        .unwrap()
        .iter()
        .filter(|g| g["genre"] == json!(name))
        .count();
    assert_eq!(copies, 1);
}

#[tokio::test]
#[ignore]
async fn test_missing_records_are_not_found() {
    let client = Client::new();

    for (collection, label) in [("books", "book"), ("genres", "genre"), ("readers", "reader")] {
        let path = format!("/{}/12345678", collection);
        let expected = json!({ "error": format!("The {} could not be found.", label) });

        let (status, body) = get(&client, &path).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, expected);

        let (status, body) = patch(&client, &path, json!({})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, expected);

        let response = client
            .delete(format!("{}{}", BASE_URL, path))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
#[ignore]
async fn test_rejected_update_changes_nothing() {
    let client = Client::new();
    let name = unique("History");
    let id = create_genre(&client, &name).await;

    let (status, body) = patch(&client, &format!("/genres/{}", id), json!({ "genre": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!(["Genre cannot be empty"]));

    let (_, genre) = get(&client, &format!("/genres/{}", id)).await;
    assert_eq!(genre["genre"], json!(name));
}

#[tokio::test]
#[ignore]
async fn test_reader_lifecycle_never_exposes_password() {
    let client = Client::new();
    let email = format!("{}@example.com", unique("lizzy"));

    let (status, created) = post(
        &client,
        "/readers",
        json!({ "name": "Elizabeth Bennet", "email": email, "password": "pemberley-1813" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created.get("password").is_none());
    let id = created["id"].as_i64().unwrap();

    let (_, fetched) = get(&client, &format!("/readers/{}", id)).await;
    assert!(fetched.get("password").is_none());
    assert_eq!(fetched["email"], json!(email));

    let (_, listed) = get(&client, "/readers").await;
    assert!(listed
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r.get("password").is_none()));

    let (status, updated) = patch(
        &client,
        &format!("/readers/{}", id),
        json!({ "name": "Elizabeth Darcy", "password": "another-secret" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Elizabeth Darcy");
    assert!(updated.get("password").is_none());

    let response = client
        .delete(format!("{}/readers/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (status, _) = get(&client, &format!("/readers/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_reader_validation_messages() {
    let client = Client::new();

    let (status, body) = post(
        &client,
        "/readers",
        json!({ "name": "", "email": "not-an-email", "password": "short" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        json!([
            "Name cannot be empty",
            "Not a valid email",
            "Password must be between 8 and 30 characters"
        ])
    );
}

#[tokio::test]
#[ignore]
async fn test_duplicate_reader_email_is_rejected() {
    let client = Client::new();
    let email = format!("{}@example.com", unique("darcy"));
    let reader = json!({ "name": "Fitzwilliam Darcy", "email": email, "password": "pemberley-1813" });

    let (status, _) = post(&client, "/readers", reader.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post(&client, "/readers", reader).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!(["Readers.email must be unique"]));
}

#[tokio::test]
#[ignore]
async fn test_deleting_genre_keeps_its_books() {
    let client = Client::new();
    let genre_id = create_genre(&client, &unique("Poetry")).await;

    let (_, book) = post(
        &client,
        "/books",
        json!({ "title": "Leaves of Grass", "author": "Walt Whitman", "genre_id": genre_id }),
    )
    .await;
    let book_id = book["id"].as_i64().unwrap();

    let response = client
        .delete(format!("{}/genres/{}", BASE_URL, genre_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (status, book) = get(&client, &format!("/books/{}", book_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(book["genre_id"].is_null());
    assert!(book.get("genre").is_none());
}
