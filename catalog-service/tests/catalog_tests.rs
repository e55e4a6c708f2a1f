mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

const UNKNOWN_ID: &str = "6d7c2f1e-9d0a-4c7b-8a51-0b7f2c3d4e5f";

async fn create_product(app: &TestApp, token: &str, name: &str, category_ids: &[&str]) -> Value {
    app.post_authenticated("/admin/products", token)
        .json(&json!({
            "name": name,
            "description": format!("{} description", name),
            "price": 19.99,
            "category_ids": category_ids
        }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response")
}

fn rels(links: &Value) -> Vec<&str> {
    let mut rels: Vec<&str> = links
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    rels.sort();
    rels
}

#[tokio::test]
async fn test_create_category_success() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app
        .post_authenticated("/admin/categories", &token)
        .json(&json!({ "name": "  Books  ", "description": "Paper" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["data"]["id"].as_str().unwrap();
    assert_eq!(body["data"]["name"], "Books");
    assert_eq!(body["data"]["active"], true);
    assert!(body["data"]["created_at"].is_string());

    let links = &body["_meta"]["_links"];
    assert_eq!(links["self"]["href"], format!("/categories/{}", id));
    assert_eq!(links["self"]["method"], "GET");
    assert_eq!(links["update"]["href"], format!("/admin/categories/{}", id));
    assert_eq!(links["update"]["method"], "PATCH");
    assert_eq!(links["update"]["type"], "application/json");
    assert_eq!(links["delete"]["method"], "DELETE");
}

#[tokio::test]
async fn test_create_category_requires_name() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app
        .post_authenticated("/admin/categories", &token)
        .json(&json!({ "name": "   ", "description": "Paper" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_category_name_too_long() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app
        .post_authenticated("/admin/categories", &token)
        .json(&json!({ "name": "b".repeat(256), "description": "Paper" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_create_category_duplicate_name() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    app.create_category(&token, "Books", true).await;

    let response = app
        .post_authenticated("/admin/categories", &token)
        .json(&json!({ "name": "Books", "description": "Again" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_get_category() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let id = app.create_category(&token, "Books", true).await;

    let response = app
        .get(&format!("/categories/{}", id))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], id);
    assert_eq!(
        body["_meta"]["_links"]["self"]["href"],
        format!("/categories/{}", id)
    );
}

#[tokio::test]
async fn test_get_category_not_found() {
    let app = TestApp::spawn().await;

    let response = app
        .get(&format!("/categories/{}", UNKNOWN_ID))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_category_invalid_id() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/categories/not-a-uuid")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_categories_by_ids() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let books = app.create_category(&token, "Books", true).await;
    app.create_category(&token, "Music", true).await;

    let response = app
        .post("/categories/_get")
        .json(&json!([books, UNKNOWN_ID]))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], books);
    assert!(items[0]["_meta"]["_links"]["self"].is_object());
}

#[tokio::test]
async fn test_list_categories_pagination() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    for i in 0..25 {
        app.create_category(&token, &format!("Category {:02}", i), true)
            .await;
    }

    let first: Value = app
        .get("/categories?page=1&limit=10")
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(first["data"].as_array().unwrap().len(), 10);
    assert_eq!(first["data"][0]["name"], "Category 00");
    assert_eq!(first["_meta"]["page"], 1);
    assert_eq!(first["_meta"]["limit"], 10);
    assert_eq!(first["_meta"]["total_pages"], 3);
    assert_eq!(first["_meta"]["results"], 10);
    assert_eq!(rels(&first["_meta"]["_links"]), vec!["last", "next", "self"]);
    assert_eq!(
        first["_meta"]["_links"]["next"]["href"],
        "/categories?page=2&limit=10"
    );

    let middle: Value = app
        .get("/categories?page=2&limit=10")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        rels(&middle["_meta"]["_links"]),
        vec!["last", "next", "prev", "self"]
    );

    let last: Value = app
        .get("/categories?page=3&limit=10")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(last["data"].as_array().unwrap().len(), 5);
    assert_eq!(last["_meta"]["results"], 5);
    assert_eq!(rels(&last["_meta"]["_links"]), vec!["prev", "self"]);
}

#[tokio::test]
async fn test_list_categories_active_filter() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    app.create_category(&token, "Books", true).await;
    app.create_category(&token, "Archive", false).await;

    let body: Value = app
        .get("/categories?active=0")
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");

    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Archive");
    assert_eq!(
        body["_meta"]["_links"]["self"]["href"],
        "/categories?page=1&limit=10&active=0"
    );
}

#[tokio::test]
async fn test_list_categories_invalid_active() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/categories?active=maybe")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_categories_non_numeric_page_uses_defaults() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/categories?page=abc&limit=xyz")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["_meta"]["page"], 1);
    assert_eq!(body["_meta"]["limit"], 10);
    assert_eq!(body["_meta"]["total_pages"], 0);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_list_categories_largest_page() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    app.create_category(&token, "Books", true).await;

    let response = app
        .get("/categories?page=9223372036854775807")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["_meta"]["page"], i64::MAX);
    assert_eq!(rels(&body["_meta"]["_links"]), vec!["prev", "self"]);
}

#[tokio::test]
async fn test_update_category() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let id = app.create_category(&token, "Books", true).await;

    let response = app
        .patch_authenticated(&format!("/admin/categories/{}", id), &token)
        .json(&json!({ "active": false }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "Books");
    assert_eq!(body["data"]["active"], false);
    assert!(body["data"]["updated_at"].is_string());
}

#[tokio::test]
async fn test_update_category_unknown_field() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let id = app.create_category(&token, "Books", true).await;

    let response = app
        .patch_authenticated(&format!("/admin/categories/{}", id), &token)
        .json(&json!({ "colour": "red" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].as_str().unwrap().contains("colour"));
}

#[tokio::test]
async fn test_update_category_not_found() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app
        .patch_authenticated(&format!("/admin/categories/{}", UNKNOWN_ID), &token)
        .json(&json!({ "name": "Books" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_category() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let id = app.create_category(&token, "Books", true).await;

    let response = app
        .delete_authenticated(&format!("/admin/categories/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .delete_authenticated(&format!("/admin/categories/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bulk_delete_categories() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let books = app.create_category(&token, "Books", true).await;
    let music = app.create_category(&token, "Music", true).await;
    let games = app.create_category(&token, "Games", true).await;

    let response = app
        .post_authenticated("/admin/categories/_delete", &token)
        .json(&json!([books, music, UNKNOWN_ID]))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body: Value = app
        .get("/categories")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], games);
}

#[tokio::test]
async fn test_create_product_success() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let books = app.create_category(&token, "Books", true).await;

    let response = app
        .post_authenticated("/admin/products", &token)
        .json(&json!({
            "name": "Dune",
            "description": "Paperback",
            "price": 19.99,
            "category_ids": [books, books]
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["data"]["id"].as_str().unwrap();
    assert_eq!(body["data"]["name"], "Dune");
    assert_eq!(body["data"]["price"], "19.99");
    assert_eq!(body["data"]["active"], true);
    assert_eq!(body["data"]["category_ids"], json!([books]));
    assert_eq!(
        body["_meta"]["_links"]["self"]["href"],
        format!("/products/{}", id)
    );
}

#[tokio::test]
async fn test_create_product_requires_categories() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app
        .post_authenticated("/admin/products", &token)
        .json(&json!({
            "name": "Dune",
            "description": "Paperback",
            "price": 19.99,
            "category_ids": []
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_product_unknown_category() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app
        .post_authenticated("/admin/products", &token)
        .json(&json!({
            "name": "Dune",
            "description": "Paperback",
            "price": 19.99,
            "category_ids": [UNKNOWN_ID]
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].as_str().unwrap().contains(UNKNOWN_ID));
}

#[tokio::test]
async fn test_create_product_negative_price() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let books = app.create_category(&token, "Books", true).await;

    let response = app
        .post_authenticated("/admin/products", &token)
        .json(&json!({
            "name": "Dune",
            "description": "Paperback",
            "price": -1,
            "category_ids": [books]
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_product_price_out_of_range() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let books = app.create_category(&token, "Books", true).await;

    for price in ["1.005", "10000000000"] {
        let response = app
            .post_authenticated("/admin/products", &token)
            .json(&json!({
                "name": "Dune",
                "description": "Paperback",
                "price": price,
                "category_ids": [books]
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "price {}", price);
    }

    let body: Value = app
        .get("/products")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_get_product() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let books = app.create_category(&token, "Books", true).await;
    let created = create_product(&app, &token, "Dune", &[&books]).await;
    let id = created["data"]["id"].as_str().unwrap();

    let response = app
        .get(&format!("/products/{}", id))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "Dune");
    assert_eq!(body["data"]["category_ids"], json!([books]));
}

#[tokio::test]
async fn test_update_product_replaces_categories() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let books = app.create_category(&token, "Books", true).await;
    let music = app.create_category(&token, "Music", true).await;
    let created = create_product(&app, &token, "Dune", &[&books]).await;
    let id = created["data"]["id"].as_str().unwrap();

    let response = app
        .patch_authenticated(&format!("/admin/products/{}", id), &token)
        .json(&json!({ "price": "5.50", "category_ids": [music] }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "Dune");
    assert_eq!(body["data"]["price"], "5.50");
    assert_eq!(body["data"]["category_ids"], json!([music]));
}

#[tokio::test]
async fn test_update_product_unknown_field() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let books = app.create_category(&token, "Books", true).await;
    let created = create_product(&app, &token, "Dune", &[&books]).await;
    let id = created["data"]["id"].as_str().unwrap();

    let response = app
        .patch_authenticated(&format!("/admin/products/{}", id), &token)
        .json(&json!({ "sku": "X-1" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_category_products() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let books = app.create_category(&token, "Books", true).await;
    let music = app.create_category(&token, "Music", true).await;
    create_product(&app, &token, "Dune", &[&books]).await;
    create_product(&app, &token, "Soundtrack", &[&books, &music]).await;
    create_product(&app, &token, "Vinyl", &[&music]).await;

    let body: Value = app
        .get(&format!("/categories/{}/products", books))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");

    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Dune", "Soundtrack"]);
    assert_eq!(
        body["_meta"]["_links"]["self"]["href"],
        format!("/categories/{}/products?page=1&limit=10", books)
    );
}

#[tokio::test]
async fn test_list_category_products_unknown_category() {
    let app = TestApp::spawn().await;

    let response = app
        .get(&format!("/categories/{}/products", UNKNOWN_ID))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_category_unlinks_products() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let books = app.create_category(&token, "Books", true).await;
    let music = app.create_category(&token, "Music", true).await;
    let created = create_product(&app, &token, "Soundtrack", &[&books, &music]).await;
    let id = created["data"]["id"].as_str().unwrap();

    app.delete_authenticated(&format!("/admin/categories/{}", books), &token)
        .send()
        .await
        .expect("Failed to execute request");

    let body: Value = app
        .get(&format!("/products/{}", id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["category_ids"], json!([music]));
}

#[tokio::test]
async fn test_bulk_delete_products() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let books = app.create_category(&token, "Books", true).await;
    let dune = create_product(&app, &token, "Dune", &[&books]).await;
    create_product(&app, &token, "Emma", &[&books]).await;

    let response = app
        .post_authenticated("/admin/products/_delete", &token)
        .json(&json!([dune["data"]["id"]]))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body: Value = app
        .get("/products")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Emma");
}
