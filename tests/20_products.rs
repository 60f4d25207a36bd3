mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::json;

use catalog_api::store::DocumentStore;
use common::{simple_product, TestServer, ACME_KEY, MULTI_KEY, OTHER_KEY};

#[tokio::test]
async fn create_simple_product() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server
        .write(Method::POST, "/api/v1/products", ACME_KEY)
        .json(&simple_product("acme"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = common::json_body(res).await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Product created successfully");

    let data = &body["data"];
    assert!(data["id"].as_str().unwrap_or_default().starts_with("prod-"), "bad id: {}", data);
    assert_eq!(data["active"], true);
    assert_eq!(data["filter_price"], 10.0);
    assert!(data["createdAt"].is_string());
    assert_eq!(data["createdAt"], data["updatedAt"]);
    assert_eq!(server.store.len("products").await, 1);

    Ok(())
}

#[tokio::test]
async fn create_variant_product_uses_cheapest_variation() -> Result<()> {
    let server = TestServer::start().await?;

    let data = server
        .create_product(
            ACME_KEY,
            json!({
                "name": "Shirt",
                "project_id": "p1",
                "subdomain": "acme",
                "variations": [
                    {"sku": "A", "price": 15, "attributes": {"size": "L"}},
                    {"sku": "B", "price": 12, "attributes": {"size": "M"}}
                ]
            }),
        )
        .await?;

    assert_eq!(data["filter_price"], 12.0);
    let variations = data["variations"].as_array().cloned().unwrap_or_default();
    assert_eq!(variations.len(), 2);
    assert!(variations.iter().all(|v| v["active"] == true));
    assert!(variations.iter().all(|v| v["id"].as_str().unwrap_or_default().starts_with("var-")));

    Ok(())
}

#[tokio::test]
async fn create_rejects_invalid_products() -> Result<()> {
    let server = TestServer::start().await?;

    let missing_sku = json!({"name": "Shirt", "price": 10, "project_id": "p1", "subdomain": "acme"});
    let res = server
        .write(Method::POST, "/api/v1/products", ACME_KEY)
        .json(&missing_sku)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = common::json_body(res).await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let bad_variation = json!({
        "name": "Shirt", "project_id": "p1", "subdomain": "acme",
        "variations": [{"sku": "A", "price": 0}]
    });
    let res = server
        .write(Method::POST, "/api/v1/products", ACME_KEY)
        .json(&bad_variation)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = common::json_body(res).await?;
    assert_eq!(body["field_errors"]["variation_sku"], "A");

    let res = server
        .write(Method::POST, "/api/v1/products", ACME_KEY)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = common::json_body(res).await?;
    assert_eq!(body["code"], "INVALID_JSON");

    assert_eq!(server.store.len("products").await, 0);
    Ok(())
}

#[tokio::test]
async fn create_in_foreign_subdomain_is_forbidden() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server
        .write(Method::POST, "/api/v1/products", OTHER_KEY)
        .json(&simple_product("acme"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let body = common::json_body(res).await?;
    assert_eq!(
        body["details"],
        "You do not have permission to create resources in this subdomain."
    );
    assert_eq!(server.store.len("products").await, 0);

    Ok(())
}

#[tokio::test]
async fn show_is_tenant_scoped() -> Result<()> {
    let server = TestServer::start().await?;
    let product = server.create_product(ACME_KEY, simple_product("acme")).await?;
    let path = format!("/api/v1/products/{}", product["id"].as_str().unwrap_or_default());

    let res = server.read(Method::GET, &path, "acme").send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = common::json_body(res).await?;
    assert_eq!(body["data"]["id"], product["id"]);

    let res = server.read(Method::GET, &path, "other").send().await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = server.client.get(server.url(&path)).send().await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = server.read(Method::GET, "/api/v1/products/prod-missing", "acme").send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn update_drops_immutable_fields() -> Result<()> {
    let server = TestServer::start().await?;
    let product = server.create_product(ACME_KEY, simple_product("acme")).await?;
    let id = product["id"].as_str().unwrap_or_default().to_string();
    let path = format!("/api/v1/products/{}", id);

    let res = server
        .write(Method::PATCH, &path, ACME_KEY)
        .json(&json!({
            "id": "prod-hijack",
            "createdAt": "2000-01-01T00:00:00Z",
            "subdomain": "other",
            "project_id": "p2",
            "filter_price": 0.5,
            "name": "Better Shirt",
            "price": 20
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::json_body(res).await?;
    assert_eq!(body["message"], "Product updated successfully");
    let data = &body["data"];
    assert_eq!(data["id"], id.as_str());
    assert_eq!(data["subdomain"], "acme");
    assert_eq!(data["project_id"], "p1");
    assert_eq!(data["createdAt"], product["createdAt"]);
    assert_eq!(data["name"], "Better Shirt");
    assert_eq!(data["filter_price"], 20.0);

    let stored = server.store.get("products", &id).await?.data;
    assert_eq!(stored["subdomain"], "acme");
    assert_eq!(stored["name"], "Better Shirt");

    Ok(())
}

#[tokio::test]
async fn update_checks_run_in_order() -> Result<()> {
    let server = TestServer::start().await?;
    let product = server.create_product(ACME_KEY, simple_product("acme")).await?;
    let path = format!("/api/v1/products/{}", product["id"].as_str().unwrap_or_default());

    // Unknown product beats a broken body
    let res = server
        .write(Method::PATCH, "/api/v1/products/prod-missing", ACME_KEY)
        .header("content-type", "application/json")
        .body("{")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Foreign subdomain beats a broken body
    let res = server
        .write(Method::PATCH, &path, OTHER_KEY)
        .header("content-type", "application/json")
        .body("{")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = server
        .write(Method::PATCH, &path, ACME_KEY)
        .header("content-type", "application/json")
        .body("{")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server
        .write(Method::PATCH, &path, ACME_KEY)
        .json(&json!({"price": -3}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn delete_is_soft() -> Result<()> {
    let server = TestServer::start().await?;
    let product = server.create_product(MULTI_KEY, simple_product("acme")).await?;
    let id = product["id"].as_str().unwrap_or_default().to_string();
    let path = format!("/api/v1/products/{}", id);

    let res = server.write(Method::DELETE, &path, OTHER_KEY).send().await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = server.write(Method::DELETE, &path, ACME_KEY).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = common::json_body(res).await?;
    assert_eq!(body["data"]["active"], false);

    let stored = server.store.get("products", &id).await?.data;
    assert_eq!(stored["active"], false);
    assert_eq!(stored["name"], "Shirt");
    assert_eq!(server.store.len("products").await, 1);

    Ok(())
}

#[tokio::test]
async fn oversized_body_is_payload_too_large() -> Result<()> {
    let server = TestServer::start().await?;
    let limit = catalog_api::config::config().server.max_request_size_bytes;

    let mut product = simple_product("acme");
    product["description"] = json!("x".repeat(limit + 1024));

    let res = server
        .write(Method::POST, "/api/v1/products", ACME_KEY)
        .json(&product)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = common::json_body(res).await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");
    assert_eq!(server.store.len("products").await, 0);

    Ok(())
}

#[tokio::test]
async fn body_without_json_content_type_is_unsupported() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server
        .write(Method::POST, "/api/v1/products", ACME_KEY)
        .body(simple_product("acme").to_string())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body = common::json_body(res).await?;
    assert_eq!(body["code"], "UNSUPPORTED_MEDIA_TYPE");
    assert_eq!(server.store.len("products").await, 0);

    Ok(())
}
