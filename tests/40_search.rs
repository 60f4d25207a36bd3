mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::json;

use common::{TestServer, MULTI_KEY};

async fn seed(server: &TestServer) -> Result<()> {
    for (subdomain, sku, price, category) in [
        ("acme", "A1", 30, "shirts"),
        ("acme", "A2", 10, "shirts"),
        ("acme", "A3", 20, "hats"),
        ("other", "O1", 5, "shirts"),
    ] {
        server
            .create_product(
                MULTI_KEY,
                json!({
                    "name": sku, "sku": sku, "price": price, "category": category,
                    "project_id": "p1", "subdomain": subdomain
                }),
            )
            .await?;
    }
    Ok(())
}

#[tokio::test]
async fn search_without_subdomain_is_empty() -> Result<()> {
    let server = TestServer::start().await?;
    seed(&server).await?;

    let res = server
        .client
        .post(server.url("/api/v1/products/search"))
        .json(&json!({"filters": []}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::json_body(res).await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 0);
    assert_eq!(body["data"], json!([]));

    Ok(())
}

#[tokio::test]
async fn search_ignores_client_subdomain_filters() -> Result<()> {
    let server = TestServer::start().await?;
    seed(&server).await?;

    let res = server
        .read(Method::POST, "/api/v1/products/search", "acme")
        .json(&json!({
            "filters": [
                {"field": "subdomain", "operator": "==", "value": "other"},
                {"field": "category", "operator": "==", "value": "shirts"}
            ]
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::json_body(res).await?;
    assert_eq!(body["count"], 2, "unexpected listing: {}", body);
    let data = body["data"].as_array().cloned().unwrap_or_default();
    assert!(data.iter().all(|p| p["subdomain"] == "acme"));

    let filters = body["query"]["filters"].as_array().cloned().unwrap_or_default();
    assert!(filters
        .iter()
        .any(|f| f["field"] == "subdomain" && f["value"] == "acme"));
    assert!(!filters.iter().any(|f| f["value"] == "other"));

    Ok(())
}

#[tokio::test]
async fn search_orders_and_limits() -> Result<()> {
    let server = TestServer::start().await?;
    seed(&server).await?;

    let res = server
        .read(Method::POST, "/api/v1/products/search", "acme")
        .json(&json!({
            "orderBy": [{"field": "filter_price", "direction": "asc"}],
            "limit": 2
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::json_body(res).await?;
    let skus: Vec<_> = body["data"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .iter()
        .map(|p| p["sku"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(skus, vec!["A2", "A3"]);

    Ok(())
}

#[tokio::test]
async fn search_rejects_bad_bodies() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server
        .read(Method::POST, "/api/v1/products/search", "acme")
        .json(&json!({"filters": [{"field": "category", "operator": "like", "value": "s"}]}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server
        .read(Method::POST, "/api/v1/products/search", "acme")
        .json(&json!({"filters": [{"field": "category", "operator": "in", "value": "shirts"}]}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
