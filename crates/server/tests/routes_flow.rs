use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use sea_orm::Value;
use serde_json::{json, Value as JsonValue};
use service::executor::mock::MockProcedureExecutor;
use tower::Service;

use server::build_app;

fn app_with(mock: MockProcedureExecutor) -> (Router, Arc<MockProcedureExecutor>) {
    let mock = Arc::new(mock);
    (build_app(mock.clone()), mock)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<JsonValue>) -> anyhow::Result<(StatusCode, String)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&b)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().call(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok((status, String::from_utf8(bytes.to_vec())?))
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Option<JsonValue>) -> anyhow::Result<(StatusCode, JsonValue)> {
    let (status, text) = send(app, method, uri, body).await?;
    let json = if text.is_empty() { JsonValue::Null } else { serde_json::from_str(&text)? };
    Ok((status, json))
}

fn product_body() -> JsonValue {
    json!({
        "productsName": "Cordless Drill",
        "productDesc": "18V drill",
        "productCategory": "tools",
        "productPrice": 89.9,
        "productSku": "DRL-18V"
    })
}

fn transfer_body(quantity: JsonValue) -> JsonValue {
    json!({"productsId": 7, "sourceStoreId": 1, "targetStoreId": 2, "quantity": quantity})
}

#[tokio::test]
async fn invalid_ids_are_rejected_without_calling_the_database() -> anyhow::Result<()> {
    let (app, mock) = app_with(MockProcedureExecutor::new());
    for bad in ["0", "-4", "abc", "x2"] {
        let (status, body) = send_json(&app, "GET", &format!("/api/products/{bad}"), None).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "GET {bad}");
        assert_eq!(body["error"], "product id must be a positive integer");

        let (status, _) = send_json(&app, "PUT", &format!("/api/editProducts/{bad}"), Some(product_body())).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "PUT {bad}");

        let (status, _) = send_json(&app, "DELETE", &format!("/api/deleteProducts/{bad}"), None).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "DELETE {bad}");
    }
    assert_eq!(mock.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn invalid_quantities_are_rejected_without_calling_the_database() -> anyhow::Result<()> {
    let (app, mock) = app_with(MockProcedureExecutor::new());
    for bad in [json!(0), json!(-3), json!("-3"), json!("abc"), json!(0.5)] {
        let (status, body) = send_json(&app, "POST", "/api/products/transfer", Some(transfer_body(bad.clone()))).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "quantity {bad}");
        assert!(body["error"].as_str().unwrap().contains("quantity"));
    }
    assert_eq!(mock.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn numeric_inputs_use_their_leading_number() -> anyhow::Result<()> {
    let (app, mock) = app_with(MockProcedureExecutor::new().with_rows("GetProductDetails", vec![json!({"productId": 12})]));
    let (status, _) = send_json(&app, "GET", "/api/products/12abc", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mock.calls()[0].params(), &[Value::BigInt(Some(12))]);

    let (app, mock) = app_with(MockProcedureExecutor::new());
    for (quantity, expected) in [(json!("3 units"), 3), (json!(2.9), 2)] {
        let (status, _) = send_json(&app, "POST", "/api/products/transfer", Some(transfer_body(quantity))).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(mock.calls().last().unwrap().params()[3], Value::BigInt(Some(expected)));
    }

    send_json(&app, "GET", "/api/products?minPrice=5abc&page=2nd", None).await?;
    let params = mock.calls().last().unwrap().params().to_vec();
    assert_eq!(params[1], Value::Double(Some(5.0)));
    assert_eq!(params[5], Value::BigInt(Some(2)));
    Ok(())
}

#[tokio::test]
async fn rejected_queries_and_transfer_get_use_the_error_body() -> anyhow::Result<()> {
    let (app, mock) = app_with(MockProcedureExecutor::new());
    let (status, body) = send_json(&app, "GET", "/api/products?page=1&page=2", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid query string");
    assert!(body["details"].is_string());

    let (status, body) = send_json(&app, "GET", "/api/products/transfer", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "product id must be a positive integer"}));
    assert_eq!(mock.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn register_requires_all_five_fields() -> anyhow::Result<()> {
    let (app, mock) = app_with(MockProcedureExecutor::new());
    for key in ["productsName", "productDesc", "productCategory", "productPrice", "productSku"] {
        let mut body = product_body();
        body.as_object_mut().unwrap().remove(key);
        let (status, resp) = send_json(&app, "POST", "/api/registerProducts", Some(body)).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "without {key}");
        assert!(resp["error"].as_str().unwrap().contains(key));
    }
    assert_eq!(mock.call_count(), 0);

    let (status, resp) = send_json(&app, "POST", "/api/registerProducts", Some(product_body())).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resp, json!({"message": "product created successfully"}));

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].sql(), "CALL CreateProduct(?, ?, ?, ?, ?)");
    assert_eq!(calls[0].params()[0], Value::from("Cordless Drill"));
    assert_eq!(calls[0].params()[3], Value::Double(Some(89.9)));
    Ok(())
}

#[tokio::test]
async fn edit_requires_all_five_fields() -> anyhow::Result<()> {
    let (app, mock) = app_with(MockProcedureExecutor::new());
    for key in ["productsName", "productDesc", "productCategory", "productPrice", "productSku"] {
        let mut body = product_body();
        body[key] = JsonValue::Null;
        let (status, _) = send_json(&app, "PUT", "/api/editProducts/3", Some(body)).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "without {key}");
    }
    assert_eq!(mock.call_count(), 0);

    let (status, resp) = send_json(&app, "PUT", "/api/editProducts/3", Some(product_body())).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["message"], "product updated successfully");
    assert_eq!(mock.calls()[0].params()[0], Value::BigInt(Some(3)));
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() -> anyhow::Result<()> {
    let (app, mock) = app_with(MockProcedureExecutor::new());
    let req = Request::builder()
        .method("POST")
        .uri("/api/registerProducts")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let (status, _) = send_json(&app, "POST", "/api/products/transfer", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(mock.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn product_details_pass_rows_through_unchanged() -> anyhow::Result<()> {
    let row = json!({"productId": 5, "sku": "DRL-18V", "name": "Cordless Drill", "price": "89.90", "stock": null});
    let (app, mock) = app_with(MockProcedureExecutor::new().with_rows("GetProductDetails", vec![row.clone()]));

    let (status, text) = send(&app, "GET", "/api/products/5", None).await?;
    assert_eq!(status, StatusCode::OK);
    // byte-for-byte: same keys, same order, same values
    assert_eq!(text, serde_json::to_string(&row)?);
    assert_eq!(mock.calls()[0].params(), &[Value::BigInt(Some(5))]);
    Ok(())
}

#[tokio::test]
async fn product_details_empty_result_is_not_found() -> anyhow::Result<()> {
    let (app, mock) = app_with(MockProcedureExecutor::new().with_rows("GetProductDetails", vec![]));
    let (status, body) = send_json(&app, "GET", "/api/products/99", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "product not found");
    assert_eq!(mock.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn delete_maps_45001_only() -> anyhow::Result<()> {
    let (app, _) = app_with(MockProcedureExecutor::new().with_vendor_error("DeleteProduct", "45001", "Producto no encontrado"));
    let first = send_json(&app, "DELETE", "/api/deleteProducts/12", None).await?;
    assert_eq!(first.0, StatusCode::NOT_FOUND);
    assert_eq!(first.1, json!({"error": "Producto no encontrado"}));

    // repeating the delete reproduces the same outcome
    let second = send_json(&app, "DELETE", "/api/deleteProducts/12", None).await?;
    assert_eq!(second, first);

    let (app, _) = app_with(MockProcedureExecutor::new().with_vendor_error("DeleteProduct", "45000", "bad input"));
    let (status, body) = send_json(&app, "DELETE", "/api/deleteProducts/12", None).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "failed to execute stored procedure");
    assert!(body["details"].as_str().unwrap().contains("45000"));

    let (app, _) = app_with(MockProcedureExecutor::new());
    let (status, body) = send_json(&app, "DELETE", "/api/deleteProducts/12", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "product deleted successfully");
    Ok(())
}

#[tokio::test]
async fn create_and_update_surface_vendor_messages() -> anyhow::Result<()> {
    let (app, _) = app_with(MockProcedureExecutor::new().with_vendor_error("CreateProduct", "45000", "SKU already exists"));
    let (status, body) = send_json(&app, "POST", "/api/registerProducts", Some(product_body())).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "SKU already exists");

    for code in ["45000", "45001"] {
        let (app, _) = app_with(MockProcedureExecutor::new().with_vendor_error("UpdateProduct", code, "cannot update"));
        let (status, body) = send_json(&app, "PUT", "/api/editProducts/3", Some(product_body())).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "code {code}");
        assert_eq!(body["error"], "cannot update");
    }

    let (app, _) = app_with(MockProcedureExecutor::new().with_vendor_error("UpdateProduct", "45004", "odd"));
    let (status, _) = send_json(&app, "PUT", "/api/editProducts/3", Some(product_body())).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}

#[tokio::test]
async fn transfer_maps_45003_and_45004() -> anyhow::Result<()> {
    let (app, _) = app_with(MockProcedureExecutor::new().with_vendor_error("TransferProduct", "45004", "stock 2 < 5"));
    let (status, body) = send_json(&app, "POST", "/api/products/transfer", Some(transfer_body(json!(5)))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "insufficient stock in the source store");

    let (app, _) = app_with(MockProcedureExecutor::new().with_vendor_error("TransferProduct", "45003", "missing"));
    let (status, body) = send_json(&app, "POST", "/api/products/transfer", Some(transfer_body(json!(5)))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "product does not exist in the source store");

    let (app, mock) = app_with(MockProcedureExecutor::new());
    let (status, body) = send_json(&app, "POST", "/api/products/transfer", Some(transfer_body(json!("5")))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "transfer completed successfully");
    assert_eq!(
        mock.calls()[0].params(),
        &[Value::BigInt(Some(7)), Value::BigInt(Some(1)), Value::BigInt(Some(2)), Value::BigInt(Some(5))]
    );
    Ok(())
}

#[tokio::test]
async fn inventory_routes() -> anyhow::Result<()> {
    let rows = vec![json!({"productId": 1, "quantity": 4}), json!({"productId": 2, "quantity": 0})];
    let (app, mock) = app_with(MockProcedureExecutor::new().with_rows("GetStoreInventory", rows.clone()));
    let (status, body) = send_json(&app, "GET", "/api/inventory/S-01", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, JsonValue::Array(rows));
    assert_eq!(mock.calls()[0].params(), &[Value::from("S-01")]);

    let (status, _) = send_json(&app, "GET", "/api/inventory/%20", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(mock.call_count(), 1);

    let (app, _) = app_with(MockProcedureExecutor::new().with_vendor_error("GetStoreInventory", "45002", "Tienda no existe"));
    let (status, body) = send_json(&app, "GET", "/api/inventory/S-404", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Tienda no existe");
    Ok(())
}

#[tokio::test]
async fn list_forwards_filters_and_defaults() -> anyhow::Result<()> {
    let (app, mock) = app_with(MockProcedureExecutor::new());
    let (status, body) = send_json(&app, "GET", "/api/products?category=tools&minPrice=5&maxStock=abc&limit=3", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    assert_eq!(
        mock.calls()[0].params(),
        &[
            Value::from("tools"),
            Value::Double(Some(5.0)),
            Value::Double(None),
            Value::BigInt(None),
            Value::BigInt(None),
            Value::BigInt(Some(1)),
            Value::BigInt(Some(3)),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn list_and_alerts_fail_with_500() -> anyhow::Result<()> {
    let (app, _) = app_with(
        MockProcedureExecutor::new()
            .with_vendor_error("GetProducts", "45000", "nope")
            .with_db_error("GetLowStockAlerts", "lost connection during query"),
    );
    let (status, _) = send_json(&app, "GET", "/api/products", None).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, body) = send_json(&app, "GET", "/api/alerts/low-stock", None).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "failed to execute stored procedure");
    assert!(body["details"].as_str().unwrap().contains("lost connection"));
    Ok(())
}

#[tokio::test]
async fn connection_failures_are_500() -> anyhow::Result<()> {
    let (app, _) = app_with(MockProcedureExecutor::new().with_connection_error("DeleteProduct", "pool timed out"));
    let (status, body) = send_json(&app, "DELETE", "/api/deleteProducts/1", None).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "failed to connect to the database");
    Ok(())
}

#[tokio::test]
async fn low_stock_alerts_ok() -> anyhow::Result<()> {
    let rows = vec![json!({"productId": 3, "storeId": 1, "quantity": 1})];
    let (app, _) = app_with(MockProcedureExecutor::new().with_rows("GetLowStockAlerts", rows.clone()));
    let (status, body) = send_json(&app, "GET", "/api/alerts/low-stock", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, JsonValue::Array(rows));
    Ok(())
}

#[tokio::test]
async fn concurrent_lists_get_their_own_results() -> anyhow::Result<()> {
    let mock = MockProcedureExecutor::new()
        .with_delay(Duration::from_millis(50))
        .with_responder("GetProducts", |call| {
            let category = match &call.params()[0] {
                Value::String(Some(c)) => c.to_string(),
                _ => "all".to_string(),
            };
            Ok(vec![json!({"category": category})])
        });
    let (app, mock) = app_with(mock);

    let (a, b) = tokio::join!(
        send_json(&app, "GET", "/api/products?category=tools", None),
        send_json(&app, "GET", "/api/products?category=garden", None),
    );
    assert_eq!(a?.1, json!([{"category": "tools"}]));
    assert_eq!(b?.1, json!([{"category": "garden"}]));
    assert_eq!(mock.calls_to("GetProducts"), 2);
    Ok(())
}

#[tokio::test]
async fn health_reflects_database_reachability() -> anyhow::Result<()> {
    let (app, _) = app_with(MockProcedureExecutor::new());
    let (status, body) = send_json(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (app, _) = app_with(MockProcedureExecutor::new().with_failing_ping("connection refused"));
    let (status, body) = send_json(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["details"].as_str().unwrap().contains("connection refused"));
    Ok(())
}

#[tokio::test]
async fn metrics_and_docs_are_served() -> anyhow::Result<()> {
    let (app, _) = app_with(MockProcedureExecutor::new());
    send(&app, "GET", "/api/alerts/low-stock", None).await?;
    let (status, text) = send(&app, "GET", "/metrics", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("store_catalog_procedure_calls_total"));

    let (status, doc) = send_json(&app, "GET", "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/products/transfer"].is_object());
    Ok(())
}
