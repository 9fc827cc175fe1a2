mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use common::test_state;

// Router completo sobre um banco em memória isolado. O clone compartilha o
// mesmo estado, então cada teste enxerga o que criou nas chamadas anteriores.
async fn test_app() -> Router {
    comercio_api::app(test_state().await)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request inválida")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request inválida")
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .expect("request inválida")
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("corpo ilegível")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("corpo não é JSON")
}

#[tokio::test]
async fn health_check_responds_ok() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_returns_201_with_the_persisted_resource() {
    let app = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/customers",
            json!({
                "name": "João Silva",
                "taxId": "123.456.789-00",
                "address": {"city": "São Paulo", "state": "SP"}
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert!(body["id"].as_i64().is_some());
    assert_eq!(body["name"], "João Silva");
    assert_eq!(body["address"]["country"], "Brasil");
}

#[tokio::test]
async fn missing_id_maps_to_404() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/customers/9999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_tax_id_maps_to_409() {
    let app = test_app().await;

    let payload = json!({"name": "Primeiro", "taxId": "111.111.111-11"});
    let response = app
        .clone()
        .oneshot(post_json("/api/customers", payload.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(post_json("/api/customers", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn validation_failure_maps_to_400_with_details() {
    let app = test_app().await;

    // Sem nome: rejeitado antes de chegar ao banco.
    let response = app
        .oneshot(post_json("/api/customers", json!({"taxId": "222.222.222-22"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["details"]["name"].is_array());
}

#[tokio::test]
async fn delete_returns_204_and_then_404() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/customers",
            json!({"name": "Efêmero", "taxId": "333.333.333-33"}),
        ))
        .await
        .unwrap();
    let body = json_body(response).await;
    let id = body["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(delete(&format!("/api/customers/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(get(&format!("/api/customers/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn low_stock_filter_uses_the_default_threshold() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/products",
            json!({"name": "Quase Esgotado", "stockQuantity": 3}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/products",
            json!({"name": "Abastecido", "stockQuantity": 30}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Sem ?threshold=, vale o padrão 10.
    let response = app.oneshot(get("/api/products/low-stock")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Quase Esgotado");
}

#[tokio::test]
async fn sale_with_unknown_customer_maps_to_400() {
    let app = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/sales",
            json!({"customerId": 9999, "totalAmount": 10.0}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sale_delete_cascades_over_http() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/customers",
            json!({"name": "Comprador", "taxId": "444.444.444-44"}),
        ))
        .await
        .unwrap();
    let customer_id = json_body(response).await["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/products",
            json!({"name": "Vendido", "stockQuantity": 5}),
        ))
        .await
        .unwrap();
    let product_id = json_body(response).await["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/sales",
            json!({
                "customerId": customer_id,
                "totalAmount": 21.0,
                "items": [{"productId": product_id, "quantity": 2, "unitPrice": 10.5}]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    let sale_id = body["id"].as_i64().unwrap();
    assert_eq!(body["items"][0]["subtotal"], json!(21.0));

    let response = app
        .clone()
        .oneshot(delete(&format!("/api/sales/{sale_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(get(&format!("/api/line-items/sale/{sale_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body.as_array().unwrap().is_empty());
}
