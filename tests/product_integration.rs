mod common;

use comercio_api::common::error::AppError;

use common::{
    customer_payload, dec, line_item_payload, product_payload, sale_payload, supplier_payload,
    test_state,
};

#[tokio::test]
async fn acme_widget_low_stock_scenario() {
    let state = test_state().await;

    let acme = state
        .supplier_service
        .create(&state.db_pool, &supplier_payload("Acme", "11.111.111/0001-11"))
        .await
        .unwrap();

    let widget = state
        .product_service
        .create(&state.db_pool, &product_payload("Widget", 5, Some(acme.id)))
        .await
        .unwrap();

    // Estoque 5 < 10: entra na lista.
    let low = state.product_service.find_low_stock(10).await.unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].id, widget.id);
    assert_eq!(low[0].name, "Widget");

    // Reabastecido para 20: sai da lista.
    let mut restocked = product_payload("Widget", 20, Some(acme.id));
    restocked.price = widget.price;
    state
        .product_service
        .update(&state.db_pool, widget.id, &restocked)
        .await
        .unwrap();

    let low = state.product_service.find_low_stock(10).await.unwrap();
    assert!(low.is_empty());
}

#[tokio::test]
async fn low_stock_comparison_is_strict() {
    let state = test_state().await;

    state
        .product_service
        .create(&state.db_pool, &product_payload("No Limite", 10, None))
        .await
        .unwrap();

    // 10 < 10 é falso: comparação estrita.
    let low = state.product_service.find_low_stock(10).await.unwrap();
    assert!(low.is_empty());
}

#[tokio::test]
async fn name_search_ignores_case() {
    let state = test_state().await;

    state
        .product_service
        .create(&state.db_pool, &product_payload("Notebook Dell", 7, None))
        .await
        .unwrap();
    state
        .product_service
        .create(&state.db_pool, &product_payload("Mouse Logitech", 7, None))
        .await
        .unwrap();

    let found = state.product_service.search_by_name("NOTE").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Notebook Dell");

    let found = state.product_service.search_by_name("dell").await.unwrap();
    assert_eq!(found.len(), 1);

    let found = state.product_service.search_by_name("xyz").await.unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn round_trip_preserves_price() {
    let state = test_state().await;

    let mut payload = product_payload("Teclado Mecânico", 4, None);
    payload.price = Some(dec("350.75"));

    let created = state
        .product_service
        .create(&state.db_pool, &payload)
        .await
        .unwrap();

    let found = state
        .product_service
        .find(&state.db_pool, created.id)
        .await
        .unwrap();
    assert_eq!(found, created);
    assert_eq!(found.price, Some(dec("350.75")));
}

#[tokio::test]
async fn create_with_unknown_supplier_is_rejected() {
    let state = test_state().await;

    let err = state
        .product_service
        .create(&state.db_pool, &product_payload("Órfão", 1, Some(9999)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidReference(_)));
    assert!(state.product_service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_without_stock_quantity_is_rejected() {
    let state = test_state().await;

    let mut payload = product_payload("Sem Estoque", 0, None);
    payload.stock_quantity = None;

    let err = state
        .product_service
        .create(&state.db_pool, &payload)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationFailure(_)));
}

#[tokio::test]
async fn delete_with_line_items_is_blocked() {
    let state = test_state().await;

    let customer = state
        .customer_service
        .create(&state.db_pool, &customer_payload("Comprador", "123.123.123-12"))
        .await
        .unwrap();
    let product = state
        .product_service
        .create(&state.db_pool, &product_payload("Vendido", 9, None))
        .await
        .unwrap();
    state
        .sale_service
        .create(
            &state.db_pool,
            &sale_payload(customer.id, "21.00", vec![line_item_payload(product.id, 2, "10.50")]),
        )
        .await
        .unwrap();

    // O item histórico segura o produto.
    let err = state
        .product_service
        .delete(&state.db_pool, product.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ReferentialIntegrityViolation(_)));

    state
        .product_service
        .find(&state.db_pool, product.id)
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_without_references_works() {
    let state = test_state().await;

    let product = state
        .product_service
        .create(&state.db_pool, &product_payload("Descartável", 1, None))
        .await
        .unwrap();

    state
        .product_service
        .delete(&state.db_pool, product.id)
        .await
        .unwrap();

    let err = state
        .product_service
        .find(&state.db_pool, product.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn stock_is_not_touched_by_sales() {
    let state = test_state().await;

    let customer = state
        .customer_service
        .create(&state.db_pool, &customer_payload("Comprador", "321.321.321-32"))
        .await
        .unwrap();
    let product = state
        .product_service
        .create(&state.db_pool, &product_payload("Contador", 8, None))
        .await
        .unwrap();

    state
        .sale_service
        .create(
            &state.db_pool,
            &sale_payload(customer.id, "31.50", vec![line_item_payload(product.id, 3, "10.50")]),
        )
        .await
        .unwrap();

    // O estoque é um contador simples: a venda não o decrementa.
    let after = state
        .product_service
        .find(&state.db_pool, product.id)
        .await
        .unwrap();
    assert_eq!(after.stock_quantity, 8);
}
