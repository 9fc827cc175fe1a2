mod common;

use comercio_api::common::error::AppError;
use comercio_api::config::DeletePolicy;

use common::{product_payload, supplier_payload, test_state, test_state_with_policy};

#[tokio::test]
async fn create_then_find_round_trips() {
    let state = test_state().await;

    let created = state
        .supplier_service
        .create(
            &state.db_pool,
            &supplier_payload("Dell Computadores Ltda", "12.345.678/0001-99"),
        )
        .await
        .unwrap();

    let found = state
        .supplier_service
        .find(&state.db_pool, created.id)
        .await
        .unwrap();
    assert_eq!(found, created);
    assert_eq!(found.tax_id.as_deref(), Some("12.345.678/0001-99"));
    assert!(found.address.is_some());
}

#[tokio::test]
async fn duplicate_tax_id_is_rejected() {
    let state = test_state().await;

    state
        .supplier_service
        .create(&state.db_pool, &supplier_payload("Primeiro", "11.111.111/0001-11"))
        .await
        .unwrap();

    let err = state
        .supplier_service
        .create(&state.db_pool, &supplier_payload("Segundo", "11.111.111/0001-11"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateKey(_)));

    assert_eq!(state.supplier_service.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn find_by_tax_id_matches_exactly() {
    let state = test_state().await;

    state
        .supplier_service
        .create(&state.db_pool, &supplier_payload("Logitech Brasil", "22.222.222/0001-22"))
        .await
        .unwrap();

    let found = state
        .supplier_service
        .find_by_tax_id("22.222.222/0001-22")
        .await
        .unwrap();
    assert_eq!(found.name, "Logitech Brasil");

    let err = state
        .supplier_service
        .find_by_tax_id("99.999.999/0001-99")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn delete_removes_owned_address() {
    let state = test_state().await;

    let created = state
        .supplier_service
        .create(&state.db_pool, &supplier_payload("Com Endereço", "33.333.333/0001-33"))
        .await
        .unwrap();
    let address_id = created.address.expect("endereço criado junto").id;

    state
        .supplier_service
        .delete(&state.db_pool, created.id)
        .await
        .unwrap();

    let err = state
        .address_service
        .find(&state.db_pool, address_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn restrict_policy_rejects_delete_with_products() {
    let state = test_state_with_policy(DeletePolicy::RestrictDependents).await;

    let supplier = state
        .supplier_service
        .create(&state.db_pool, &supplier_payload("Com Produtos", "44.444.444/0001-44"))
        .await
        .unwrap();
    state
        .product_service
        .create(&state.db_pool, &product_payload("Mouse", 10, Some(supplier.id)))
        .await
        .unwrap();

    let err = state
        .supplier_service
        .delete(&state.db_pool, supplier.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ReferentialIntegrityViolation(_)));
}

#[tokio::test]
async fn permissive_delete_with_products_is_blocked_by_storage() {
    let state = test_state().await;

    let supplier = state
        .supplier_service
        .create(&state.db_pool, &supplier_payload("Com Produtos", "55.555.555/0001-55"))
        .await
        .unwrap();
    state
        .product_service
        .create(&state.db_pool, &product_payload("Teclado", 10, Some(supplier.id)))
        .await
        .unwrap();

    let err = state
        .supplier_service
        .delete(&state.db_pool, supplier.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ReferentialIntegrityViolation(_)));
}

mod product_association {
    use super::*;

    #[tokio::test]
    async fn attach_and_detach_product() {
        let state = test_state().await;

        let supplier = state
            .supplier_service
            .create(&state.db_pool, &supplier_payload("Fornecedor", "66.666.666/0001-66"))
            .await
            .unwrap();
        let product = state
            .product_service
            .create(&state.db_pool, &product_payload("Monitor", 3, None))
            .await
            .unwrap();

        let attached = state
            .supplier_service
            .attach_product(&state.db_pool, supplier.id, product.id)
            .await
            .unwrap();
        assert_eq!(attached.supplier_id, Some(supplier.id));

        let of_supplier = state
            .product_service
            .find_by_supplier(supplier.id)
            .await
            .unwrap();
        assert_eq!(of_supplier.len(), 1);

        // A FK do produto é anulável: desvincular é válido.
        let detached = state
            .supplier_service
            .detach_product(&state.db_pool, supplier.id, product.id)
            .await
            .unwrap();
        assert_eq!(detached.supplier_id, None);

        let of_supplier = state
            .product_service
            .find_by_supplier(supplier.id)
            .await
            .unwrap();
        assert!(of_supplier.is_empty());
    }

    #[tokio::test]
    async fn detach_product_of_another_supplier_is_not_found() {
        let state = test_state().await;

        let owner = state
            .supplier_service
            .create(&state.db_pool, &supplier_payload("Dono", "77.777.777/0001-77"))
            .await
            .unwrap();
        let other = state
            .supplier_service
            .create(&state.db_pool, &supplier_payload("Outro", "88.888.888/0001-88"))
            .await
            .unwrap();
        let product = state
            .product_service
            .create(&state.db_pool, &product_payload("Webcam", 2, Some(owner.id)))
            .await
            .unwrap();

        let err = state
            .supplier_service
            .detach_product(&state.db_pool, other.id, product.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
