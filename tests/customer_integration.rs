mod common;

use comercio_api::common::error::AppError;
use comercio_api::config::DeletePolicy;

use common::{customer_payload, sale_payload, test_state, test_state_with_policy};

mod crud {
    use super::*;

    #[tokio::test]
    async fn create_then_find_round_trips() {
        let state = test_state().await;

        let created = state
            .customer_service
            .create(&state.db_pool, &customer_payload("João Silva", "123.456.789-00"))
            .await
            .unwrap();

        let found = state
            .customer_service
            .find(&state.db_pool, created.id)
            .await
            .unwrap();

        assert_eq!(found, created);
        assert_eq!(found.name, "João Silva");
        assert_eq!(found.tax_id.as_deref(), Some("123.456.789-00"));

        // O endereço embutido entra na mesma transação, com o país padrão.
        let address = found.address.expect("endereço embutido deve ser persistido");
        assert_eq!(address.city.as_deref(), Some("São Paulo"));
        assert_eq!(address.country, "Brasil");
    }

    #[tokio::test]
    async fn find_by_tax_id_matches_exactly() {
        let state = test_state().await;

        state
            .customer_service
            .create(&state.db_pool, &customer_payload("Maria", "987.654.321-00"))
            .await
            .unwrap();

        let found = state
            .customer_service
            .find_by_tax_id("987.654.321-00")
            .await
            .unwrap();
        assert_eq!(found.name, "Maria");

        let err = state
            .customer_service
            .find_by_tax_id("000.000.000-00")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn find_missing_id_is_not_found() {
        let state = test_state().await;

        let err = state
            .customer_service
            .find(&state.db_pool, 9999)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn create_without_name_is_rejected_before_storage() {
        let state = test_state().await;

        let mut payload = customer_payload("X", "111.222.333-44");
        payload.name = None;

        let err = state
            .customer_service
            .create(&state.db_pool, &payload)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationFailure(_)));
        assert!(state.customer_service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_missing_id_is_not_found() {
        let state = test_state().await;

        let err = state
            .customer_service
            .delete(&state.db_pool, 42)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}

mod duplicate_tax_id {
    use super::*;

    #[tokio::test]
    async fn second_create_with_same_tax_id_fails() {
        let state = test_state().await;

        state
            .customer_service
            .create(&state.db_pool, &customer_payload("Primeiro", "111.111.111-11"))
            .await
            .unwrap();

        let err = state
            .customer_service
            .create(&state.db_pool, &customer_payload("Segundo", "111.111.111-11"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey(_)));

        // Exatamente um cliente com o CPF depois da falha.
        let all = state.customer_service.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Primeiro");
    }

    #[tokio::test]
    async fn update_cannot_steal_another_customers_tax_id() {
        let state = test_state().await;

        state
            .customer_service
            .create(&state.db_pool, &customer_payload("Dono", "222.222.222-22"))
            .await
            .unwrap();
        let other = state
            .customer_service
            .create(&state.db_pool, &customer_payload("Outro", "333.333.333-33"))
            .await
            .unwrap();

        let err = state
            .customer_service
            .update(
                &state.db_pool,
                other.id,
                &customer_payload("Outro", "222.222.222-22"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey(_)));
    }
}

mod address_ownership {
    use super::*;

    #[tokio::test]
    async fn delete_removes_owned_address() {
        let state = test_state().await;

        let created = state
            .customer_service
            .create(&state.db_pool, &customer_payload("Com Endereço", "444.444.444-44"))
            .await
            .unwrap();
        let address_id = created.address.expect("endereço criado junto").id;

        state
            .customer_service
            .delete(&state.db_pool, created.id)
            .await
            .unwrap();

        let err = state
            .customer_service
            .find(&state.db_pool, created.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        // O endereço possuído caiu na mesma transação.
        let err = state
            .address_service
            .find(&state.db_pool, address_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_without_address_removes_the_orphan() {
        let state = test_state().await;

        let created = state
            .customer_service
            .create(&state.db_pool, &customer_payload("Cliente", "555.555.555-55"))
            .await
            .unwrap();
        let address_id = created.address.expect("endereço criado junto").id;

        let mut payload = customer_payload("Cliente", "555.555.555-55");
        payload.address = None;

        let updated = state
            .customer_service
            .update(&state.db_pool, created.id, &payload)
            .await
            .unwrap();
        assert!(updated.address.is_none());

        let err = state
            .address_service
            .find(&state.db_pool, address_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_with_address_keeps_the_same_row() {
        let state = test_state().await;

        let created = state
            .customer_service
            .create(&state.db_pool, &customer_payload("Cliente", "666.666.666-66"))
            .await
            .unwrap();
        let address_id = created.address.expect("endereço criado junto").id;

        let mut payload = customer_payload("Cliente", "666.666.666-66");
        if let Some(address) = payload.address.as_mut() {
            address.city = Some("Campinas".to_string());
        }

        let updated = state
            .customer_service
            .update(&state.db_pool, created.id, &payload)
            .await
            .unwrap();

        let address = updated.address.expect("endereço mantido");
        assert_eq!(address.id, address_id);
        assert_eq!(address.city.as_deref(), Some("Campinas"));
    }
}

mod delete_policy {
    use super::*;

    #[tokio::test]
    async fn permissive_delete_with_sales_is_blocked_by_storage() {
        let state = test_state().await;

        let customer = state
            .customer_service
            .create(&state.db_pool, &customer_payload("Com Vendas", "777.777.777-77"))
            .await
            .unwrap();
        state
            .sale_service
            .create(&state.db_pool, &sale_payload(customer.id, "10.00", vec![]))
            .await
            .unwrap();

        // Sem pré-checagem no modo permissivo: quem barra é a FK do banco.
        let err = state
            .customer_service
            .delete(&state.db_pool, customer.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ReferentialIntegrityViolation(_)));

        // Nada foi excluído.
        state
            .customer_service
            .find(&state.db_pool, customer.id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn restrict_policy_rejects_delete_with_sales() {
        let state = test_state_with_policy(DeletePolicy::RestrictDependents).await;

        let customer = state
            .customer_service
            .create(&state.db_pool, &customer_payload("Com Vendas", "888.888.888-88"))
            .await
            .unwrap();
        state
            .sale_service
            .create(&state.db_pool, &sale_payload(customer.id, "10.00", vec![]))
            .await
            .unwrap();

        let err = state
            .customer_service
            .delete(&state.db_pool, customer.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ReferentialIntegrityViolation(_)));
    }

    #[tokio::test]
    async fn delete_without_dependents_works_under_both_policies() {
        for policy in [DeletePolicy::Permissive, DeletePolicy::RestrictDependents] {
            let state = test_state_with_policy(policy).await;

            let customer = state
                .customer_service
                .create(&state.db_pool, &customer_payload("Sem Vendas", "999.999.999-99"))
                .await
                .unwrap();

            state
                .customer_service
                .delete(&state.db_pool, customer.id)
                .await
                .unwrap();
        }
    }
}

mod sale_association {
    use super::*;

    #[tokio::test]
    async fn attach_sale_reassigns_the_owning_side() {
        let state = test_state().await;

        let first = state
            .customer_service
            .create(&state.db_pool, &customer_payload("Primeiro", "101.101.101-10"))
            .await
            .unwrap();
        let second = state
            .customer_service
            .create(&state.db_pool, &customer_payload("Segundo", "202.202.202-20"))
            .await
            .unwrap();

        let sale = state
            .sale_service
            .create(&state.db_pool, &sale_payload(first.id, "50.00", vec![]))
            .await
            .unwrap();

        state
            .customer_service
            .attach_sale(&state.db_pool, second.id, sale.id)
            .await
            .unwrap();

        // A referência reversa é recomputada sob demanda, não armazenada.
        let of_first = state
            .sale_service
            .find_by_customer(&state.db_pool, first.id)
            .await
            .unwrap();
        assert!(of_first.is_empty());

        let of_second = state
            .sale_service
            .find_by_customer(&state.db_pool, second.id)
            .await
            .unwrap();
        assert_eq!(of_second.len(), 1);
        assert_eq!(of_second[0].customer_id, second.id);
    }

    #[tokio::test]
    async fn detach_sale_is_always_rejected() {
        let state = test_state().await;

        let customer = state
            .customer_service
            .create(&state.db_pool, &customer_payload("Dono", "303.303.303-30"))
            .await
            .unwrap();
        let sale = state
            .sale_service
            .create(&state.db_pool, &sale_payload(customer.id, "50.00", vec![]))
            .await
            .unwrap();

        // Venda não existe sem cliente.
        let err = state
            .customer_service
            .detach_sale(&state.db_pool, customer.id, sale.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidReference(_)));

        let still_there = state
            .sale_service
            .find(&state.db_pool, sale.id)
            .await
            .unwrap();
        assert_eq!(still_there.customer_id, customer.id);
    }
}
