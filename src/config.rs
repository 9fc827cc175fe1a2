// src/config.rs

use std::{env, str::FromStr, time::Duration};

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::db::{
    AddressRepository, CustomerRepository, LineItemRepository, ProductRepository, SaleRepository,
    SupplierRepository,
};
use crate::services::{
    AddressService, CustomerService, LineItemService, ProductService, SaleService,
    SupplierService,
};

/// Política para exclusão de donos (cliente/fornecedor) que ainda têm
/// registros dependentes (vendas/produtos).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// Não pré-checa dependentes: quem decide é a FK do próprio banco, e a
    /// falha é devolvida como violação de integridade referencial.
    #[default]
    Permissive,

    /// Pré-checa dependentes e rejeita a exclusão antes de tocar no banco.
    RestrictDependents,
}

impl DeletePolicy {
    fn from_env() -> Self {
        match env::var("DELETE_POLICY").ok().as_deref() {
            Some("restrict") => DeletePolicy::RestrictDependents,
            _ => DeletePolicy::Permissive,
        }
    }
}

// O estado compartilhado que será acessível em toda a aplicação.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub delete_policy: DeletePolicy,
    pub address_service: AddressService,
    pub customer_service: CustomerService,
    pub supplier_service: SupplierService,
    pub product_service: ProductService,
    pub sale_service: SaleService,
    pub line_item_service: LineItemService,
}

impl AppState {
    // Carrega as configurações do ambiente e cria o AppState.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:comercio.db".to_string());

        // FKs ligadas por conexão: é o banco quem garante a integridade
        // referencial que o modelo devolve como erro de domínio.
        let options = SqliteConnectOptions::from_str(&database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let db_pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::with_pool(db_pool, DeletePolicy::from_env()))
    }

    /// Monta o gráfico de dependências sobre uma pool já construída.
    /// Os testes usam isto para ter um estado isolado por caso.
    pub fn with_pool(db_pool: SqlitePool, delete_policy: DeletePolicy) -> Self {
        let address_repo = AddressRepository::new(db_pool.clone());
        let customer_repo = CustomerRepository::new(db_pool.clone());
        let supplier_repo = SupplierRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let sale_repo = SaleRepository::new(db_pool.clone());
        let line_item_repo = LineItemRepository::new(db_pool.clone());

        let address_service = AddressService::new(address_repo.clone());
        let customer_service = CustomerService::new(
            customer_repo.clone(),
            address_repo.clone(),
            sale_repo.clone(),
            delete_policy,
        );
        let supplier_service = SupplierService::new(
            supplier_repo.clone(),
            address_repo.clone(),
            product_repo.clone(),
            delete_policy,
        );
        let product_service = ProductService::new(product_repo.clone(), supplier_repo.clone());
        let sale_service = SaleService::new(
            sale_repo.clone(),
            line_item_repo.clone(),
            customer_repo.clone(),
            product_repo.clone(),
        );
        let line_item_service =
            LineItemService::new(line_item_repo, sale_repo, product_repo);

        Self {
            db_pool,
            delete_policy,
            address_service,
            customer_service,
            supplier_service,
            product_service,
            sale_service,
            line_item_service,
        }
    }
}
