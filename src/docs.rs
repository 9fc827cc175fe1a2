// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models::address::{Address, AddressPayload};
use crate::models::customer::{Customer, CustomerPayload};
use crate::models::product::{Product, ProductPayload};
use crate::models::sale::{LineItem, LineItemPayload, Sale, SalePayload, StandaloneLineItemPayload};
use crate::models::supplier::{Supplier, SupplierPayload};

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Clientes ---
        handlers::customers::list_customers,
        handlers::customers::get_customer,
        handlers::customers::get_customer_by_tax_id,
        handlers::customers::create_customer,
        handlers::customers::update_customer,
        handlers::customers::delete_customer,

        // --- Fornecedores ---
        handlers::suppliers::list_suppliers,
        handlers::suppliers::get_supplier,
        handlers::suppliers::get_supplier_by_tax_id,
        handlers::suppliers::create_supplier,
        handlers::suppliers::update_supplier,
        handlers::suppliers::delete_supplier,

        // --- Endereços ---
        handlers::addresses::list_addresses,
        handlers::addresses::search_addresses,
        handlers::addresses::get_address,
        handlers::addresses::create_address,
        handlers::addresses::update_address,
        handlers::addresses::delete_address,

        // --- Produtos ---
        handlers::products::list_products,
        handlers::products::search_products,
        handlers::products::get_products_by_supplier,
        handlers::products::get_low_stock_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,

        // --- Vendas ---
        handlers::sales::list_sales,
        handlers::sales::get_sales_by_customer,
        handlers::sales::get_sales_by_period,
        handlers::sales::get_sale,
        handlers::sales::create_sale,
        handlers::sales::update_sale,
        handlers::sales::delete_sale,
        handlers::sales::add_sale_item,
        handlers::sales::remove_sale_item,

        // --- Itens de Venda ---
        handlers::line_items::list_line_items,
        handlers::line_items::get_line_items_by_sale,
        handlers::line_items::get_line_items_by_product,
        handlers::line_items::get_line_item,
        handlers::line_items::create_line_item,
        handlers::line_items::update_line_item,
        handlers::line_items::delete_line_item,
    ),
    components(
        schemas(
            Address,
            AddressPayload,
            Customer,
            CustomerPayload,
            Supplier,
            SupplierPayload,
            Product,
            ProductPayload,
            Sale,
            SalePayload,
            LineItem,
            LineItemPayload,
            StandaloneLineItemPayload,
        )
    ),
    tags(
        (name = "Clientes", description = "Cadastro de clientes e seus endereços"),
        (name = "Fornecedores", description = "Cadastro de fornecedores e seus endereços"),
        (name = "Endereços", description = "Consulta e manutenção avulsa de endereços"),
        (name = "Produtos", description = "Catálogo de produtos e estoque"),
        (name = "Vendas", description = "Vendas e seus itens"),
        (name = "Itens de Venda", description = "Acesso avulso aos itens de venda"),
    )
)]
pub struct ApiDoc;
