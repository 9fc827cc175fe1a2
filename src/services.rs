pub mod address_service;
pub use address_service::AddressService;
pub mod customer_service;
pub use customer_service::CustomerService;
pub mod supplier_service;
pub use supplier_service::SupplierService;
pub mod product_service;
pub use product_service::ProductService;
pub mod sale_service;
pub use sale_service::SaleService;
pub mod line_item_service;
pub use line_item_service::LineItemService;
