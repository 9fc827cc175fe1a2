pub mod address_repo;
pub use address_repo::AddressRepository;
pub mod customer_repo;
pub use customer_repo::CustomerRepository;
pub mod supplier_repo;
pub use supplier_repo::SupplierRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod sale_repo;
pub use sale_repo::SaleRepository;
pub mod line_item_repo;
pub use line_item_repo::LineItemRepository;
