pub mod addresses;
pub mod customers;
pub mod line_items;
pub mod products;
pub mod sales;
pub mod suppliers;
