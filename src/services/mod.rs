// Stock management
pub mod beer_stock;

pub use beer_stock::BeerStockService;
