pub mod beer;

pub use beer::{Beer, BeerType, NewBeer};
