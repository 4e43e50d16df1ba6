pub mod beers;
pub mod common;
pub mod health;
