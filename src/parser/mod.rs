pub mod catalog;
pub mod price;
pub mod rating;

pub use catalog::{extract, parse_document, BookRecord};
pub use price::parse_price;
