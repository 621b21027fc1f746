pub mod error;
pub mod product;
pub mod record;
pub mod sale;
