//! Domain entities and value objects shared by every layer.

pub mod auth;
pub mod category;
pub mod portfolio_item;
pub mod sub_category;
pub mod types;
