//! Categories

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;
pub mod tree;

pub use errors::CategoriesServiceError;
pub use service::*;
