//! Subcategories

mod handlers;

pub(crate) use handlers::*;
