//! Sub-subcategories

mod handlers;

pub(crate) use handlers::*;
