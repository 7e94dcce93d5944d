//! Vitrine Domain Concerns

pub mod categories;
pub mod products;
pub mod updates;
