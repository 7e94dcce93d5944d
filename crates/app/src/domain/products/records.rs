//! Product Records

use jiff::Timestamp;
use serde_json::{Map, Value};

use crate::{
    domain::categories::records::{CategoryUuid, SubSubcategoryUuid, SubcategoryUuid},
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
///
/// Prices are integer minor units.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub reference: String,
    pub category_uuid: CategoryUuid,
    pub subcategory_uuid: Option<SubcategoryUuid>,
    pub subsubcategory_uuid: Option<SubSubcategoryUuid>,
    pub description: String,
    pub price_excl_tax: u64,
    pub price_incl_tax: u64,
    pub images: Vec<String>,
    pub technical_specs: Map<String, Value>,
    pub technical_doc_url: Option<String>,
    pub video_url: Option<String>,
    pub stock: u32,
    pub is_available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
