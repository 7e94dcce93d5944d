//! Sub-subcategory Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod reorder;
pub(crate) mod update;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vitrine_app::domain::categories::records::SubSubcategoryRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubSubcategoryResponse {
    pub uuid: Uuid,
    pub subcategory_uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub order_index: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<SubSubcategoryRecord> for SubSubcategoryResponse {
    fn from(record: SubSubcategoryRecord) -> Self {
        SubSubcategoryResponse {
            uuid: record.uuid.into(),
            subcategory_uuid: record.subcategory_uuid.into(),
            name: record.name,
            slug: record.slug,
            order_index: record.order_index,
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}
