//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use vitrine_app::domain::products::records::ProductRecord;

use crate::{extensions::*, products::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    pub name: String,

    /// Unique catalogue reference
    pub reference: String,

    pub category_uuid: Uuid,
    pub subcategory_uuid: Option<Uuid>,
    pub subsubcategory_uuid: Option<Uuid>,
    pub description: String,

    /// Price before tax, in minor units
    pub price_excl_tax: u64,

    /// Price after tax, in minor units
    pub price_incl_tax: u64,

    /// Image URLs in display order
    pub images: Vec<String>,

    /// Free-form specification sheet
    pub technical_specs: Value,

    pub technical_doc_url: Option<String>,
    pub video_url: Option<String>,
    pub stock: u32,
    pub is_available: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            name: product.name,
            reference: product.reference,
            category_uuid: product.category_uuid.into(),
            subcategory_uuid: product.subcategory_uuid.map(Into::into),
            subsubcategory_uuid: product.subsubcategory_uuid.map(Into::into),
            description: product.description,
            price_excl_tax: product.price_excl_tax,
            price_incl_tax: product.price_incl_tax,
            images: product.images,
            technical_specs: Value::Object(product.technical_specs),
            technical_doc_url: product.technical_doc_url,
            video_url: product.video_url,
            stock: product.stock,
            is_available: product.is_available,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Get Product Handler
///
/// Returns a product.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
