//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;
use uuid::Uuid;

use vitrine_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{create::technical_specs, errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Update Product Request
///
/// Absent fields are left alone. Nullable fields accept an explicit `null`
/// to clear them.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct UpdateProductRequest {
    pub name: Option<String>,
    pub reference: Option<String>,
    pub category_uuid: Option<Uuid>,
    #[serde(default, deserialize_with = "crate::nullable::deserialize")]
    pub subcategory_uuid: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "crate::nullable::deserialize")]
    pub subsubcategory_uuid: Option<Option<Uuid>>,
    pub description: Option<String>,
    pub price_excl_tax: Option<u64>,
    pub price_incl_tax: Option<u64>,
    pub images: Option<SmallVec<[String; 4]>>,
    pub technical_specs: Option<Value>,
    #[serde(default, deserialize_with = "crate::nullable::deserialize")]
    pub technical_doc_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::nullable::deserialize")]
    pub video_url: Option<Option<String>>,
    pub stock: Option<u32>,
    pub is_available: Option<bool>,
}

impl TryFrom<UpdateProductRequest> for ProductUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateProductRequest) -> Result<Self, Self::Error> {
        let technical_specs = request
            .technical_specs
            .map(|value| technical_specs(Some(value)))
            .transpose()?;

        Ok(ProductUpdate {
            name: request.name,
            reference: request.reference,
            category_uuid: request.category_uuid.map(Into::into),
            subcategory_uuid: request.subcategory_uuid.map(|uuid| uuid.map(Into::into)),
            subsubcategory_uuid: request.subsubcategory_uuid.map(|uuid| uuid.map(Into::into)),
            description: request.description,
            price_excl_tax: request.price_excl_tax,
            price_incl_tax: request.price_incl_tax,
            images: request.images.map(SmallVec::into_vec),
            technical_specs,
            technical_doc_url: request.technical_doc_url,
            video_url: request.video_url,
            stock: request.stock,
            is_available: request.is_available,
        })
    }
}

/// Product Update Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Product reference already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip_all,
    fields(product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = product.into_inner();

    tracing::Span::current().record("product_uuid", tracing::field::display(product));

    let update = ProductUpdate::try_from(json.into_inner())?;

    let updated = state
        .app
        .products
        .update_product(product.into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
