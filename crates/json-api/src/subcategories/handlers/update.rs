//! Update Subcategory Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vitrine_app::domain::categories::data::SubcategoryUpdate;

use crate::{
    categories::errors::into_status_error, extensions::*, state::State,
    subcategories::SubcategoryResponse,
};

/// Update Subcategory Request
///
/// Setting `category_uuid` moves the subcategory and its children.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct UpdateSubcategoryRequest {
    pub category_uuid: Option<Uuid>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub order_index: Option<i32>,
}

impl From<UpdateSubcategoryRequest> for SubcategoryUpdate {
    fn from(request: UpdateSubcategoryRequest) -> Self {
        SubcategoryUpdate {
            category_uuid: request.category_uuid.map(Into::into),
            name: request.name,
            slug: request.slug,
            order_index: request.order_index,
        }
    }
}

/// Update Subcategory Handler
#[endpoint(
    tags("subcategories"),
    summary = "Update Subcategory",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Subcategory updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Subcategory not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    subcategory: PathParam<Uuid>,
    json: JsonBody<UpdateSubcategoryRequest>,
    depot: &mut Depot,
) -> Result<Json<SubcategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let subcategory = state
        .app
        .categories
        .update_subcategory(subcategory.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(subcategory.into()))
}
