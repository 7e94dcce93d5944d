//! Update Sub-subcategory Handler

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

use vitrine_app::domain::categories::data::SubSubcategoryUpdate;

use crate::{
    categories::errors::into_status_error, extensions::*, state::State,
    subsubcategories::SubSubcategoryResponse,
};

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct UpdateSubSubcategoryRequest {
    pub subcategory_uuid: Option<Uuid>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub order_index: Option<i32>,
}

impl From<UpdateSubSubcategoryRequest> for SubSubcategoryUpdate {
    fn from(request: UpdateSubSubcategoryRequest) -> Self {
        SubSubcategoryUpdate {
            subcategory_uuid: request.subcategory_uuid.map(Into::into),
            name: request.name,
            slug: request.slug,
            order_index: request.order_index,
        }
    }
}

/// Update Sub-subcategory Handler
#[endpoint(
    tags("subsubcategories"),
    summary = "Update Sub-subcategory",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(
    subsubcategory: PathParam<Uuid>,
    json: JsonBody<UpdateSubSubcategoryRequest>,
    depot: &mut Depot,
) -> Result<Json<SubSubcategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let subsubcategory = state
        .app
        .categories
        .update_subsubcategory(subsubcategory.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(subsubcategory.into()))
}
