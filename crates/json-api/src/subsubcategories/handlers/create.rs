//! Create Sub-subcategory Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vitrine_app::domain::categories::{data::NewSubSubcategory, records::SubSubcategoryUuid};

use crate::{
    categories::errors::into_status_error, extensions::*, state::State,
    subsubcategories::SubSubcategoryResponse,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct CreateSubSubcategoryRequest {
    pub subcategory_uuid: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub order_index: i32,
}

impl From<CreateSubSubcategoryRequest> for NewSubSubcategory {
    fn from(request: CreateSubSubcategoryRequest) -> Self {
        NewSubSubcategory {
            uuid: SubSubcategoryUuid::new(),
            subcategory_uuid: request.subcategory_uuid.into(),
            name: request.name,
            slug: request.slug,
            order_index: request.order_index,
        }
    }
}

/// Create Sub-subcategory Handler
#[endpoint(
    tags("subsubcategories"),
    summary = "Create Sub-subcategory",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Sub-subcategory created"),
        (status_code = StatusCode::CONFLICT, description = "Slug already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown subcategory or invalid payload"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateSubSubcategoryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SubSubcategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let subsubcategory = state
        .app
        .categories
        .create_subsubcategory(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(subsubcategory.into()))
}
