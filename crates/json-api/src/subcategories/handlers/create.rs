//! Create Subcategory Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vitrine_app::domain::categories::{data::NewSubcategory, records::SubcategoryUuid};

use crate::{
    categories::errors::into_status_error, extensions::*, state::State,
    subcategories::SubcategoryResponse,
};

/// Create Subcategory Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct CreateSubcategoryRequest {
    pub category_uuid: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub order_index: i32,
}

impl From<CreateSubcategoryRequest> for NewSubcategory {
    fn from(request: CreateSubcategoryRequest) -> Self {
        NewSubcategory {
            uuid: SubcategoryUuid::new(),
            category_uuid: request.category_uuid.into(),
            name: request.name,
            slug: request.slug,
            order_index: request.order_index,
        }
    }
}

/// Create Subcategory Handler
#[endpoint(
    tags("subcategories"),
    summary = "Create Subcategory",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Subcategory created"),
        (status_code = StatusCode::CONFLICT, description = "Slug already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown category or invalid payload"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateSubcategoryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SubcategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let subcategory = state
        .app
        .categories
        .create_subcategory(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(subcategory.into()))
}
