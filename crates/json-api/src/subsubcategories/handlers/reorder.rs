//! Reorder Sub-subcategories Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    categories::{errors::into_status_error, reorder::ReorderedResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct ReorderSubSubcategoriesRequest {
    pub subcategory_uuid: Uuid,
    pub ordered_uuids: Vec<Uuid>,
}

/// Reorder Sub-subcategories Handler
#[endpoint(
    tags("subsubcategories"),
    summary = "Reorder Sub-subcategories",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(
    json: JsonBody<ReorderSubSubcategoriesRequest>,
    depot: &mut Depot,
) -> Result<Json<ReorderedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let updated = state
        .app
        .categories
        .reorder_subsubcategories(
            request.subcategory_uuid.into(),
            request.ordered_uuids.into_iter().map(Into::into).collect(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(ReorderedResponse { updated }))
}
