//! Reorder Subcategories Handler

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

/// Reorder Subcategories Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct ReorderSubcategoriesRequest {
    /// Parent category; ids filed under another category are skipped
    pub category_uuid: Uuid,

    pub ordered_uuids: Vec<Uuid>,
}

/// Reorder Subcategories Handler
#[endpoint(
    tags("subcategories"),
    summary = "Reorder Subcategories",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(
    json: JsonBody<ReorderSubcategoriesRequest>,
    depot: &mut Depot,
) -> Result<Json<ReorderedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ReorderSubcategoriesRequest {
        category_uuid,
        ordered_uuids,
    } = json.into_inner();

    let updated = state
        .app
        .categories
        .reorder_subcategories(
            category_uuid.into(),
            ordered_uuids.into_iter().map(Into::into).collect(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(ReorderedResponse { updated }))
}
