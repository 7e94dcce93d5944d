//! Delete Subcategory Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    categories::{delete::delete_policy, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Delete Subcategory Handler
///
/// Refuses with 409 while sub-subcategories exist unless `cascade=true`.
/// Products filed under the subcategory lose that link.
#[endpoint(
    tags("subcategories"),
    summary = "Delete Subcategory",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Subcategory deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Subcategory not found"),
        (status_code = StatusCode::CONFLICT, description = "Subcategory still has children"),
    ),
)]
pub(crate) async fn handler(
    subcategory: PathParam<Uuid>,
    cascade: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .categories
        .delete_subcategory(subcategory.into_inner().into(), delete_policy(cascade))
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
