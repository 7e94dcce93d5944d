//! Delete Sub-subcategory Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{categories::errors::into_status_error, extensions::*, state::State};

/// Delete Sub-subcategory Handler
///
/// Products filed under the sub-subcategory lose that link.
#[endpoint(
    tags("subsubcategories"),
    summary = "Delete Sub-subcategory",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Sub-subcategory deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Sub-subcategory not found"),
    ),
)]
pub(crate) async fn handler(
    subsubcategory: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .categories
        .delete_subsubcategory(subsubcategory.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
