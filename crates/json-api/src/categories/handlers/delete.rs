//! Delete Category Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use vitrine_app::domain::categories::data::DeletePolicy;

use crate::{categories::errors::into_status_error, extensions::*, state::State};

/// Map the `cascade` query flag onto a delete policy.
pub(crate) fn delete_policy(cascade: QueryParam<bool, false>) -> DeletePolicy {
    if cascade.into_inner().unwrap_or(false) {
        DeletePolicy::Cascade
    } else {
        DeletePolicy::Restrict
    }
}

/// Delete Category Handler
///
/// Refuses with 409 while subcategories exist unless `cascade=true`.
/// Products filed under the category always block the delete.
#[endpoint(
    tags("categories"),
    summary = "Delete Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Category deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::CONFLICT, description = "Category still has dependents"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    cascade: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let category = category.into_inner();
    let policy = delete_policy(cascade);

    state
        .app
        .categories
        .delete_category(category.into(), policy)
        .await
        .map_err(into_status_error)?;

    tracing::info!(category_uuid = %category, ?policy, "deleted category");

    Ok(StatusCode::OK)
}
