//! Reorder Categories Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{categories::errors::into_status_error, extensions::*, state::State};

/// Reorder Categories Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct ReorderCategoriesRequest {
    /// Category ids in their new display order
    pub ordered_uuids: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReorderedResponse {
    /// Number of rows whose position was written
    pub updated: u64,
}

/// Reorder Categories Handler
///
/// Each category's `order_index` becomes its zero-based position in the list.
#[endpoint(
    tags("categories"),
    summary = "Reorder Categories",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(
    json: JsonBody<ReorderCategoriesRequest>,
    depot: &mut Depot,
) -> Result<Json<ReorderedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let ordered = json
        .into_inner()
        .ordered_uuids
        .into_iter()
        .map(Into::into)
        .collect();

    let updated = state
        .app
        .categories
        .reorder_categories(ordered)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ReorderedResponse { updated }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use vitrine_app::domain::categories::{MockCategoriesService, records::CategoryUuid};

    use crate::test_helpers::categories_service;

    use super::*;

    #[tokio::test]
    async fn forwards_ids_in_request_order() -> TestResult {
        let first = CategoryUuid::new();
        let second = CategoryUuid::new();

        let mut categories = MockCategoriesService::new();

        categories
            .expect_reorder_categories()
            .once()
            .withf(move |ordered| *ordered == vec![second, first])
            .return_once(|_| Ok(2));

        let service = categories_service(
            categories,
            Router::with_path("categories/reorder").post(handler),
        );

        let mut res = TestClient::post("http://example.com/categories/reorder")
            .json(&json!({ "ordered_uuids": [second.into_uuid(), first.into_uuid()] }))
            .send(&service)
            .await;

        let body: ReorderedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.updated, 2);

        Ok(())
    }
}
