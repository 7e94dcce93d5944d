//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vitrine_app::domain::products::data::ProductsFilter;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// Matching products, newest first
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Every supplied filter must match.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    category_uuid: QueryParam<Uuid, false>,
    subcategory_uuid: QueryParam<Uuid, false>,
    subsubcategory_uuid: QueryParam<Uuid, false>,
    is_available: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = ProductsFilter {
        category_uuid: category_uuid.into_inner().map(Into::into),
        subcategory_uuid: subcategory_uuid.into_inner().map(Into::into),
        subsubcategory_uuid: subsubcategory_uuid.into_inner().map(Into::into),
        is_available: is_available.into_inner(),
    };

    let products = state
        .app
        .products
        .list_products(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use vitrine_app::domain::products::{MockProductsService, records::ProductUuid};

    use crate::test_helpers::{TEST_CATEGORY_UUID, make_product, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn unfiltered_index_returns_200() -> TestResult {
        let newest = ProductUuid::new();
        let oldest = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|filter| *filter == ProductsFilter::default())
            .return_once(move |_| Ok(vec![make_product(newest), make_product(oldest)]));

        let mut res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        let body: ProductsResponse = res.take_json().await?;
        let uuids: Vec<Uuid> = body.products.iter().map(|p| p.uuid).collect();

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(uuids, [newest.into_uuid(), oldest.into_uuid()]);

        Ok(())
    }

    #[tokio::test]
    async fn query_parameters_become_filters() {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|filter| {
                *filter
                    == ProductsFilter {
                        category_uuid: Some(TEST_CATEGORY_UUID),
                        is_available: Some(false),
                        ..ProductsFilter::default()
                    }
            })
            .return_once(|_| Ok(Vec::new()));

        let res = TestClient::get(format!(
            "http://example.com/products?category_uuid={TEST_CATEGORY_UUID}&is_available=false"
        ))
        .send(&make_service(products))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn malformed_filter_returns_400() {
        let mut products = MockProductsService::new();

        products.expect_list_products().never();

        let res = TestClient::get("http://example.com/products?subcategory_uuid=drills")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
