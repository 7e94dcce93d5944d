//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use smallvec::SmallVec;
use uuid::Uuid;

use vitrine_app::domain::products::{data::NewProduct, records::ProductUuid};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct CreateProductRequest {
    pub name: String,
    pub reference: String,
    pub category_uuid: Uuid,
    pub subcategory_uuid: Option<Uuid>,
    pub subsubcategory_uuid: Option<Uuid>,
    #[serde(default)]
    pub description: String,
    pub price_excl_tax: u64,
    pub price_incl_tax: u64,
    #[serde(default)]
    pub images: SmallVec<[String; 4]>,

    /// JSON object; defaults to `{}`
    #[serde(default)]
    pub technical_specs: Option<Value>,

    pub technical_doc_url: Option<String>,
    pub video_url: Option<String>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default = "available_by_default")]
    pub is_available: bool,
}

fn available_by_default() -> bool {
    true
}

/// Technical specs must be a JSON object; absent or `null` means empty.
pub(crate) fn technical_specs(value: Option<Value>) -> Result<Map<String, Value>, StatusError> {
    match value {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(StatusError::bad_request().brief("technical_specs must be a JSON object")),
    }
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = StatusError;

    fn try_from(request: CreateProductRequest) -> Result<Self, Self::Error> {
        Ok(NewProduct {
            uuid: ProductUuid::new(),
            technical_specs: technical_specs(request.technical_specs)?,
            name: request.name,
            reference: request.reference,
            category_uuid: request.category_uuid.into(),
            subcategory_uuid: request.subcategory_uuid.map(Into::into),
            subsubcategory_uuid: request.subsubcategory_uuid.map(Into::into),
            description: request.description,
            price_excl_tax: request.price_excl_tax,
            price_incl_tax: request.price_incl_tax,
            images: request.images.into_vec(),
            technical_doc_url: request.technical_doc_url,
            video_url: request.video_url,
            stock: request.stock,
            is_available: request.is_available,
        })
    }
}

/// Create Product Handler
///
/// The category chain is checked in the same transaction as the insert.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product reference already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "products.create", skip_all, err)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let new_product = NewProduct::try_from(json.into_inner())?;

    let product = state
        .app
        .products
        .create_product(new_product)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(product_uuid = %product.uuid, reference = %product.reference, "created product");

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use vitrine_app::domain::products::{MockProductsService, ProductsServiceError};

    use crate::test_helpers::{TEST_CATEGORY_UUID, make_product, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products").post(handler))
    }

    fn drill() -> Value {
        json!({
            "name": "Cordless Drill",
            "reference": "DRL-18V",
            "category_uuid": TEST_CATEGORY_UUID.into_uuid(),
            "price_excl_tax": 10_000,
            "price_incl_tax": 12_000,
            "images": ["https://cdn.example.com/drill.jpg"],
            "technical_specs": { "voltage": "18V" }
        })
    }

    #[tokio::test]
    async fn create_returns_201_with_location() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(|new| {
                new.reference == "DRL-18V"
                    && new.category_uuid == TEST_CATEGORY_UUID
                    && new.is_available
                    && new.stock == 0
                    && new.technical_specs.get("voltage") == Some(&json!("18V"))
            })
            .return_once(|new| Ok(make_product(new.uuid)));

        let mut res = TestClient::post("http://example.com/products")
            .json(&drill())
            .send(&make_service(products))
            .await;

        let body: ProductResponse = res.take_json().await?;
        let location = res
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/products/{}", body.uuid)));

        Ok(())
    }

    #[tokio::test]
    async fn broken_category_chain_returns_400() {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::InvalidReference));

        let res = TestClient::post("http://example.com/products")
            .json(&drill())
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn duplicate_reference_returns_409() {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/products")
            .json(&drill())
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
    }

    #[tokio::test]
    async fn negative_price_returns_400() {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let mut body = drill();

        if let Some(fields) = body.as_object_mut() {
            fields.insert("price_incl_tax".to_owned(), json!(-1));
        }

        let res = TestClient::post("http://example.com/products")
            .json(&body)
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn non_object_specs_return_400() {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let mut body = drill();

        if let Some(fields) = body.as_object_mut() {
            fields.insert("technical_specs".to_owned(), json!(["18V"]));
        }

        let res = TestClient::post("http://example.com/products")
            .json(&body)
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
