//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use serde_json::{Map, Value};
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
    types::Json,
};
use tracing::instrument;

use crate::domain::{
    products::{
        data::{NewProduct, ProductsFilter},
        records::{ProductRecord, ProductUuid},
    },
    updates::{UpdateStatement, execute_update},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const PRODUCT_CHAIN_IS_VALID_SQL: &str = include_str!("sql/product_chain_is_valid.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[instrument(skip(self, tx), err)]
    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: ProductsFilter,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(filter.category_uuid)
            .bind(filter.subcategory_uuid)
            .bind(filter.subsubcategory_uuid)
            .bind(filter.is_available)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product)
            .fetch_one(&mut **tx)
            .await
    }

    #[instrument(skip(self, tx, product), fields(product_uuid = %product.uuid), err)]
    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        let price_excl_tax = i64::try_from(product.price_excl_tax)
            .map_err(|e| column_decode_error("price_excl_tax", e))?;
        let price_incl_tax = i64::try_from(product.price_incl_tax)
            .map_err(|e| column_decode_error("price_incl_tax", e))?;
        let stock = i32::try_from(product.stock).map_err(|e| column_decode_error("stock", e))?;

        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid)
            .bind(&product.name)
            .bind(&product.reference)
            .bind(product.category_uuid)
            .bind(product.subcategory_uuid)
            .bind(product.subsubcategory_uuid)
            .bind(&product.description)
            .bind(price_excl_tax)
            .bind(price_incl_tax)
            .bind(Json(&product.images))
            .bind(Json(&product.technical_specs))
            .bind(&product.technical_doc_url)
            .bind(&product.video_url)
            .bind(stock)
            .bind(product.is_available)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        statement: UpdateStatement,
    ) -> Result<ProductRecord, sqlx::Error> {
        execute_update(tx, statement).await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Whether the product's subcategory and sub-subcategory sit under its
    /// category.
    pub(crate) async fn product_chain_is_valid(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(PRODUCT_CHAIN_IS_VALID_SQL)
            .bind(product)
            .fetch_one(&mut **tx)
            .await
    }
}

fn column_decode_error(
    column: &str,
    error: impl std::error::Error + Send + Sync + 'static,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(error),
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price_excl_tax: i64 = row.try_get("price_excl_tax")?;
        let price_incl_tax: i64 = row.try_get("price_incl_tax")?;
        let stock: i32 = row.try_get("stock")?;

        let Json(images) = row.try_get::<Json<Vec<String>>, _>("images")?;
        let Json(technical_specs) =
            row.try_get::<Json<Map<String, Value>>, _>("technical_specs")?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            reference: row.try_get("reference")?,
            category_uuid: row.try_get("category_uuid")?,
            subcategory_uuid: row.try_get("subcategory_uuid")?,
            subsubcategory_uuid: row.try_get("subsubcategory_uuid")?,
            description: row.try_get("description")?,
            price_excl_tax: u64::try_from(price_excl_tax)
                .map_err(|e| column_decode_error("price_excl_tax", e))?,
            price_incl_tax: u64::try_from(price_incl_tax)
                .map_err(|e| column_decode_error("price_incl_tax", e))?,
            images,
            technical_specs,
            technical_doc_url: row.try_get("technical_doc_url")?,
            video_url: row.try_get("video_url")?,
            stock: u32::try_from(stock).map_err(|e| column_decode_error("stock", e))?,
            is_available: row.try_get("is_available")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
