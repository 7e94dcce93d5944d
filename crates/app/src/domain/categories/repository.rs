//! Categories Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use tracing::instrument;

use crate::domain::{
    categories::{
        data::{NewCategory, NewSubSubcategory, NewSubcategory},
        records::{
            CategoryRecord, CategoryUuid, SubSubcategoryRecord, SubSubcategoryUuid,
            SubcategoryRecord, SubcategoryUuid,
        },
        tree::CategoryTreeRow,
    },
    updates::{UpdateStatement, execute_update},
};

const CATEGORY_TREE_SQL: &str = include_str!("sql/category_tree.sql");
const GET_CATEGORY_SQL: &str = include_str!("sql/get_category.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");
const DELETE_CATEGORY_SQL: &str = include_str!("sql/delete_category.sql");
const COUNT_CATEGORY_DEPENDENTS_SQL: &str = include_str!("sql/count_category_dependents.sql");
const REORDER_CATEGORY_SQL: &str = include_str!("sql/reorder_category.sql");
const CREATE_SUBCATEGORY_SQL: &str = include_str!("sql/create_subcategory.sql");
const DELETE_SUBCATEGORY_SQL: &str = include_str!("sql/delete_subcategory.sql");
const DELETE_SUBCATEGORIES_BY_CATEGORY_SQL: &str =
    include_str!("sql/delete_subcategories_by_category.sql");
const COUNT_SUBCATEGORY_DEPENDENTS_SQL: &str =
    include_str!("sql/count_subcategory_dependents.sql");
const COUNT_STRANDED_BY_SUBCATEGORY_SQL: &str =
    include_str!("sql/count_stranded_products_by_subcategory.sql");
const REORDER_SUBCATEGORY_SQL: &str = include_str!("sql/reorder_subcategory.sql");
const CREATE_SUBSUBCATEGORY_SQL: &str = include_str!("sql/create_subsubcategory.sql");
const DELETE_SUBSUBCATEGORY_SQL: &str = include_str!("sql/delete_subsubcategory.sql");
const DELETE_SUBSUBCATEGORIES_BY_SUBCATEGORY_SQL: &str =
    include_str!("sql/delete_subsubcategories_by_subcategory.sql");
const DELETE_SUBSUBCATEGORIES_BY_CATEGORY_SQL: &str =
    include_str!("sql/delete_subsubcategories_by_category.sql");
const COUNT_STRANDED_BY_SUBSUBCATEGORY_SQL: &str =
    include_str!("sql/count_stranded_products_by_subsubcategory.sql");
const REORDER_SUBSUBCATEGORY_SQL: &str = include_str!("sql/reorder_subsubcategory.sql");

/// Rows hanging off a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CategoryDependents {
    pub children: i64,
    pub products: i64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCategoriesRepository;

impl PgCategoriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[instrument(skip_all, err)]
    pub(crate) async fn category_tree_rows(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CategoryTreeRow>, sqlx::Error> {
        query_as::<Postgres, CategoryTreeRow>(CATEGORY_TREE_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(GET_CATEGORY_SQL)
            .bind(category)
            .fetch_one(&mut **tx)
            .await
    }

    #[instrument(skip(self, tx, category), fields(category_uuid = %category.uuid), err)]
    pub(crate) async fn create_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: &NewCategory,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(CREATE_CATEGORY_SQL)
            .bind(category.uuid)
            .bind(&category.name)
            .bind(&category.slug)
            .bind(category.order_index)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        statement: UpdateStatement,
    ) -> Result<CategoryRecord, sqlx::Error> {
        execute_update(tx, statement).await
    }

    pub(crate) async fn category_dependents(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<CategoryDependents, sqlx::Error> {
        let row = query(COUNT_CATEGORY_DEPENDENTS_SQL)
            .bind(category)
            .fetch_one(&mut **tx)
            .await?;

        Ok(CategoryDependents {
            children: row.try_get("children")?,
            products: row.try_get("products")?,
        })
    }

    /// Delete a category's sub-subcategories and subcategories.
    #[instrument(skip(self, tx), err)]
    pub(crate) async fn delete_category_descendants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<u64, sqlx::Error> {
        let leaves = query(DELETE_SUBSUBCATEGORIES_BY_CATEGORY_SQL)
            .bind(category)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        let branches = query(DELETE_SUBCATEGORIES_BY_CATEGORY_SQL)
            .bind(category)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(leaves + branches)
    }

    pub(crate) async fn delete_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CATEGORY_SQL)
            .bind(category)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn reorder_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
        order_index: i32,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REORDER_CATEGORY_SQL)
            .bind(category)
            .bind(order_index)
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    #[instrument(skip(self, tx, subcategory), fields(subcategory_uuid = %subcategory.uuid), err)]
    pub(crate) async fn create_subcategory(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subcategory: &NewSubcategory,
    ) -> Result<SubcategoryRecord, sqlx::Error> {
        query_as::<Postgres, SubcategoryRecord>(CREATE_SUBCATEGORY_SQL)
            .bind(subcategory.uuid)
            .bind(subcategory.category_uuid)
            .bind(&subcategory.name)
            .bind(&subcategory.slug)
            .bind(subcategory.order_index)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_subcategory(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        statement: UpdateStatement,
    ) -> Result<SubcategoryRecord, sqlx::Error> {
        execute_update(tx, statement).await
    }

    /// Products whose category no longer matches the subcategory's.
    pub(crate) async fn products_stranded_by_subcategory(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subcategory: SubcategoryUuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar(COUNT_STRANDED_BY_SUBCATEGORY_SQL)
            .bind(subcategory)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn subcategory_children(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subcategory: SubcategoryUuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar(COUNT_SUBCATEGORY_DEPENDENTS_SQL)
            .bind(subcategory)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_subcategory_descendants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subcategory: SubcategoryUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_SUBSUBCATEGORIES_BY_SUBCATEGORY_SQL)
            .bind(subcategory)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_subcategory(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subcategory: SubcategoryUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_SUBCATEGORY_SQL)
            .bind(subcategory)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn reorder_subcategory(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
        subcategory: SubcategoryUuid,
        order_index: i32,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REORDER_SUBCATEGORY_SQL)
            .bind(subcategory)
            .bind(order_index)
            .bind(SqlxTimestamp::from(now))
            .bind(category)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    #[instrument(
        skip(self, tx, subsubcategory),
        fields(subsubcategory_uuid = %subsubcategory.uuid),
        err
    )]
    pub(crate) async fn create_subsubcategory(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subsubcategory: &NewSubSubcategory,
    ) -> Result<SubSubcategoryRecord, sqlx::Error> {
        query_as::<Postgres, SubSubcategoryRecord>(CREATE_SUBSUBCATEGORY_SQL)
            .bind(subsubcategory.uuid)
            .bind(subsubcategory.subcategory_uuid)
            .bind(&subsubcategory.name)
            .bind(&subsubcategory.slug)
            .bind(subsubcategory.order_index)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_subsubcategory(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        statement: UpdateStatement,
    ) -> Result<SubSubcategoryRecord, sqlx::Error> {
        execute_update(tx, statement).await
    }

    /// Products whose subcategory no longer matches the sub-subcategory's.
    pub(crate) async fn products_stranded_by_subsubcategory(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subsubcategory: SubSubcategoryUuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar(COUNT_STRANDED_BY_SUBSUBCATEGORY_SQL)
            .bind(subsubcategory)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_subsubcategory(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subsubcategory: SubSubcategoryUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_SUBSUBCATEGORY_SQL)
            .bind(subsubcategory)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn reorder_subsubcategory(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subcategory: SubcategoryUuid,
        subsubcategory: SubSubcategoryUuid,
        order_index: i32,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REORDER_SUBSUBCATEGORY_SQL)
            .bind(subsubcategory)
            .bind(order_index)
            .bind(SqlxTimestamp::from(now))
            .bind(subcategory)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn timestamp(row: &PgRow, column: &str) -> sqlx::Result<Timestamp> {
    Ok(row.try_get::<SqlxTimestamp, _>(column)?.to_jiff())
}

fn optional_timestamp(row: &PgRow, column: &str) -> sqlx::Result<Option<Timestamp>> {
    Ok(row
        .try_get::<Option<SqlxTimestamp>, _>(column)?
        .map(SqlxTimestamp::to_jiff))
}

impl<'r> FromRow<'r, PgRow> for CategoryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            order_index: row.try_get("order_index")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for SubcategoryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            category_uuid: row.try_get("category_uuid")?,
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            order_index: row.try_get("order_index")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for SubSubcategoryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            subcategory_uuid: row.try_get("subcategory_uuid")?,
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            order_index: row.try_get("order_index")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CategoryTreeRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            category_uuid: row.try_get("category_uuid")?,
            category_name: row.try_get("category_name")?,
            category_slug: row.try_get("category_slug")?,
            category_order: row.try_get("category_order")?,
            category_created_at: timestamp(row, "category_created_at")?,
            category_updated_at: timestamp(row, "category_updated_at")?,
            sub_uuid: row.try_get("sub_uuid")?,
            sub_name: row.try_get("sub_name")?,
            sub_slug: row.try_get("sub_slug")?,
            sub_order: row.try_get("sub_order")?,
            sub_created_at: optional_timestamp(row, "sub_created_at")?,
            sub_updated_at: optional_timestamp(row, "sub_updated_at")?,
            subsub_uuid: row.try_get("subsub_uuid")?,
            subsub_name: row.try_get("subsub_name")?,
            subsub_slug: row.try_get("subsub_slug")?,
            subsub_order: row.try_get("subsub_order")?,
            subsub_created_at: optional_timestamp(row, "subsub_created_at")?,
            subsub_updated_at: optional_timestamp(row, "subsub_updated_at")?,
        })
    }
}
