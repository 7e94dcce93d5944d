//! Categories service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        categories::{
            data::{
                CategoryUpdate, DeletePolicy, NewCategory, NewSubSubcategory, NewSubcategory,
                SubSubcategoryUpdate, SubcategoryUpdate,
            },
            errors::CategoriesServiceError,
            records::{
                CategoryBranch, CategoryRecord, CategoryUuid, SubSubcategoryRecord,
                SubSubcategoryUuid, SubcategoryRecord, SubcategoryUuid,
            },
            repository::PgCategoriesRepository,
            tree,
        },
        updates::SparseUpdate,
    },
};

#[derive(Debug, Clone)]
pub struct PgCategoriesService {
    db: Db,
    repository: PgCategoriesRepository,
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCategoriesRepository::new(),
        }
    }
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn category_tree(&self) -> Result<Vec<CategoryBranch>, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows = self.repository.category_tree_rows(&mut tx).await?;

        tx.commit().await?;

        Ok(tree::reconcile(rows))
    }

    async fn get_category(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_category(&mut tx, category).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_category(&mut tx, &category).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_category(
        &self,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let statement = SparseUpdate::from(update).build(category.into_uuid(), Timestamp::now())?;

        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_category(&mut tx, statement).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_category(
        &self,
        category: CategoryUuid,
        policy: DeletePolicy,
    ) -> Result<(), CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let dependents = self.repository.category_dependents(&mut tx, category).await?;

        if dependents.products > 0 {
            return Err(CategoriesServiceError::HasDependents);
        }

        if dependents.children > 0 {
            match policy {
                DeletePolicy::Restrict => return Err(CategoriesServiceError::HasDependents),
                DeletePolicy::Cascade => {
                    self.repository
                        .delete_category_descendants(&mut tx, category)
                        .await?;
                }
            }
        }

        let rows_affected = self.repository.delete_category(&mut tx, category).await?;

        if rows_affected == 0 {
            return Err(CategoriesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn reorder_categories(
        &self,
        ordered: Vec<CategoryUuid>,
    ) -> Result<u64, CategoriesServiceError> {
        let now = Timestamp::now();
        let mut tx = self.db.begin().await?;
        let mut updated = 0;

        for (position, category) in ordered.into_iter().enumerate() {
            updated += self
                .repository
                .reorder_category(&mut tx, category, i32::try_from(position)?, now)
                .await?;
        }

        tx.commit().await?;

        Ok(updated)
    }

    async fn create_subcategory(
        &self,
        subcategory: NewSubcategory,
    ) -> Result<SubcategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_subcategory(&mut tx, &subcategory)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_subcategory(
        &self,
        subcategory: SubcategoryUuid,
        update: SubcategoryUpdate,
    ) -> Result<SubcategoryRecord, CategoriesServiceError> {
        let moves = update.category_uuid.is_some();

        let statement =
            SparseUpdate::from(update).build(subcategory.into_uuid(), Timestamp::now())?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_subcategory(&mut tx, statement)
            .await?;

        if moves
            && self
                .repository
                .products_stranded_by_subcategory(&mut tx, subcategory)
                .await?
                > 0
        {
            return Err(CategoriesServiceError::InvalidReference);
        }

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_subcategory(
        &self,
        subcategory: SubcategoryUuid,
        policy: DeletePolicy,
    ) -> Result<(), CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let children = self
            .repository
            .subcategory_children(&mut tx, subcategory)
            .await?;

        if children > 0 {
            match policy {
                DeletePolicy::Restrict => return Err(CategoriesServiceError::HasDependents),
                DeletePolicy::Cascade => {
                    self.repository
                        .delete_subcategory_descendants(&mut tx, subcategory)
                        .await?;
                }
            }
        }

        let rows_affected = self
            .repository
            .delete_subcategory(&mut tx, subcategory)
            .await?;

        if rows_affected == 0 {
            return Err(CategoriesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn reorder_subcategories(
        &self,
        category: CategoryUuid,
        ordered: Vec<SubcategoryUuid>,
    ) -> Result<u64, CategoriesServiceError> {
        let now = Timestamp::now();
        let mut tx = self.db.begin().await?;
        let mut updated = 0;

        for (position, subcategory) in ordered.into_iter().enumerate() {
            updated += self
                .repository
                .reorder_subcategory(&mut tx, category, subcategory, i32::try_from(position)?, now)
                .await?;
        }

        tx.commit().await?;

        Ok(updated)
    }

    async fn create_subsubcategory(
        &self,
        subsubcategory: NewSubSubcategory,
    ) -> Result<SubSubcategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_subsubcategory(&mut tx, &subsubcategory)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_subsubcategory(
        &self,
        subsubcategory: SubSubcategoryUuid,
        update: SubSubcategoryUpdate,
    ) -> Result<SubSubcategoryRecord, CategoriesServiceError> {
        let moves = update.subcategory_uuid.is_some();

        let statement =
            SparseUpdate::from(update).build(subsubcategory.into_uuid(), Timestamp::now())?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_subsubcategory(&mut tx, statement)
            .await?;

        if moves
            && self
                .repository
                .products_stranded_by_subsubcategory(&mut tx, subsubcategory)
                .await?
                > 0
        {
            return Err(CategoriesServiceError::InvalidReference);
        }

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_subsubcategory(
        &self,
        subsubcategory: SubSubcategoryUuid,
    ) -> Result<(), CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_subsubcategory(&mut tx, subsubcategory)
            .await?;

        if rows_affected == 0 {
            return Err(CategoriesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn reorder_subsubcategories(
        &self,
        subcategory: SubcategoryUuid,
        ordered: Vec<SubSubcategoryUuid>,
    ) -> Result<u64, CategoriesServiceError> {
        let now = Timestamp::now();
        let mut tx = self.db.begin().await?;
        let mut updated = 0;

        for (position, subsubcategory) in ordered.into_iter().enumerate() {
            updated += self
                .repository
                .reorder_subsubcategory(
                    &mut tx,
                    subcategory,
                    subsubcategory,
                    i32::try_from(position)?,
                    now,
                )
                .await?;
        }

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Full category tree in display order.
    async fn category_tree(&self) -> Result<Vec<CategoryBranch>, CategoriesServiceError>;

    /// Retrieve a single category.
    async fn get_category(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Apply a partial update; `updated_at` always refreshes.
    async fn update_category(
        &self,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Delete a category. Products filed under it always block the delete.
    async fn delete_category(
        &self,
        category: CategoryUuid,
        policy: DeletePolicy,
    ) -> Result<(), CategoriesServiceError>;

    /// Set each category's `order_index` to its position in `ordered`.
    ///
    /// Returns the number of rows updated.
    async fn reorder_categories(
        &self,
        ordered: Vec<CategoryUuid>,
    ) -> Result<u64, CategoriesServiceError>;

    async fn create_subcategory(
        &self,
        subcategory: NewSubcategory,
    ) -> Result<SubcategoryRecord, CategoriesServiceError>;

    /// Apply a partial update. Moving a subcategory that products still
    /// file under its old category is rejected.
    async fn update_subcategory(
        &self,
        subcategory: SubcategoryUuid,
        update: SubcategoryUpdate,
    ) -> Result<SubcategoryRecord, CategoriesServiceError>;

    async fn delete_subcategory(
        &self,
        subcategory: SubcategoryUuid,
        policy: DeletePolicy,
    ) -> Result<(), CategoriesServiceError>;

    /// Reorder the subcategories of `category`; ids filed elsewhere are skipped.
    async fn reorder_subcategories(
        &self,
        category: CategoryUuid,
        ordered: Vec<SubcategoryUuid>,
    ) -> Result<u64, CategoriesServiceError>;

    async fn create_subsubcategory(
        &self,
        subsubcategory: NewSubSubcategory,
    ) -> Result<SubSubcategoryRecord, CategoriesServiceError>;

    async fn update_subsubcategory(
        &self,
        subsubcategory: SubSubcategoryUuid,
        update: SubSubcategoryUpdate,
    ) -> Result<SubSubcategoryRecord, CategoriesServiceError>;

    async fn delete_subsubcategory(
        &self,
        subsubcategory: SubSubcategoryUuid,
    ) -> Result<(), CategoriesServiceError>;

    /// Reorder the sub-subcategories of `subcategory`; ids filed elsewhere are skipped.
    async fn reorder_subsubcategories(
        &self,
        subcategory: SubcategoryUuid,
        ordered: Vec<SubSubcategoryUuid>,
    ) -> Result<u64, CategoriesServiceError>;
}
