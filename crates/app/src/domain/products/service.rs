//! Products service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        products::{
            data::{NewProduct, ProductUpdate, ProductsFilter},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
        updates::SparseUpdate,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductsFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx, filter).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        i64::try_from(product.price_excl_tax)?;
        i64::try_from(product.price_incl_tax)?;
        i32::try_from(product.stock)?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, &product).await?;

        if !self
            .repository
            .product_chain_is_valid(&mut tx, created.uuid)
            .await?
        {
            return Err(ProductsServiceError::InvalidReference);
        }

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let statement = SparseUpdate::try_from(update)?.build(product.into_uuid(), Timestamp::now())?;

        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_product(&mut tx, statement).await?;

        if !self
            .repository
            .product_chain_is_valid(&mut tx, updated.uuid)
            .await?
        {
            return Err(ProductsServiceError::InvalidReference);
        }

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Products matching `filter`, newest first.
    async fn list_products(
        &self,
        filter: ProductsFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a product. Its subcategory and sub-subcategory, when given,
    /// must sit under its category.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Applies a partial update, re-checking the category chain afterwards.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Deletes a product with the given UUID.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::categories::{CategoriesService, data::DeletePolicy, records::CategoryUuid};
    use crate::test::{
        TestContext,
        helpers::{create_category, create_subcategory, create_subsubcategory, new_product},
    };

    use super::*;

    #[tokio::test]
    async fn create_product_round_trips_all_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let tools = create_category(&ctx, "Tools", "tools", 0).await?;
        let drills = create_subcategory(&ctx, tools.uuid, "Drills", "drills").await?;

        let mut product = new_product(tools.uuid, "DR-100");
        product.subcategory_uuid = Some(drills.uuid);
        product.images = vec!["https://cdn.example/dr-100.jpg".to_owned()];
        product
            .technical_specs
            .insert("voltage".to_owned(), serde_json::json!("18V"));

        let created = ctx.products.create_product(product.clone()).await?;

        assert_eq!(created.uuid, product.uuid);
        assert_eq!(created.subcategory_uuid, Some(drills.uuid));
        assert_eq!(created.images, product.images);
        assert_eq!(created.technical_specs, product.technical_specs);
        assert_eq!(created.price_incl_tax, 1_200);

        let fetched = ctx.products.get_product(product.uuid).await?;

        assert_eq!(fetched, created);

        Ok(())
    }

    #[tokio::test]
    async fn subcategory_from_another_category_is_invalid_reference() -> TestResult {
        let ctx = TestContext::new().await;

        let tools = create_category(&ctx, "Tools", "tools", 0).await?;
        let garden = create_category(&ctx, "Garden", "garden", 1).await?;
        let hoses = create_subcategory(&ctx, garden.uuid, "Hoses", "hoses").await?;

        let mut product = new_product(tools.uuid, "DR-100");
        product.subcategory_uuid = Some(hoses.uuid);

        let result = ctx.products.create_product(product.clone()).await;

        assert!(matches!(result, Err(ProductsServiceError::InvalidReference)));
        assert!(matches!(
            ctx.products.get_product(product.uuid).await,
            Err(ProductsServiceError::NotFound)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn subsubcategory_without_subcategory_is_invalid_reference() -> TestResult {
        let ctx = TestContext::new().await;

        let tools = create_category(&ctx, "Tools", "tools", 0).await?;
        let drills = create_subcategory(&ctx, tools.uuid, "Drills", "drills").await?;
        let cordless = create_subsubcategory(&ctx, drills.uuid, "Cordless", "cordless").await?;

        let mut product = new_product(tools.uuid, "DR-100");
        product.subsubcategory_uuid = Some(cordless.uuid);

        let result = ctx.products.create_product(product).await;

        assert!(matches!(result, Err(ProductsServiceError::InvalidReference)));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_category_is_invalid_reference() -> TestResult {
        let ctx = TestContext::new().await;

        let product = new_product(CategoryUuid::new(), "X-1");

        let result = ctx.products.create_product(product).await;

        assert!(matches!(result, Err(ProductsServiceError::InvalidReference)));

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_reference_is_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        let tools = create_category(&ctx, "Tools", "tools", 0).await?;

        ctx.products
            .create_product(new_product(tools.uuid, "DR-100"))
            .await?;

        let result = ctx
            .products
            .create_product(new_product(tools.uuid, "DR-100"))
            .await;

        assert!(matches!(result, Err(ProductsServiceError::AlreadyExists)));

        Ok(())
    }

    #[tokio::test]
    async fn update_product_applies_sparse_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let tools = create_category(&ctx, "Tools", "tools", 0).await?;

        let mut product = new_product(tools.uuid, "DR-100");
        product.video_url = Some("https://video.example/dr-100".to_owned());

        let created = ctx.products.create_product(product).await?;

        let updated = ctx
            .products
            .update_product(
                created.uuid,
                ProductUpdate {
                    name: Some("X".to_owned()),
                    stock: Some(5),
                    video_url: Some(None),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.name, "X");
        assert_eq!(updated.stock, 5);
        assert_eq!(updated.video_url, None);
        assert_eq!(updated.reference, created.reference);
        assert!(updated.updated_at >= created.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn empty_update_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .update_product(ProductUuid::new(), ProductUpdate::default())
            .await;

        assert!(matches!(result, Err(ProductsServiceError::NoFieldsToUpdate)));

        Ok(())
    }

    #[tokio::test]
    async fn list_products_filters_and_orders_newest_first() -> TestResult {
        let ctx = TestContext::new().await;

        let tools = create_category(&ctx, "Tools", "tools", 0).await?;
        let garden = create_category(&ctx, "Garden", "garden", 1).await?;

        let first = ctx
            .products
            .create_product(new_product(tools.uuid, "T-1"))
            .await?;
        let second = ctx
            .products
            .create_product(new_product(tools.uuid, "T-2"))
            .await?;

        let mut unavailable = new_product(garden.uuid, "G-1");
        unavailable.is_available = false;

        ctx.products.create_product(unavailable).await?;

        let in_tools: Vec<ProductUuid> = ctx
            .products
            .list_products(ProductsFilter {
                category_uuid: Some(tools.uuid),
                ..ProductsFilter::default()
            })
            .await?
            .iter()
            .map(|p| p.uuid)
            .collect();

        assert_eq!(in_tools, vec![second.uuid, first.uuid]);

        let available = ctx
            .products
            .list_products(ProductsFilter {
                is_available: Some(true),
                ..ProductsFilter::default()
            })
            .await?;

        assert_eq!(available.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_then_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let tools = create_category(&ctx, "Tools", "tools", 0).await?;

        let created = ctx
            .products
            .create_product(new_product(tools.uuid, "DR-100"))
            .await?;

        ctx.products.delete_product(created.uuid).await?;

        assert!(matches!(
            ctx.products.delete_product(created.uuid).await,
            Err(ProductsServiceError::NotFound)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn deleting_a_subcategory_clears_product_links() -> TestResult {
        let ctx = TestContext::new().await;

        let tools = create_category(&ctx, "Tools", "tools", 0).await?;
        let drills = create_subcategory(&ctx, tools.uuid, "Drills", "drills").await?;

        let mut product = new_product(tools.uuid, "DR-100");
        product.subcategory_uuid = Some(drills.uuid);

        let created = ctx.products.create_product(product).await?;

        ctx.categories
            .delete_subcategory(drills.uuid, DeletePolicy::Restrict)
            .await?;

        let fetched = ctx.products.get_product(created.uuid).await?;

        assert_eq!(fetched.subcategory_uuid, None);

        Ok(())
    }
}
