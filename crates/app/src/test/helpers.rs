//! Test Helpers

use serde_json::Map;

use crate::{
    domain::{
        categories::{
            CategoriesService, CategoriesServiceError,
            data::{NewCategory, NewSubSubcategory, NewSubcategory},
            records::{
                CategoryRecord, CategoryUuid, SubSubcategoryRecord, SubSubcategoryUuid,
                SubcategoryRecord, SubcategoryUuid,
            },
        },
        products::{data::NewProduct, records::ProductUuid},
    },
    test::TestContext,
};

pub(crate) async fn create_category(
    ctx: &TestContext,
    name: &str,
    slug: &str,
    order_index: i32,
) -> Result<CategoryRecord, CategoriesServiceError> {
    ctx.categories
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            name: name.to_string(),
            slug: slug.to_string(),
            order_index,
        })
        .await
}

pub(crate) async fn create_subcategory(
    ctx: &TestContext,
    category: CategoryUuid,
    name: &str,
    slug: &str,
) -> Result<SubcategoryRecord, CategoriesServiceError> {
    ctx.categories
        .create_subcategory(NewSubcategory {
            uuid: SubcategoryUuid::new(),
            category_uuid: category,
            name: name.to_string(),
            slug: slug.to_string(),
            order_index: 0,
        })
        .await
}

pub(crate) async fn create_subsubcategory(
    ctx: &TestContext,
    subcategory: SubcategoryUuid,
    name: &str,
    slug: &str,
) -> Result<SubSubcategoryRecord, CategoriesServiceError> {
    ctx.categories
        .create_subsubcategory(NewSubSubcategory {
            uuid: SubSubcategoryUuid::new(),
            subcategory_uuid: subcategory,
            name: name.to_string(),
            slug: slug.to_string(),
            order_index: 0,
        })
        .await
}

/// A valid product filed directly under `category`.
pub(crate) fn new_product(category: CategoryUuid, reference: &str) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        name: format!("Product {reference}"),
        reference: reference.to_string(),
        category_uuid: category,
        subcategory_uuid: None,
        subsubcategory_uuid: None,
        description: String::new(),
        price_excl_tax: 1_000,
        price_incl_tax: 1_200,
        images: Vec::new(),
        technical_specs: Map::new(),
        technical_doc_url: None,
        video_url: None,
        stock: 10,
        is_available: true,
    }
}
