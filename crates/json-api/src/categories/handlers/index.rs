//! Category Tree Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vitrine_app::domain::categories::records::{
    CategoryBranch, SubSubcategoryRecord, SubcategoryBranch,
};

use crate::{categories::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubSubcategoryNode {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub order_index: i32,
}

impl From<SubSubcategoryRecord> for SubSubcategoryNode {
    fn from(record: SubSubcategoryRecord) -> Self {
        SubSubcategoryNode {
            uuid: record.uuid.into(),
            name: record.name,
            slug: record.slug,
            order_index: record.order_index,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubcategoryNode {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub order_index: i32,
    pub subsubcategories: Vec<SubSubcategoryNode>,
}

impl From<SubcategoryBranch> for SubcategoryNode {
    fn from(branch: SubcategoryBranch) -> Self {
        let SubcategoryBranch {
            subcategory,
            subsubcategories,
        } = branch;

        SubcategoryNode {
            uuid: subcategory.uuid.into(),
            name: subcategory.name,
            slug: subcategory.slug,
            order_index: subcategory.order_index,
            subsubcategories: subsubcategories.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryNode {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub order_index: i32,
    pub subcategories: Vec<SubcategoryNode>,
}

impl From<CategoryBranch> for CategoryNode {
    fn from(branch: CategoryBranch) -> Self {
        let CategoryBranch {
            category,
            subcategories,
        } = branch;

        CategoryNode {
            uuid: category.uuid.into(),
            name: category.name,
            slug: category.slug,
            order_index: category.order_index,
            subcategories: subcategories.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryTreeResponse {
    /// Categories in display order, each with its nested children
    pub categories: Vec<CategoryNode>,
}

/// Category Tree Handler
///
/// Returns every category with its subcategories and sub-subcategories.
#[endpoint(tags("categories"), summary = "Category Tree")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CategoryTreeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let tree = state
        .app
        .categories
        .category_tree()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CategoryTreeResponse {
        categories: tree.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use vitrine_app::domain::categories::{MockCategoriesService, records::CategoryUuid};

    use crate::test_helpers::{
        categories_service, make_category, make_subcategory, make_subsubcategory,
    };

    use super::*;

    fn make_service(categories: MockCategoriesService) -> Service {
        categories_service(categories, Router::with_path("categories").get(handler))
    }

    #[tokio::test]
    async fn tree_keeps_service_order_and_nesting() -> TestResult {
        let tools = CategoryUuid::new();
        let garden = CategoryUuid::new();

        let drills = make_subcategory(tools, "Drills");
        let cordless = make_subsubcategory(drills.uuid, "Cordless");

        let mut tools_branch = CategoryBranch::new(make_category(tools, "Tools", 0));
        let mut drills_branch = SubcategoryBranch::new(drills);

        drills_branch.subsubcategories.push(cordless);
        tools_branch.subcategories.push(drills_branch);

        let tree = vec![
            CategoryBranch::new(make_category(garden, "Garden", 1)),
            tools_branch,
        ];

        let mut categories = MockCategoriesService::new();

        categories
            .expect_category_tree()
            .once()
            .return_once(move || Ok(tree));

        let mut res = TestClient::get("http://example.com/categories")
            .send(&make_service(categories))
            .await;

        let body: CategoryTreeResponse = res.take_json().await?;

        let names: Vec<&str> = body.categories.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(names, ["Garden", "Tools"]);

        let drills = body
            .categories
            .iter()
            .find(|c| c.name == "Tools")
            .and_then(|c| c.subcategories.first());

        assert_eq!(drills.map(|s| s.slug.as_str()), Some("drills"));
        assert_eq!(
            drills
                .and_then(|s| s.subsubcategories.first())
                .map(|ss| ss.name.as_str()),
            Some("Cordless")
        );

        Ok(())
    }

    #[tokio::test]
    async fn empty_catalog_returns_empty_list() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_category_tree()
            .once()
            .return_once(|| Ok(Vec::new()));

        let body: CategoryTreeResponse = TestClient::get("http://example.com/categories")
            .send(&make_service(categories))
            .await
            .take_json()
            .await?;

        assert!(body.categories.is_empty(), "no categories expected");

        Ok(())
    }
}
