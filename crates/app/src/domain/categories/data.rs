//! Category Data

use crate::domain::{
    categories::records::{CategoryUuid, SubSubcategoryUuid, SubcategoryUuid},
    updates::{SparseUpdate, UpdateColumn},
};

/// New Category Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub name: String,
    pub slug: String,
    pub order_index: i32,
}

/// Category Update Data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub order_index: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryColumn {
    Name,
    Slug,
    OrderIndex,
}

impl UpdateColumn for CategoryColumn {
    const TABLE: &'static str = "categories";

    fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Slug => "slug",
            Self::OrderIndex => "order_index",
        }
    }
}

impl From<CategoryUpdate> for SparseUpdate<CategoryColumn> {
    fn from(update: CategoryUpdate) -> Self {
        let mut sparse = Self::new();

        sparse
            .set_some(CategoryColumn::Name, update.name)
            .set_some(CategoryColumn::Slug, update.slug)
            .set_some(CategoryColumn::OrderIndex, update.order_index);

        sparse
    }
}

/// New Subcategory Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubcategory {
    pub uuid: SubcategoryUuid,
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub slug: String,
    pub order_index: i32,
}

/// Subcategory Update Data
///
/// Setting `category_uuid` moves the subcategory, together with its
/// sub-subcategories, under another category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubcategoryUpdate {
    pub category_uuid: Option<CategoryUuid>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub order_index: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubcategoryColumn {
    CategoryUuid,
    Name,
    Slug,
    OrderIndex,
}

impl UpdateColumn for SubcategoryColumn {
    const TABLE: &'static str = "subcategories";

    fn name(self) -> &'static str {
        match self {
            Self::CategoryUuid => "category_uuid",
            Self::Name => "name",
            Self::Slug => "slug",
            Self::OrderIndex => "order_index",
        }
    }
}

impl From<SubcategoryUpdate> for SparseUpdate<SubcategoryColumn> {
    fn from(update: SubcategoryUpdate) -> Self {
        let mut sparse = Self::new();

        sparse
            .set_some(SubcategoryColumn::CategoryUuid, update.category_uuid)
            .set_some(SubcategoryColumn::Name, update.name)
            .set_some(SubcategoryColumn::Slug, update.slug)
            .set_some(SubcategoryColumn::OrderIndex, update.order_index);

        sparse
    }
}

/// New Sub-subcategory Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubSubcategory {
    pub uuid: SubSubcategoryUuid,
    pub subcategory_uuid: SubcategoryUuid,
    pub name: String,
    pub slug: String,
    pub order_index: i32,
}

/// Sub-subcategory Update Data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubSubcategoryUpdate {
    pub subcategory_uuid: Option<SubcategoryUuid>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub order_index: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubSubcategoryColumn {
    SubcategoryUuid,
    Name,
    Slug,
    OrderIndex,
}

impl UpdateColumn for SubSubcategoryColumn {
    const TABLE: &'static str = "subsubcategories";

    fn name(self) -> &'static str {
        match self {
            Self::SubcategoryUuid => "subcategory_uuid",
            Self::Name => "name",
            Self::Slug => "slug",
            Self::OrderIndex => "order_index",
        }
    }
}

impl From<SubSubcategoryUpdate> for SparseUpdate<SubSubcategoryColumn> {
    fn from(update: SubSubcategoryUpdate) -> Self {
        let mut sparse = Self::new();

        sparse
            .set_some(SubSubcategoryColumn::SubcategoryUuid, update.subcategory_uuid)
            .set_some(SubSubcategoryColumn::Name, update.name)
            .set_some(SubSubcategoryColumn::Slug, update.slug)
            .set_some(SubSubcategoryColumn::OrderIndex, update.order_index);

        sparse
    }
}

/// What to do with children when deleting a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Refuse to delete a node that still has children.
    #[default]
    Restrict,

    /// Delete the node's descendants first.
    Cascade,
}
