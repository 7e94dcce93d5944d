//! Category Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Subcategory UUID
pub type SubcategoryUuid = TypedUuid<SubcategoryRecord>;

/// Sub-subcategory UUID
pub type SubSubcategoryUuid = TypedUuid<SubSubcategoryRecord>;

/// Category Record
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,
    pub name: String,
    pub slug: String,
    pub order_index: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Subcategory Record
#[derive(Debug, Clone, PartialEq)]
pub struct SubcategoryRecord {
    pub uuid: SubcategoryUuid,
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub slug: String,
    pub order_index: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Sub-subcategory Record
#[derive(Debug, Clone, PartialEq)]
pub struct SubSubcategoryRecord {
    pub uuid: SubSubcategoryUuid,
    pub subcategory_uuid: SubcategoryUuid,
    pub name: String,
    pub slug: String,
    pub order_index: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A category with its nested subcategories, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBranch {
    pub category: CategoryRecord,
    pub subcategories: Vec<SubcategoryBranch>,
}

impl CategoryBranch {
    #[must_use]
    pub fn new(category: CategoryRecord) -> Self {
        Self {
            category,
            subcategories: Vec::new(),
        }
    }
}

/// A subcategory with its nested sub-subcategories, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct SubcategoryBranch {
    pub subcategory: SubcategoryRecord,
    pub subsubcategories: Vec<SubSubcategoryRecord>,
}

impl SubcategoryBranch {
    #[must_use]
    pub fn new(subcategory: SubcategoryRecord) -> Self {
        Self {
            subcategory,
            subsubcategories: Vec::new(),
        }
    }
}
