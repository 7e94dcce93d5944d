//! Category Tree
//!
//! Folds the flat rows of a `categories ⟕ subcategories ⟕ subsubcategories`
//! join back into nested branches. Rows arrive already sorted by the query;
//! the fold never re-sorts, it only keeps the first occurrence of each node.

use jiff::Timestamp;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::domain::categories::records::{
    CategoryBranch, CategoryRecord, CategoryUuid, SubSubcategoryRecord, SubSubcategoryUuid,
    SubcategoryBranch, SubcategoryRecord, SubcategoryUuid,
};

/// One row of the three-level left join.
///
/// Subcategory and sub-subcategory columns are null when the left join found
/// no child.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTreeRow {
    pub category_uuid: CategoryUuid,
    pub category_name: String,
    pub category_slug: String,
    pub category_order: i32,
    pub category_created_at: Timestamp,
    pub category_updated_at: Timestamp,
    pub sub_uuid: Option<SubcategoryUuid>,
    pub sub_name: Option<String>,
    pub sub_slug: Option<String>,
    pub sub_order: Option<i32>,
    pub sub_created_at: Option<Timestamp>,
    pub sub_updated_at: Option<Timestamp>,
    pub subsub_uuid: Option<SubSubcategoryUuid>,
    pub subsub_name: Option<String>,
    pub subsub_slug: Option<String>,
    pub subsub_order: Option<i32>,
    pub subsub_created_at: Option<Timestamp>,
    pub subsub_updated_at: Option<Timestamp>,
}

struct RowParts {
    category: CategoryRecord,
    sub_uuid: Option<SubcategoryUuid>,
    subcategory: Option<SubcategoryRecord>,
    subsubcategory: Option<SubSubcategoryRecord>,
}

impl CategoryTreeRow {
    fn into_parts(self) -> RowParts {
        let subcategory = match (
            self.sub_uuid,
            self.sub_name,
            self.sub_slug,
            self.sub_order,
            self.sub_created_at,
            self.sub_updated_at,
        ) {
            (
                Some(uuid),
                Some(name),
                Some(slug),
                Some(order_index),
                Some(created_at),
                Some(updated_at),
            ) => Some(SubcategoryRecord {
                uuid,
                category_uuid: self.category_uuid,
                name,
                slug,
                order_index,
                created_at,
                updated_at,
            }),
            _ => None,
        };

        let subsubcategory = match (
            self.sub_uuid,
            self.subsub_uuid,
            self.subsub_name,
            self.subsub_slug,
            self.subsub_order,
            self.subsub_created_at,
            self.subsub_updated_at,
        ) {
            (
                Some(subcategory_uuid),
                Some(uuid),
                Some(name),
                Some(slug),
                Some(order_index),
                Some(created_at),
                Some(updated_at),
            ) => Some(SubSubcategoryRecord {
                uuid,
                subcategory_uuid,
                name,
                slug,
                order_index,
                created_at,
                updated_at,
            }),
            _ => None,
        };

        RowParts {
            category: CategoryRecord {
                uuid: self.category_uuid,
                name: self.category_name,
                slug: self.category_slug,
                order_index: self.category_order,
                created_at: self.category_created_at,
                updated_at: self.category_updated_at,
            },
            sub_uuid: self.sub_uuid,
            subcategory,
            subsubcategory,
        }
    }
}

#[derive(Debug, Default)]
struct SubcategorySlot {
    position: usize,
    seen: FxHashSet<SubSubcategoryUuid>,
}

#[derive(Debug, Default)]
struct CategorySlot {
    position: usize,
    subcategories: FxHashMap<SubcategoryUuid, SubcategorySlot>,
}

/// Incremental tree builder keyed by node id.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    branches: Vec<CategoryBranch>,
    index: FxHashMap<CategoryUuid, CategorySlot>,
}

impl TreeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one row into the tree.
    pub fn push(&mut self, row: CategoryTreeRow) {
        let Self { branches, index } = self;

        let RowParts {
            category,
            sub_uuid,
            subcategory,
            subsubcategory,
        } = row.into_parts();

        let category_slot = index.entry(category.uuid).or_insert_with(|| {
            branches.push(CategoryBranch::new(category));

            CategorySlot {
                position: branches.len() - 1,
                subcategories: FxHashMap::default(),
            }
        });

        let Some(branch) = branches.get_mut(category_slot.position) else {
            return;
        };

        if let Some(subcategory) = subcategory {
            category_slot
                .subcategories
                .entry(subcategory.uuid)
                .or_insert_with(|| {
                    branch.subcategories.push(SubcategoryBranch::new(subcategory));

                    SubcategorySlot {
                        position: branch.subcategories.len() - 1,
                        seen: FxHashSet::default(),
                    }
                });
        }

        let (Some(sub_uuid), Some(subsubcategory)) = (sub_uuid, subsubcategory) else {
            return;
        };

        // a sub-subcategory whose parent never materialised is dropped
        let Some(sub_slot) = category_slot.subcategories.get_mut(&sub_uuid) else {
            return;
        };

        if !sub_slot.seen.insert(subsubcategory.uuid) {
            return;
        }

        if let Some(sub_branch) = branch.subcategories.get_mut(sub_slot.position) {
            sub_branch.subsubcategories.push(subsubcategory);
        }
    }

    #[must_use]
    pub fn finish(self) -> Vec<CategoryBranch> {
        self.branches
    }
}

/// Rebuild the nested tree from ordered join rows.
pub fn reconcile<I>(rows: I) -> Vec<CategoryBranch>
where
    I: IntoIterator<Item = CategoryTreeRow>,
{
    let mut builder = TreeBuilder::new();

    for row in rows {
        builder.push(row);
    }

    builder.finish()
}

/// Flatten a tree into the rows a left join would produce for it.
#[must_use]
pub fn flatten(tree: &[CategoryBranch]) -> Vec<CategoryTreeRow> {
    let mut rows = Vec::new();

    for branch in tree {
        let category = &branch.category;

        let base = CategoryTreeRow {
            category_uuid: category.uuid,
            category_name: category.name.clone(),
            category_slug: category.slug.clone(),
            category_order: category.order_index,
            category_created_at: category.created_at,
            category_updated_at: category.updated_at,
            sub_uuid: None,
            sub_name: None,
            sub_slug: None,
            sub_order: None,
            sub_created_at: None,
            sub_updated_at: None,
            subsub_uuid: None,
            subsub_name: None,
            subsub_slug: None,
            subsub_order: None,
            subsub_created_at: None,
            subsub_updated_at: None,
        };

        if branch.subcategories.is_empty() {
            rows.push(base);
            continue;
        }

        for sub_branch in &branch.subcategories {
            let subcategory = &sub_branch.subcategory;

            let with_sub = CategoryTreeRow {
                sub_uuid: Some(subcategory.uuid),
                sub_name: Some(subcategory.name.clone()),
                sub_slug: Some(subcategory.slug.clone()),
                sub_order: Some(subcategory.order_index),
                sub_created_at: Some(subcategory.created_at),
                sub_updated_at: Some(subcategory.updated_at),
                ..base.clone()
            };

            if sub_branch.subsubcategories.is_empty() {
                rows.push(with_sub);
                continue;
            }

            for subsubcategory in &sub_branch.subsubcategories {
                rows.push(CategoryTreeRow {
                    subsub_uuid: Some(subsubcategory.uuid),
                    subsub_name: Some(subsubcategory.name.clone()),
                    subsub_slug: Some(subsubcategory.slug.clone()),
                    subsub_order: Some(subsubcategory.order_index),
                    subsub_created_at: Some(subsubcategory.created_at),
                    subsub_updated_at: Some(subsubcategory.updated_at),
                    ..with_sub.clone()
                });
            }
        }
    }

    rows
}
