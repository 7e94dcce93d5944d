//! Products Data

use std::num::TryFromIntError;

use serde_json::{Map, Value};

use crate::domain::{
    categories::records::{CategoryUuid, SubSubcategoryUuid, SubcategoryUuid},
    products::records::ProductUuid,
    updates::{SparseUpdate, UpdateColumn},
};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub reference: String,
    pub category_uuid: CategoryUuid,
    pub subcategory_uuid: Option<SubcategoryUuid>,
    pub subsubcategory_uuid: Option<SubSubcategoryUuid>,
    pub description: String,
    pub price_excl_tax: u64,
    pub price_incl_tax: u64,
    pub images: Vec<String>,
    pub technical_specs: Map<String, Value>,
    pub technical_doc_url: Option<String>,
    pub video_url: Option<String>,
    pub stock: u32,
    pub is_available: bool,
}

/// Product Update Data
///
/// The outer `Option` says whether a field was supplied; for nullable
/// columns the inner `Option` carries an explicit null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub reference: Option<String>,
    pub category_uuid: Option<CategoryUuid>,
    pub subcategory_uuid: Option<Option<SubcategoryUuid>>,
    pub subsubcategory_uuid: Option<Option<SubSubcategoryUuid>>,
    pub description: Option<String>,
    pub price_excl_tax: Option<u64>,
    pub price_incl_tax: Option<u64>,
    pub images: Option<Vec<String>>,
    pub technical_specs: Option<Map<String, Value>>,
    pub technical_doc_url: Option<Option<String>>,
    pub video_url: Option<Option<String>>,
    pub stock: Option<u32>,
    pub is_available: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductColumn {
    Name,
    Reference,
    CategoryUuid,
    SubcategoryUuid,
    SubSubcategoryUuid,
    Description,
    PriceExclTax,
    PriceInclTax,
    Images,
    TechnicalSpecs,
    TechnicalDocUrl,
    VideoUrl,
    Stock,
    IsAvailable,
}

impl UpdateColumn for ProductColumn {
    const TABLE: &'static str = "products";

    fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Reference => "reference",
            Self::CategoryUuid => "category_uuid",
            Self::SubcategoryUuid => "subcategory_uuid",
            Self::SubSubcategoryUuid => "subsubcategory_uuid",
            Self::Description => "description",
            Self::PriceExclTax => "price_excl_tax",
            Self::PriceInclTax => "price_incl_tax",
            Self::Images => "images",
            Self::TechnicalSpecs => "technical_specs",
            Self::TechnicalDocUrl => "technical_doc_url",
            Self::VideoUrl => "video_url",
            Self::Stock => "stock",
            Self::IsAvailable => "is_available",
        }
    }
}

impl TryFrom<ProductUpdate> for SparseUpdate<ProductColumn> {
    type Error = TryFromIntError;

    fn try_from(update: ProductUpdate) -> Result<Self, Self::Error> {
        let price_excl_tax = update.price_excl_tax.map(i64::try_from).transpose()?;
        let price_incl_tax = update.price_incl_tax.map(i64::try_from).transpose()?;
        let stock = update.stock.map(i32::try_from).transpose()?;

        let mut sparse = Self::new();

        sparse
            .set_some(ProductColumn::Name, update.name)
            .set_some(ProductColumn::Reference, update.reference)
            .set_some(ProductColumn::CategoryUuid, update.category_uuid)
            .set_some(ProductColumn::SubcategoryUuid, update.subcategory_uuid)
            .set_some(ProductColumn::SubSubcategoryUuid, update.subsubcategory_uuid)
            .set_some(ProductColumn::Description, update.description)
            .set_some(ProductColumn::PriceExclTax, price_excl_tax)
            .set_some(ProductColumn::PriceInclTax, price_incl_tax)
            .set_some(ProductColumn::Images, update.images.map(Value::from))
            .set_some(
                ProductColumn::TechnicalSpecs,
                update.technical_specs.map(Value::Object),
            )
            .set_some(ProductColumn::TechnicalDocUrl, update.technical_doc_url)
            .set_some(ProductColumn::VideoUrl, update.video_url)
            .set_some(ProductColumn::Stock, stock)
            .set_some(ProductColumn::IsAvailable, update.is_available);

        Ok(sparse)
    }
}

/// Product listing filters. Every supplied filter must match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductsFilter {
    pub category_uuid: Option<CategoryUuid>,
    pub subcategory_uuid: Option<SubcategoryUuid>,
    pub subsubcategory_uuid: Option<SubSubcategoryUuid>,
    pub is_available: Option<bool>,
}

#[cfg(test)]
mod tests {
    use crate::domain::updates::UpdateValue;

    use super::*;

    #[test]
    fn explicit_null_is_an_assignment() {
        let sparse = SparseUpdate::try_from(ProductUpdate {
            video_url: Some(None),
            ..ProductUpdate::default()
        })
        .expect("update should convert");

        assert_eq!(
            sparse.columns().collect::<Vec<_>>(),
            vec![ProductColumn::VideoUrl]
        );

        let statement = sparse
            .build(uuid::Uuid::nil(), jiff::Timestamp::UNIX_EPOCH)
            .expect("update should build");

        assert_eq!(statement.values.first(), Some(&UpdateValue::OptionalText(None)));
    }

    #[test]
    fn price_out_of_range_is_rejected() {
        let result = SparseUpdate::try_from(ProductUpdate {
            price_incl_tax: Some(u64::MAX),
            ..ProductUpdate::default()
        });

        assert!(result.is_err());
    }

    #[test]
    fn name_and_stock_render_like_the_builder_example() {
        let sparse = SparseUpdate::try_from(ProductUpdate {
            name: Some("X".to_owned()),
            stock: Some(5),
            ..ProductUpdate::default()
        })
        .expect("update should convert");

        let statement = sparse
            .build(uuid::Uuid::nil(), jiff::Timestamp::UNIX_EPOCH)
            .expect("update should build");

        assert_eq!(
            statement.clauses,
            vec!["name = $1", "stock = $2", "updated_at = $3"]
        );
    }
}
