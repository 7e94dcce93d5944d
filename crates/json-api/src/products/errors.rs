//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use vitrine_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product reference already exists")
        }
        ProductsServiceError::InvalidReference => StatusError::bad_request()
            .brief("Category, subcategory and sub-subcategory must exist and nest"),
        ProductsServiceError::NoFieldsToUpdate => {
            StatusError::bad_request().brief("No fields to update")
        }
        ProductsServiceError::InvalidPrice(_) => {
            StatusError::bad_request().brief("Price or stock out of range")
        }
        ProductsServiceError::MissingRequiredData | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::Sql(source) => {
            error!("product storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
