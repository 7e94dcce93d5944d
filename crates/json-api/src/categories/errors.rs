//! Category Errors

use salvo::http::StatusError;
use tracing::error;

use vitrine_app::domain::categories::CategoriesServiceError;

/// Shared by all three levels of the category tree.
pub(crate) fn into_status_error(error: CategoriesServiceError) -> StatusError {
    match error {
        CategoriesServiceError::NotFound => StatusError::not_found().brief("Category not found"),
        CategoriesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Slug already in use")
        }
        CategoriesServiceError::HasDependents => StatusError::conflict()
            .brief("Category still has dependents; retry with cascade=true to remove children"),
        CategoriesServiceError::InvalidReference => {
            StatusError::bad_request()
                .brief("Parent not found, or products still reference the node being moved")
        }
        CategoriesServiceError::NoFieldsToUpdate => {
            StatusError::bad_request().brief("No fields to update")
        }
        CategoriesServiceError::MissingRequiredData | CategoriesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid category payload")
        }
        CategoriesServiceError::Sql(source) => {
            error!("category storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
