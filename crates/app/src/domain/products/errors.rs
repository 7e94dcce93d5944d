//! Products service errors.

use std::num::TryFromIntError;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::updates::UpdateError;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product reference already exists")]
    AlreadyExists,

    #[error("product not found")]
    NotFound,

    #[error("related category not found or not in the product's category")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("no fields to update")]
    NoFieldsToUpdate,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("invalid price or stock value")]
    InvalidPrice(#[from] TryFromIntError),
}

impl From<Error> for ProductsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<UpdateError> for ProductsServiceError {
    fn from(error: UpdateError) -> Self {
        match error {
            UpdateError::NoFieldsToUpdate => Self::NoFieldsToUpdate,
        }
    }
}
