//! Categories service errors.

use std::num::TryFromIntError;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::updates::UpdateError;

#[derive(Debug, Error)]
pub enum CategoriesServiceError {
    #[error("slug already in use")]
    AlreadyExists,

    #[error("category not found")]
    NotFound,

    #[error("parent category not found")]
    InvalidReference,

    #[error("category still has dependents")]
    HasDependents,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("no fields to update")]
    NoFieldsToUpdate,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CategoriesServiceError {
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

impl From<UpdateError> for CategoriesServiceError {
    fn from(error: UpdateError) -> Self {
        match error {
            UpdateError::NoFieldsToUpdate => Self::NoFieldsToUpdate,
        }
    }
}

impl From<TryFromIntError> for CategoriesServiceError {
    fn from(_: TryFromIntError) -> Self {
        Self::InvalidData
    }
}
