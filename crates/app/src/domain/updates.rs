//! Sparse Updates
//!
//! Turns a typed partial update into the assignment list of a parameterised
//! `UPDATE` statement. Column names only ever come from the [`UpdateColumn`]
//! implementations of each entity, so nothing supplied by a caller is ever
//! spliced into SQL text.

use std::fmt::Debug;

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use smallvec::SmallVec;
use sqlx::{
    FromRow, Postgres, Transaction,
    postgres::{PgArguments, PgRow},
    query::QueryAs,
    query_as,
    types::Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::uuids::TypedUuid;

/// Column refreshed by every update.
pub const UPDATED_AT_COLUMN: &str = "updated_at";

/// Primary key column used by the lookup predicate.
pub const PRIMARY_KEY_COLUMN: &str = "uuid";

/// Allow-list of updatable columns for one table.
pub trait UpdateColumn: Copy + Eq + Debug {
    /// Table the columns belong to.
    const TABLE: &'static str;

    /// SQL name of the column.
    fn name(self) -> &'static str;
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UpdateError {
    #[error("no fields to update")]
    NoFieldsToUpdate,
}

/// A value bound to one assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateValue {
    Text(String),
    OptionalText(Option<String>),
    Integer(i32),
    BigInt(i64),
    Bool(bool),
    Json(serde_json::Value),
    Uuid(Uuid),
    OptionalUuid(Option<Uuid>),
    Timestamp(Timestamp),
}

impl From<String> for UpdateValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for UpdateValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Option<String>> for UpdateValue {
    fn from(value: Option<String>) -> Self {
        Self::OptionalText(value)
    }
}

impl From<i32> for UpdateValue {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<i64> for UpdateValue {
    fn from(value: i64) -> Self {
        Self::BigInt(value)
    }
}

impl From<bool> for UpdateValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<serde_json::Value> for UpdateValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<Uuid> for UpdateValue {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl<T> From<TypedUuid<T>> for UpdateValue {
    fn from(value: TypedUuid<T>) -> Self {
        Self::Uuid(value.into_uuid())
    }
}

impl<T> From<Option<TypedUuid<T>>> for UpdateValue {
    fn from(value: Option<TypedUuid<T>>) -> Self {
        Self::OptionalUuid(value.map(TypedUuid::into_uuid))
    }
}

impl From<Timestamp> for UpdateValue {
    fn from(value: Timestamp) -> Self {
        Self::Timestamp(value)
    }
}

/// Assignments collected for a partial update of one row.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseUpdate<C: UpdateColumn> {
    assignments: SmallVec<[(C, UpdateValue); 8]>,
}

impl<C: UpdateColumn> Default for SparseUpdate<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: UpdateColumn> SparseUpdate<C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            assignments: SmallVec::new(),
        }
    }

    /// Assign `value` to `column`, replacing any earlier assignment to it.
    pub fn set(&mut self, column: C, value: impl Into<UpdateValue>) -> &mut Self {
        let value = value.into();

        match self
            .assignments
            .iter_mut()
            .find(|(existing, _)| *existing == column)
        {
            Some((_, slot)) => *slot = value,
            None => self.assignments.push((column, value)),
        }

        self
    }

    /// Assign `value` to `column` only when it was supplied.
    pub fn set_some<V: Into<UpdateValue>>(&mut self, column: C, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.set(column, value);
        }

        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Columns assigned so far, in assignment order.
    pub fn columns(&self) -> impl Iterator<Item = C> + '_ {
        self.assignments.iter().map(|(column, _)| *column)
    }

    /// Render the statement for the row identified by `id`.
    ///
    /// `updated_at` is always appended as the last assignment and `id` is the
    /// last bound value.
    ///
    /// # Errors
    ///
    /// Returns [`UpdateError::NoFieldsToUpdate`] when nothing was assigned.
    pub fn build(self, id: Uuid, now: Timestamp) -> Result<UpdateStatement, UpdateError> {
        if self.assignments.is_empty() {
            return Err(UpdateError::NoFieldsToUpdate);
        }

        let mut clauses = Vec::with_capacity(self.assignments.len() + 1);
        let mut values = Vec::with_capacity(self.assignments.len() + 2);

        for (column, value) in self.assignments {
            values.push(value);
            clauses.push(format!("{} = ${}", column.name(), values.len()));
        }

        values.push(UpdateValue::Timestamp(now));
        clauses.push(format!("{UPDATED_AT_COLUMN} = ${}", values.len()));

        values.push(UpdateValue::Uuid(id));

        let sql = format!(
            "UPDATE {} SET {} WHERE {PRIMARY_KEY_COLUMN} = ${} RETURNING *",
            C::TABLE,
            clauses.join(", "),
            values.len()
        );

        Ok(UpdateStatement {
            clauses,
            values,
            sql,
        })
    }
}

/// A rendered partial update.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    /// `column = $n` assignments, `updated_at` last.
    pub clauses: Vec<String>,

    /// Bound values aligned with `clauses`, followed by the row id.
    pub values: Vec<UpdateValue>,

    /// Full statement text.
    pub sql: String,
}

/// Bind update values onto a query in order.
pub(crate) fn bind_update_values<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    values: Vec<UpdateValue>,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for value in values {
        query = match value {
            UpdateValue::Text(value) => query.bind(value),
            UpdateValue::OptionalText(value) => query.bind(value),
            UpdateValue::Integer(value) => query.bind(value),
            UpdateValue::BigInt(value) => query.bind(value),
            UpdateValue::Bool(value) => query.bind(value),
            UpdateValue::Json(value) => query.bind(Json(value)),
            UpdateValue::Uuid(value) => query.bind(value),
            UpdateValue::OptionalUuid(value) => query.bind(value),
            UpdateValue::Timestamp(value) => query.bind(SqlxTimestamp::from(value)),
        };
    }

    query
}

/// Run a rendered update and decode the returned row.
///
/// A missing row surfaces as [`sqlx::Error::RowNotFound`].
pub(crate) async fn execute_update<R>(
    tx: &mut Transaction<'_, Postgres>,
    statement: UpdateStatement,
) -> Result<R, sqlx::Error>
where
    R: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let UpdateStatement { sql, values, .. } = statement;

    bind_update_values(query_as::<Postgres, R>(&sql), values)
        .fetch_one(&mut **tx)
        .await
}
