use thiserror::Error;

use crate::schema::Table;

/// Errors returned by catalog operations.
///
/// Every variant aborts the operation that produced it; nothing is written.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Validation error: {table}.{column} is mandatory")]
    Validation { table: Table, column: &'static str },

    #[error("Referential integrity error: {table}.{column} references missing {references} row {id}")]
    ReferentialIntegrity {
        table: Table,
        column: &'static str,
        references: Table,
        id: i32,
    },

    #[error("Not found: {table} row {id}")]
    NotFound { table: Table, id: i32 },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl CatalogError {
    #[must_use]
    pub const fn not_found(table: Table, id: i32) -> Self {
        Self::NotFound { table, id }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}
