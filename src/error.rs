// Copyright 2023 Remi Bernotavicius

//! Error classification for everything that touches the database.
//!
//! Storage-layer failures are sorted into the categories the rest of the program reports on:
//! rejected input, uniqueness conflicts, other constraint failures, missing rows, and plain
//! storage failures.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Input was rejected before any transaction was opened.
    #[error("invalid input: {0}")]
    Validation(String),

    /// A uniqueness constraint rejected the write.
    #[error("already exists: {0}")]
    Conflict(String),

    /// A foreign key or check constraint rejected the write.
    #[error("constraint violated: {0}")]
    ConstraintViolation(String),

    #[error("{entity} not found: {identifier}")]
    NotFound {
        entity: &'static str,
        identifier: String,
    },

    #[error("not logged in")]
    NotLoggedIn,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("storage error: {0}")]
    Storage(#[source] DieselError),

    #[error("failed to connect to database: {0}")]
    Connection(#[from] diesel::ConnectionError),

    #[error("failed to apply migrations: {0}")]
    Migration(String),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(entity: &'static str, identifier: impl ToString) -> Self {
        Self::NotFound {
            entity,
            identifier: identifier.to_string(),
        }
    }

    #[cfg(test)]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

impl From<DieselError> for Error {
    fn from(e: DieselError) -> Self {
        match e {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::Conflict(info.message().into())
            }
            DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::CheckViolation
                | DatabaseErrorKind::NotNullViolation,
                info,
            ) => Self::ConstraintViolation(info.message().into()),
            DieselError::DatabaseError(_, info)
                if info.message().contains("UNIQUE constraint failed") =>
            {
                Self::Conflict(info.message().into())
            }
            DieselError::DatabaseError(_, info) if info.message().contains("constraint failed") => {
                Self::ConstraintViolation(info.message().into())
            }
            other => Self::Storage(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[test]
fn classify_unique_violation() {
    let unique = DieselError::DatabaseError(
        DatabaseErrorKind::UniqueViolation,
        Box::new(String::from("UNIQUE constraint failed: users.username")),
    );
    assert!(Error::from(unique).is_conflict());

    let by_message = DieselError::DatabaseError(
        DatabaseErrorKind::Unknown,
        Box::new(String::from("UNIQUE constraint failed: tags.name")),
    );
    assert!(Error::from(by_message).is_conflict());

    let foreign_key = DieselError::DatabaseError(
        DatabaseErrorKind::ForeignKeyViolation,
        Box::new(String::from("FOREIGN KEY constraint failed")),
    );
    assert!(matches!(
        Error::from(foreign_key),
        Error::ConstraintViolation(_)
    ));

    let check_by_message = DieselError::DatabaseError(
        DatabaseErrorKind::Unknown,
        Box::new(String::from("CHECK constraint failed: rating")),
    );
    assert!(matches!(
        Error::from(check_by_message),
        Error::ConstraintViolation(_)
    ));

    assert!(matches!(
        Error::from(DieselError::NotFound),
        Error::Storage(DieselError::NotFound)
    ));
}
