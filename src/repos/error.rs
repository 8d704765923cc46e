/*
 * Responsibility
 * - What a repo reports upward
 * - storage faults only: "user not found" is `Ok(None)`, never an error
 */
use thiserror::Error;

use crate::domain::UnknownRole;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),

    #[error("invalid user row: {0}")]
    InvalidRow(#[from] UnknownRole),
}

pub type RepoResult<T> = Result<T, RepoError>;
