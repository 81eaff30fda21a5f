use festmap_core::{repositories::Error as RepoError, usecases::Error as ParameterError};
use std::io;
use thiserror::Error;

pub use festmap_core::repositories;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> AppError {
        AppError::Business(BError::Repo(err))
    }
}

impl From<ParameterError> for AppError {
    fn from(err: ParameterError) -> AppError {
        AppError::Business(err.into())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] BError),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AppError {
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Business(BError::Repo(RepoError::NotFound)))
    }
}

#[derive(Debug, Error)]
pub enum BError {
    #[error(transparent)]
    Parameter(ParameterError),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl From<ParameterError> for BError {
    fn from(err: ParameterError) -> Self {
        match err {
            // Storage errors are no parameter errors
            ParameterError::Repo(err) => Self::Repo(err),
            err => Self::Parameter(err),
        }
    }
}
