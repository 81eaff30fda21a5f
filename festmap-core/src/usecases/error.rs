use crate::{
    repositories,
    util::validate::{AreaInvalidation, BoothInvalidation},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The name is invalid")]
    Name,
    #[error("A booth area needs at least 3 vertices")]
    TooFewVertices,
    #[error("Invalid position")]
    InvalidPosition,
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl From<AreaInvalidation> for Error {
    fn from(err: AreaInvalidation) -> Self {
        match err {
            AreaInvalidation::TooFewVertices => Self::TooFewVertices,
            AreaInvalidation::InvalidPosition => Self::InvalidPosition,
        }
    }
}

impl From<BoothInvalidation> for Error {
    fn from(err: BoothInvalidation) -> Self {
        match err {
            BoothInvalidation::Name => Self::Name,
            BoothInvalidation::Area(err) => err.into(),
        }
    }
}
