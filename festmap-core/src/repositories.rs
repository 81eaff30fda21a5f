// Low-level storage access traits.
// A repository only stores and loads entities, all
// validation happens in the use cases before.

use crate::entities::*;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error("Invalid id '{0}'")]
    InvalidId(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

pub trait BoothRepo {
    fn create_booth(&self, booth: Booth) -> Result<()>;
    // Replaces the stored booth, the last write wins
    fn update_booth(&self, booth: &Booth) -> Result<()>;
    fn delete_booth(&self, id: &str) -> Result<()>;

    fn get_booth(&self, id: &str) -> Result<Booth>;
    fn all_booths(&self) -> Result<Vec<Booth>>;

    fn count_booths(&self) -> Result<usize> {
        Ok(self.all_booths()?.len())
    }
}
