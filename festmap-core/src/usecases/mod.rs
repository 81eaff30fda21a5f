mod create_booth;
mod delete_booth;
mod error;
mod filter_booths;
mod update_booth;

#[cfg(test)]
pub mod tests;

pub use self::{
    create_booth::*, delete_booth::*, error::Error, filter_booths::*, update_booth::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{entities::*, repositories::Error as RepoError, repositories::*};
}
use self::prelude::*;

/// All booths, the most recently created first.
pub fn load_booths<R: BoothRepo>(repo: &R) -> Result<Vec<Booth>> {
    let mut booths = repo.all_booths()?;
    booths.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(booths)
}

pub fn get_booth<R: BoothRepo>(repo: &R, id: &str) -> Result<Booth> {
    Ok(repo.get_booth(id)?)
}
