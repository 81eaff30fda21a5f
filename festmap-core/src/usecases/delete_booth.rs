use super::prelude::*;

pub fn delete_booth<R: BoothRepo>(repo: &R, id: &str) -> Result<()> {
    log::debug!("Deleting booth: {id}");
    repo.delete_booth(id)?;
    Ok(())
}
