use super::prelude::*;
use std::cell::{Cell, RefCell};

type RepoResult<T> = std::result::Result<T, RepoError>;

/// In-memory repository that counts every call it receives.
#[derive(Default)]
pub struct MockDb {
    pub booths: RefCell<Vec<Booth>>,
    pub calls: Cell<usize>,
}

impl MockDb {
    fn count_call(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

impl BoothRepo for MockDb {
    fn create_booth(&self, booth: Booth) -> RepoResult<()> {
        self.count_call();
        let mut booths = self.booths.borrow_mut();
        if booths.iter().any(|b| b.id == booth.id) {
            return Err(RepoError::AlreadyExists);
        }
        booths.push(booth);
        Ok(())
    }

    fn update_booth(&self, booth: &Booth) -> RepoResult<()> {
        self.count_call();
        let mut booths = self.booths.borrow_mut();
        let slot = booths
            .iter_mut()
            .find(|b| b.id == booth.id)
            .ok_or(RepoError::NotFound)?;
        *slot = booth.clone();
        Ok(())
    }

    fn delete_booth(&self, id: &str) -> RepoResult<()> {
        self.count_call();
        let mut booths = self.booths.borrow_mut();
        let pos = booths
            .iter()
            .position(|b| b.id.as_str() == id)
            .ok_or(RepoError::NotFound)?;
        booths.remove(pos);
        Ok(())
    }

    fn get_booth(&self, id: &str) -> RepoResult<Booth> {
        self.count_call();
        self.booths
            .borrow()
            .iter()
            .find(|b| b.id.as_str() == id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    fn all_booths(&self) -> RepoResult<Vec<Booth>> {
        self.count_call();
        Ok(self.booths.borrow().clone())
    }
}
