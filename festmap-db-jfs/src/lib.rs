#[macro_use]
extern crate log;

use std::{collections::BTreeMap, io, path::Path};

use festmap_core::{
    entities::*,
    repositories::{BoothRepo, Error as RepoError},
};
use parking_lot::RwLock;

mod models;

use models::StoredBooth;

type Result<T> = std::result::Result<T, RepoError>;

/// Booths persisted as one pretty printed JSON file per booth.
pub struct JsonFileStore {
    store: RwLock<jfs::Store>,
}

impl std::fmt::Debug for JsonFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("path", &self.path())
            .finish()
    }
}

impl JsonFileStore {
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let cfg = jfs::Config {
            pretty: true,
            ..Default::default()
        };
        let store = jfs::Store::new_with_cfg(dir, cfg)?;
        info!("Opened booth store at {}", dir.display());
        Ok(Self {
            store: RwLock::new(store),
        })
    }

    pub fn path(&self) -> std::path::PathBuf {
        self.store.read().path().to_path_buf()
    }
}

// Keys become file names inside the store directory
fn checked_key(id: &str) -> Result<&str> {
    let is_valid = !id.is_empty()
        && !id.starts_with('.')
        && !id.contains(['/', '\\', '\0']);
    if is_valid {
        Ok(id)
    } else {
        warn!("Rejecting booth id {id:?}");
        Err(RepoError::InvalidId(id.to_owned()))
    }
}

fn load(store: &jfs::Store, id: &str) -> Result<Booth> {
    let id = checked_key(id)?;
    let stored = store.get::<StoredBooth>(id).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            RepoError::NotFound
        } else {
            RepoError::Io(err)
        }
    })?;
    Ok(Booth::try_from(stored)?)
}

fn exists(store: &jfs::Store, id: &str) -> bool {
    store.get::<StoredBooth>(id).is_ok()
}

impl BoothRepo for JsonFileStore {
    fn create_booth(&self, booth: Booth) -> Result<()> {
        let key = checked_key(booth.id.as_str())?;
        let store = self.store.write();
        if exists(&store, key) {
            return Err(RepoError::AlreadyExists);
        }
        store.save_with_id(&StoredBooth::from(&booth), key)?;
        debug!("Stored new booth {}", booth.id);
        Ok(())
    }

    fn update_booth(&self, booth: &Booth) -> Result<()> {
        let key = checked_key(booth.id.as_str())?;
        let store = self.store.write();
        if !exists(&store, key) {
            return Err(RepoError::NotFound);
        }
        store.save_with_id(&StoredBooth::from(booth), key)?;
        debug!("Stored booth {}", booth.id);
        Ok(())
    }

    fn delete_booth(&self, id: &str) -> Result<()> {
        let id = checked_key(id)?;
        let store = self.store.write();
        if !exists(&store, id) {
            return Err(RepoError::NotFound);
        }
        store.delete(id)?;
        debug!("Deleted booth {id}");
        Ok(())
    }

    fn get_booth(&self, id: &str) -> Result<Booth> {
        load(&self.store.read(), id)
    }

    fn all_booths(&self) -> Result<Vec<Booth>> {
        let all = self.store.read().all::<StoredBooth>()?;
        let mut booths = Vec::with_capacity(all.len());
        for (key, stored) in all {
            match Booth::try_from(stored) {
                Ok(booth) => booths.push(booth),
                Err(err) => warn!("Skipping unreadable booth record {key}: {err}"),
            }
        }
        Ok(booths)
    }
}

/// Volatile booth storage for tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemoryBoothRepo {
    booths: RwLock<BTreeMap<Id, Booth>>,
}

impl InMemoryBoothRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BoothRepo for InMemoryBoothRepo {
    fn create_booth(&self, booth: Booth) -> Result<()> {
        let mut booths = self.booths.write();
        if booths.contains_key(&booth.id) {
            return Err(RepoError::AlreadyExists);
        }
        booths.insert(booth.id.clone(), booth);
        Ok(())
    }

    fn update_booth(&self, booth: &Booth) -> Result<()> {
        let mut booths = self.booths.write();
        let stored = booths.get_mut(&booth.id).ok_or(RepoError::NotFound)?;
        *stored = booth.clone();
        Ok(())
    }

    fn delete_booth(&self, id: &str) -> Result<()> {
        self.booths
            .write()
            .remove(id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }

    fn get_booth(&self, id: &str) -> Result<Booth> {
        self.booths
            .read()
            .get(id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    fn all_booths(&self) -> Result<Vec<Booth>> {
        Ok(self.booths.read().values().cloned().collect())
    }

    fn count_booths(&self) -> Result<usize> {
        Ok(self.booths.read().len())
    }
}
