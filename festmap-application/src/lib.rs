#[macro_use]
extern crate log;

mod booth_flows;
mod import_booths;
mod locate_booth;
mod patch_booth;

pub mod adapters;
pub mod error;
pub mod feed;
pub mod refresh;

pub mod prelude {
    pub use super::{
        booth_flows::*,
        feed::{BoothFeed, BoothSubscription, Snapshot, Subscription},
        import_booths::*,
        locate_booth::*,
        patch_booth::*,
        refresh::{refresh_once, PollingRefresher},
    };
}

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use festmap_core::{
    entities::{self, *},
    repositories::*,
    usecases,
};

#[cfg(test)]
pub(crate) mod tests;
