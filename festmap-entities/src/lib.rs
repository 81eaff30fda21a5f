#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

//! # festmap-entities
//!
//! Reusable, agnostic domain entities for the festival map.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod booth;
pub mod category;
pub mod geo;
pub mod id;
pub mod time;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
