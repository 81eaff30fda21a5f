//! Map and editing logic of the festival map, independent of any
//! storage back-end or map widget.

pub mod editor;
pub mod gateways;
pub mod geofence;
pub mod render;
pub mod repositories;
pub mod style;
pub mod throttle;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use festmap_entities::{booth::*, category::*, geo::*, id::*, time::*};
}
