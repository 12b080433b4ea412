//! Navigation root: a catalog of demo screens.
//!
//! Opening an [`Entry`] always builds a new store, so state never leaks
//! from one visit of a screen to the next.

mod error;
mod registry;
mod screen;

pub use error::CatalogError;
pub use registry::{slug, Catalog, Dependencies, Entry, Section};
pub use screen::{Screen, StoreScreen};
