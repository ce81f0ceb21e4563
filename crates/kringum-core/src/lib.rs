//! Core types and trait definitions for the Kringum port catalog.
//!
//! No HTTP or database dependencies. Storage backends, upstream adapters,
//! and the API layer all build on the traits in [`store`] and [`upstream`].

pub mod error;
pub mod gps;
pub mod item;
pub mod port;
pub mod setting;
pub mod store;
pub mod upstream;

pub use error::{Error, Result};
pub use gps::GeoPoint;
