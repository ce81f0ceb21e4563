//! The port-fill pipeline.
//!
//! Asks a [`Generator`](kringum_core::upstream::Generator) for a batch of
//! points of interest around a port, pulls a JSON array out of the free-form
//! reply, resolves each entry to a location (geocoding its address where
//! possible), and stores the batch as items owned by the port.
//!
//! ```rust,ignore
//! let filler = PortFiller::new(store, generator, geocoder, FillOptions::default());
//! let inserted = filler.fill(port_id).await?;
//! ```

pub mod candidate;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod resolve;

pub use error::FillError;
pub use pipeline::{FillOptions, PortFiller};

#[cfg(test)]
mod fakes;
#[cfg(test)]
mod tests;
