//! HTTP adapters for the services the port-fill pipeline calls.
//!
//! - [`AnthropicGenerator`] implements
//!   [`Generator`](kringum_core::upstream::Generator) over the Messages API.
//! - [`NominatimGeocoder`] implements
//!   [`Geocoder`](kringum_core::upstream::Geocoder) over the OpenStreetMap
//!   search endpoint, paced by a [`RateLimiter`].

pub mod anthropic;
pub mod error;
pub mod nominatim;
pub mod rate_limit;

pub use anthropic::{AnthropicConfig, AnthropicGenerator};
pub use error::{Result, UpstreamError};
pub use nominatim::{NominatimConfig, NominatimGeocoder};
pub use rate_limit::RateLimiter;
