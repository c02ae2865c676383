//! Core domain entities.
//!
//! The service has a single entity, [`ShortLink`]. [`NewShortLink`] carries the
//! fields supplied on insert; the store assigns the id, counter and timestamps.

pub mod short_link;

pub use short_link::{NewShortLink, ShortLink};
