//! Repository trait definitions for the domain layer.
//!
//! - [`ShortLinkRepository`] - Short link storage, lookups and counting
//!
//! The PostgreSQL implementation lives in `crate::infrastructure::persistence`.
//! A mock is generated via `mockall` for unit tests.

pub mod short_link_repository;

pub use short_link_repository::ShortLinkRepository;

#[cfg(test)]
pub use short_link_repository::MockShortLinkRepository;
