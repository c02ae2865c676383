//! PostgreSQL repository implementations.
//!
//! Queries are built with SQLx at runtime and mapped through `FromRow` rows.
//!
//! - [`PgShortLinkRepository`] - Short link storage, lookups and counting

pub mod pg_short_link_repository;

pub use pg_short_link_repository::PgShortLinkRepository;
