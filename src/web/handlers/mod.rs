//! HTML template rendering handlers.

mod index;
mod stats;

pub use index::index_handler;
pub use stats::stats_page_handler;
