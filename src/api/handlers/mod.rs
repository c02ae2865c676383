//! HTTP request handlers for API endpoints.

pub mod health;
pub mod redirect;
pub mod short_links;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use short_links::{
    create_link_handler, delete_link_handler, get_link_handler, link_stats_handler,
    update_link_handler,
};
