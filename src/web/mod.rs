//! Browser pages for creating links and looking up their counters.
//!
//! Pages are rendered with Askama and talk to the JSON API from the browser.
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Page route configuration

pub mod handlers;
pub mod routes;
