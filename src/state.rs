//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::ShortLinkRepository;

/// Link service over a type-erased store, so tests can swap the backend.
pub type SharedLinkService = LinkService<dyn ShortLinkRepository>;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<SharedLinkService>,
}

impl AppState {
    pub fn new(link_service: Arc<SharedLinkService>) -> Self {
        Self { link_service }
    }
}
