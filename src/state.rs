//! Shared application state for all routes.

use crate::config::Settings;
use crate::navigation::{album_routes, RouteTable};
use crate::service::AlbumService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn AlbumService>,
    /// Built once at startup; immutable afterwards.
    pub routes: Arc<RouteTable>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Build state with the album route table wired to `service`.
    pub fn new(service: Arc<dyn AlbumService>, settings: Settings) -> Self {
        let routes = album_routes(service.clone(), &settings.not_found_path);
        AppState {
            service,
            routes: Arc::new(routes),
            settings: Arc::new(settings),
        }
    }
}
