//! Router assembly.

mod album;
mod common;

pub use album::{album_api_routes, album_view_routes};
pub use common::common_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Full application router: common routes, album view routes, album REST resource.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(album_view_routes(&state))
        .merge(album_api_routes(state))
        .layer(TraceLayer::new_for_http())
}
