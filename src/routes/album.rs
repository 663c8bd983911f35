//! Album routes: the view routes mounted from the route table, and the REST resource.

use crate::extractors::Principal;
use crate::handlers::album::{
    count, create, delete as delete_handler, list, read, search, update, ALBUM_API_PATH, ALBUM_SEARCH_PATH,
};
use crate::handlers::view::activate;
use crate::state::AppState;
use axum::{
    extract::{Path, Query},
    routing::get,
    Router,
};
use std::collections::HashMap;
use tower_http::limit::RequestBodyLimitLayer;

/// One GET route per route table entry, in table order.
pub fn album_view_routes(state: &AppState) -> Router {
    let table = &state.routes;
    let mut router = Router::new();
    for route in &table.routes {
        let path = route.mount_path(&table.prefix);
        tracing::debug!(path = %path, component = route.component.as_str(), "mounting view route");
        let route = route.clone();
        router = router.route(
            &path,
            get(
                move |params: Option<Path<HashMap<String, String>>>,
                      Query(query): Query<HashMap<String, String>>,
                      principal: Principal| {
                    let route = route.clone();
                    async move {
                        let params = params.map(|Path(p)| p).unwrap_or_default();
                        activate(route, params, query, principal).await
                    }
                },
            ),
        );
    }
    router
}

pub fn album_api_routes(state: AppState) -> Router {
    let body_limit = state.settings.max_body_bytes;
    Router::new()
        .route(ALBUM_API_PATH, get(list).post(create).put(update))
        .route(&format!("{}/count", ALBUM_API_PATH), get(count))
        .route(&format!("{}/:id", ALBUM_API_PATH), get(read).delete(delete_handler))
        .route(ALBUM_SEARCH_PATH, get(search))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(state)
}
