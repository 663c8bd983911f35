//! View route handler: turns an HTTP GET into one navigation of the route table.

use crate::error::AppError;
use crate::extractors::Principal;
use crate::navigation::{navigate, Navigation, RouteDescriptor};
use crate::resolve::RouteSnapshot;
use std::collections::HashMap;
use std::sync::Arc;

/// Activate `route` for the caller. A redirect is answered with `303 See Other`.
pub async fn activate(
    route: Arc<RouteDescriptor>,
    params: HashMap<String, String>,
    query: HashMap<String, String>,
    principal: Principal,
) -> Result<Navigation, AppError> {
    let snapshot = RouteSnapshot {
        params,
        query,
        data: &route.data,
    };
    navigate(&route, snapshot, &principal).await
}
