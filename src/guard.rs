//! Route access guards.

use crate::extractors::Principal;
use crate::navigation::RouteData;

/// Consulted before any resolver runs. `false` denies activation.
pub trait CanActivate: Send + Sync {
    fn can_activate(&self, route: &RouteData, principal: &Principal) -> bool;
}

/// Allows a route when it requires no authority or the principal holds any of its authorities.
#[derive(Clone, Copy, Debug, Default)]
pub struct UserRouteAccess;

impl CanActivate for UserRouteAccess {
    fn can_activate(&self, route: &RouteData, principal: &Principal) -> bool {
        route.authorities.is_empty() || principal.has_any_authority(&route.authorities)
    }
}
