//! Navigation: guard, then resolvers in declaration order, then activation.

use super::table::{RouteDescriptor, RouteData, ViewComponent};
use crate::error::AppError;
use crate::extractors::Principal;
use crate::resolve::{RedirectSlot, Resolution, RouteSnapshot};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};

/// What the activated view receives.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Activation {
    pub component: ViewComponent,
    pub path: &'static str,
    pub data: RouteData,
    /// Resolver name -> resolved value.
    pub resolved: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Navigation {
    Activated(Activation),
    /// A resolver aborted; the view was not activated.
    Redirected(String),
}

impl IntoResponse for Navigation {
    fn into_response(self) -> Response {
        match self {
            Navigation::Activated(activation) => Json(activation).into_response(),
            Navigation::Redirected(to) => Redirect::to(&to).into_response(),
        }
    }
}

/// Run one navigation to `route`. Guard rejection is 401 for anonymous callers, 403 otherwise;
/// resolvers do not run in either case.
pub async fn navigate(
    route: &RouteDescriptor,
    snapshot: RouteSnapshot<'_>,
    principal: &Principal,
) -> Result<Navigation, AppError> {
    if !route.guard.can_activate(&route.data, principal) {
        tracing::warn!(
            path = route.path,
            authorities = ?principal.authorities(),
            "route guard rejected navigation"
        );
        return Err(if principal.is_authenticated() {
            AppError::Forbidden(format!("route '{}' requires {:?}", route.path, route.data.authorities))
        } else {
            AppError::Unauthorized("authentication required".into())
        });
    }

    let redirect = RedirectSlot::new();
    let mut resolved = Map::new();
    for (name, resolver) in &route.resolvers {
        match resolver.resolve(&snapshot, &redirect).await? {
            Resolution::Value(v) => {
                resolved.insert((*name).to_string(), v);
            }
            Resolution::Redirected => {
                let to = redirect.take().ok_or_else(|| {
                    AppError::Internal(format!("resolver '{}' aborted without a redirect", name))
                })?;
                tracing::debug!(path = route.path, resolver = *name, to = %to, "navigation redirected");
                return Ok(Navigation::Redirected(to));
            }
        }
    }

    tracing::debug!(path = route.path, component = route.component.as_str(), "route activated");
    Ok(Navigation::Activated(Activation {
        component: route.component,
        path: route.path,
        data: route.data.clone(),
        resolved,
    }))
}
