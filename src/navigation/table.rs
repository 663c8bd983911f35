//! The album route table: four view routes, their resolvers and access policy.

use crate::error::ConfigError;
use crate::guard::{CanActivate, UserRouteAccess};
use crate::resolve::{AlbumResolver, PagingParamsResolver, Resolve, DEFAULT_SORT};
use crate::service::AlbumService;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Prefix the album routes are mounted under.
pub const ALBUM_ROUTE_PREFIX: &str = "/album";
pub const ALBUM_AUTHORITY: &str = "ROLE_USER";
pub const ALBUM_PAGE_TITLE: &str = "Albums";

/// Route metadata. Serialized as `{authorities, defaultSort?, pageTitle}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteData {
    pub authorities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<String>,
    pub page_title: String,
}

impl RouteData {
    pub fn new<I, S>(authorities: I, page_title: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RouteData {
            authorities: authorities.into_iter().map(Into::into).collect(),
            default_sort: None,
            page_title: page_title.to_string(),
        }
    }

    pub fn with_default_sort(mut self, sort: &str) -> Self {
        self.default_sort = Some(sort.to_string());
        self
    }
}

/// The view a route activates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewComponent {
    AlbumList,
    AlbumDetail,
    AlbumUpdate,
}

impl ViewComponent {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewComponent::AlbumList => "album-list",
            ViewComponent::AlbumDetail => "album-detail",
            ViewComponent::AlbumUpdate => "album-update",
        }
    }
}

pub struct RouteDescriptor {
    /// Pattern relative to the prefix: `""`, `":id/view"`, `"new"`, `":id/edit"`.
    pub path: &'static str,
    pub component: ViewComponent,
    /// Run in this order; names become keys of the resolved data.
    pub resolvers: Vec<(&'static str, Arc<dyn Resolve>)>,
    pub data: RouteData,
    pub guard: Arc<dyn CanActivate>,
}

impl RouteDescriptor {
    /// Full axum path, e.g. `/album/:id/view`; the empty pattern maps to the prefix itself.
    pub fn mount_path(&self, prefix: &str) -> String {
        if self.path.is_empty() {
            prefix.to_string()
        } else {
            format!("{}/{}", prefix.trim_end_matches('/'), self.path)
        }
    }

    pub fn resolver_names(&self) -> Vec<&'static str> {
        self.resolvers.iter().map(|(name, _)| *name).collect()
    }
}

impl fmt::Debug for RouteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDescriptor")
            .field("path", &self.path)
            .field("component", &self.component)
            .field("resolvers", &self.resolver_names())
            .field("data", &self.data)
            .finish()
    }
}

/// Ordered route descriptors. Earlier entries win when patterns overlap.
#[derive(Debug)]
pub struct RouteTable {
    pub prefix: String,
    pub routes: Vec<Arc<RouteDescriptor>>,
}

impl RouteTable {
    pub fn find(&self, path: &str) -> Option<&Arc<RouteDescriptor>> {
        self.routes.iter().find(|r| r.path == path)
    }

    /// Startup checks: unique paths, every route guarded by at least one authority, named resolvers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for route in &self.routes {
            if !seen.insert(route.path) {
                return Err(ConfigError::DuplicateRoutePath(route.path.to_string()));
            }
            if route.data.authorities.is_empty() {
                return Err(ConfigError::MissingAuthorities {
                    path: route.path.to_string(),
                });
            }
            if route.resolvers.iter().any(|(name, _)| name.is_empty()) {
                return Err(ConfigError::UnnamedResolver {
                    path: route.path.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Build the album route table. The album resolver redirects to `not_found_path` for unknown ids.
pub fn album_routes(service: Arc<dyn AlbumService>, not_found_path: &str) -> RouteTable {
    let guard: Arc<dyn CanActivate> = Arc::new(UserRouteAccess);
    let album: Arc<dyn Resolve> = Arc::new(AlbumResolver::new(service, not_found_path));
    let paging: Arc<dyn Resolve> = Arc::new(PagingParamsResolver);
    let data = || RouteData::new([ALBUM_AUTHORITY], ALBUM_PAGE_TITLE);

    let routes = vec![
        RouteDescriptor {
            path: "",
            component: ViewComponent::AlbumList,
            resolvers: vec![("pagingParams", paging)],
            data: data().with_default_sort(DEFAULT_SORT),
            guard: guard.clone(),
        },
        RouteDescriptor {
            path: ":id/view",
            component: ViewComponent::AlbumDetail,
            resolvers: vec![("album", album.clone())],
            data: data(),
            guard: guard.clone(),
        },
        RouteDescriptor {
            path: "new",
            component: ViewComponent::AlbumUpdate,
            resolvers: vec![("album", album.clone())],
            data: data(),
            guard: guard.clone(),
        },
        RouteDescriptor {
            path: ":id/edit",
            component: ViewComponent::AlbumUpdate,
            resolvers: vec![("album", album)],
            data: data(),
            guard,
        },
    ];

    RouteTable {
        prefix: ALBUM_ROUTE_PREFIX.to_string(),
        routes: routes.into_iter().map(Arc::new).collect(),
    }
}
