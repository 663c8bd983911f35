//! Album views: a route table of list, detail, create and edit views, each guarded by
//! role and fed by resolvers, served over axum on top of an album entity service.

pub mod case;
pub mod config;
pub mod error;
pub mod extractors;
pub mod guard;
pub mod handlers;
pub mod model;
pub mod navigation;
pub mod resolve;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use extractors::Principal;
pub use guard::{CanActivate, UserRouteAccess};
pub use model::{Album, AlbumCriteria, Page, PageRequest, Sort};
pub use navigation::{album_routes, navigate, Activation, Navigation, RouteData, RouteDescriptor, RouteTable};
pub use resolve::{AlbumResolver, Navigator, PagingParams, PagingParamsResolver, Resolution, Resolve, RouteSnapshot};
pub use routes::{album_api_routes, album_view_routes, app, common_routes};
pub use service::{AlbumService, InMemoryAlbumService, PgAlbumService};
pub use state::AppState;
pub use store::{connect, ensure_album_table, ensure_database_exists};
