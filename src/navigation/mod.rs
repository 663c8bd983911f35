//! Album view routing: the route table and the navigation pipeline that runs it.

mod pipeline;
mod table;

pub use pipeline::{navigate, Activation, Navigation};
pub use table::{
    album_routes, RouteData, RouteDescriptor, RouteTable, ViewComponent, ALBUM_AUTHORITY,
    ALBUM_PAGE_TITLE, ALBUM_ROUTE_PREFIX,
};
