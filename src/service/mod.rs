//! Album entity service: the trait, its PostgreSQL and in-memory implementations, and payload validation.

mod album;
mod memory;
mod postgres;
mod validation;
pub use album::AlbumService;
pub use memory::InMemoryAlbumService;
pub use postgres::PgAlbumService;
pub use validation::AlbumValidator;
