//! Request extractors.

pub mod principal;
pub use principal::{Principal, AUTHORITIES_HEADER};
