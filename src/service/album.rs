//! The album entity service contract.

use crate::error::AppError;
use crate::model::{Album, AlbumCriteria, Page, PageRequest};
use async_trait::async_trait;

/// Storage-backed album operations. `find` returning `Ok(None)` means the id does not exist.
#[async_trait]
pub trait AlbumService: Send + Sync {
    async fn find(&self, id: i64) -> Result<Option<Album>, AppError>;

    /// One page of the albums matching `criteria`; `total` counts every match.
    async fn query(&self, criteria: &AlbumCriteria, page: &PageRequest) -> Result<Page<Album>, AppError>;

    async fn count(&self, criteria: &AlbumCriteria) -> Result<u64, AppError>;

    /// Insert a new album; the stored row gets a fresh id.
    async fn create(&self, album: Album) -> Result<Album, AppError>;

    /// Replace an existing album. `Ok(None)` when no album has that id.
    async fn update(&self, album: Album) -> Result<Option<Album>, AppError>;

    /// Delete by id. Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Cheap liveness check of the backing store.
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
