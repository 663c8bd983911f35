//! Resolves the album shown by the detail, create and edit views.

use super::{Navigator, Resolution, Resolve, RouteSnapshot};
use crate::error::AppError;
use crate::model::Album;
use crate::service::AlbumService;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub struct AlbumResolver {
    service: Arc<dyn AlbumService>,
    not_found_path: String,
}

impl AlbumResolver {
    pub fn new(service: Arc<dyn AlbumService>, not_found_path: impl Into<String>) -> Self {
        AlbumResolver {
            service,
            not_found_path: not_found_path.into(),
        }
    }

    /// Without an id: a fresh album and no service call. With an id: one `find`;
    /// a missing album redirects to the not-found path. Fetch errors are returned as-is.
    pub async fn resolve_album(
        &self,
        id: Option<&str>,
        navigator: &dyn Navigator,
    ) -> Result<Resolution<Album>, AppError> {
        let Some(raw) = id else {
            return Ok(Resolution::Value(Album::default()));
        };
        let id: i64 = raw
            .trim()
            .parse()
            .map_err(|_| AppError::BadRequest(format!("invalid album id: {}", raw)))?;
        match self.service.find(id).await? {
            Some(album) => {
                tracing::debug!(id, "album resolved");
                Ok(Resolution::Value(album))
            }
            None => {
                tracing::info!(id, to = %self.not_found_path, "album not found, redirecting");
                navigator.navigate(&self.not_found_path);
                Ok(Resolution::Redirected)
            }
        }
    }
}

#[async_trait]
impl Resolve for AlbumResolver {
    async fn resolve(
        &self,
        route: &RouteSnapshot<'_>,
        navigator: &dyn Navigator,
    ) -> Result<Resolution<Value>, AppError> {
        let resolution = self.resolve_album(route.param("id"), navigator).await?;
        match resolution {
            Resolution::Value(album) => Ok(Resolution::Value(
                serde_json::to_value(album).map_err(|e| AppError::Internal(e.to_string()))?,
            )),
            Resolution::Redirected => Ok(Resolution::Redirected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AlbumCriteria, Page, PageRequest};
    use crate::navigation::RouteData;
    use crate::resolve::RedirectSlot;
    use crate::service::InMemoryAlbumService;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts `find` calls and delegates to an in-memory store.
    struct CountingService {
        inner: InMemoryAlbumService,
        finds: AtomicUsize,
    }

    impl CountingService {
        fn with_albums(albums: Vec<Album>) -> Arc<Self> {
            Arc::new(CountingService {
                inner: InMemoryAlbumService::with_albums(albums),
                finds: AtomicUsize::new(0),
            })
        }

        fn finds(&self) -> usize {
            self.finds.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AlbumService for CountingService {
        async fn find(&self, id: i64) -> Result<Option<Album>, AppError> {
            self.finds.fetch_add(1, Ordering::SeqCst);
            self.inner.find(id).await
        }
        async fn query(&self, criteria: &AlbumCriteria, page: &PageRequest) -> Result<Page<Album>, AppError> {
            self.inner.query(criteria, page).await
        }
        async fn count(&self, criteria: &AlbumCriteria) -> Result<u64, AppError> {
            self.inner.count(criteria).await
        }
        async fn create(&self, album: Album) -> Result<Album, AppError> {
            self.inner.create(album).await
        }
        async fn update(&self, album: Album) -> Result<Option<Album>, AppError> {
            self.inner.update(album).await
        }
        async fn delete(&self, id: i64) -> Result<bool, AppError> {
            self.inner.delete(id).await
        }
    }

    struct FailingService;

    #[async_trait]
    impl AlbumService for FailingService {
        async fn find(&self, _id: i64) -> Result<Option<Album>, AppError> {
            Err(AppError::Db(sqlx::Error::PoolTimedOut))
        }
        async fn query(&self, _criteria: &AlbumCriteria, _page: &PageRequest) -> Result<Page<Album>, AppError> {
            Err(AppError::Db(sqlx::Error::PoolTimedOut))
        }
        async fn count(&self, _criteria: &AlbumCriteria) -> Result<u64, AppError> {
            Err(AppError::Db(sqlx::Error::PoolTimedOut))
        }
        async fn create(&self, _album: Album) -> Result<Album, AppError> {
            Err(AppError::Db(sqlx::Error::PoolTimedOut))
        }
        async fn update(&self, _album: Album) -> Result<Option<Album>, AppError> {
            Err(AppError::Db(sqlx::Error::PoolTimedOut))
        }
        async fn delete(&self, _id: i64) -> Result<bool, AppError> {
            Err(AppError::Db(sqlx::Error::PoolTimedOut))
        }
    }

    fn stored(id: i64) -> Album {
        Album {
            title: format!("album {}", id),
            ..Album::new(id)
        }
    }

    #[tokio::test]
    async fn existing_id_yields_the_stored_album() {
        let svc = CountingService::with_albums(vec![stored(123)]);
        let resolver = AlbumResolver::new(svc.clone(), "/404");
        let slot = RedirectSlot::new();

        let out = resolver.resolve_album(Some("123"), &slot).await.unwrap();

        assert_eq!(out, Resolution::Value(stored(123)));
        assert_eq!(svc.finds(), 1);
        assert_eq!(slot.take(), None);
    }

    #[tokio::test]
    async fn missing_id_redirects_once_to_not_found() {
        let svc = CountingService::with_albums(vec![stored(1)]);
        let resolver = AlbumResolver::new(svc.clone(), "/404");
        let redirects = std::sync::Mutex::new(Vec::new());
        let nav = |p: &str| redirects.lock().unwrap().push(p.to_string());

        let out = resolver.resolve_album(Some("999"), &nav).await.unwrap();

        assert_eq!(out, Resolution::Redirected);
        assert_eq!(*redirects.lock().unwrap(), ["/404"]);
        assert_eq!(svc.finds(), 1);
    }

    #[tokio::test]
    async fn no_id_yields_fresh_album_without_service_call() {
        let svc = CountingService::with_albums(vec![]);
        let resolver = AlbumResolver::new(svc.clone(), "/404");
        let slot = RedirectSlot::new();

        let out = resolver.resolve_album(None, &slot).await.unwrap();

        assert_eq!(out, Resolution::Value(Album::default()));
        assert_eq!(out.value().and_then(|a| a.id), None);
        assert_eq!(svc.finds(), 0);
        assert_eq!(slot.take(), None);
    }

    #[tokio::test]
    async fn fetch_failure_propagates_without_redirect() {
        let resolver = AlbumResolver::new(Arc::new(FailingService), "/404");
        let slot = RedirectSlot::new();

        let err = resolver.resolve_album(Some("5"), &slot).await.unwrap_err();

        assert!(matches!(err, AppError::Db(_)));
        assert_eq!(slot.take(), None);
    }

    #[tokio::test]
    async fn malformed_id_is_a_bad_request_without_fetch() {
        let svc = CountingService::with_albums(vec![]);
        let resolver = AlbumResolver::new(svc.clone(), "/404");
        let slot = RedirectSlot::new();

        let err = resolver.resolve_album(Some("abc"), &slot).await.unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(svc.finds(), 0);
    }

    #[tokio::test]
    async fn resolve_reads_id_from_route_params() {
        let svc = CountingService::with_albums(vec![stored(123)]);
        let resolver = AlbumResolver::new(svc, "/404");
        let data = RouteData::new(["ROLE_USER"], "Albums");
        let route = RouteSnapshot::new(&data).with_param("id", "123");

        let out = resolver.resolve(&route, &RedirectSlot::new()).await.unwrap();

        let value = out.value().unwrap();
        assert_eq!(value["id"], 123);
        assert_eq!(value["title"], "album 123");
    }
}
