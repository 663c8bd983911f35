//! In-process album store, used when no database is configured and in tests.

use crate::case::sort_column;
use crate::error::AppError;
use crate::model::{Album, AlbumCriteria, Page, PageRequest};
use crate::service::AlbumService;
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Default)]
pub struct InMemoryAlbumService {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    albums: BTreeMap<i64, Album>,
}

impl InMemoryAlbumService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with albums that already carry ids (e.g. fixtures). Later creates continue after the highest id.
    pub fn with_albums(albums: impl IntoIterator<Item = Album>) -> Self {
        let mut inner = Inner::default();
        for album in albums {
            if let Some(id) = album.id {
                inner.next_id = inner.next_id.max(id);
                inner.albums.insert(id, album);
            }
        }
        InMemoryAlbumService {
            inner: RwLock::new(inner),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>, AppError> {
        self.inner
            .read()
            .map_err(|_| AppError::Internal("album store lock poisoned".into()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>, AppError> {
        self.inner
            .write()
            .map_err(|_| AppError::Internal("album store lock poisoned".into()))
    }
}

fn compare(a: &Album, b: &Album, column: &str) -> Ordering {
    match column {
        "title" => a.title.cmp(&b.title),
        "artist" => a.artist.cmp(&b.artist),
        "release_date" => a.release_date.cmp(&b.release_date),
        _ => a.id.cmp(&b.id),
    }
}

#[async_trait]
impl AlbumService for InMemoryAlbumService {
    async fn find(&self, id: i64) -> Result<Option<Album>, AppError> {
        Ok(self.read()?.albums.get(&id).cloned())
    }

    async fn query(&self, criteria: &AlbumCriteria, page: &PageRequest) -> Result<Page<Album>, AppError> {
        let column = sort_column(&page.sort.property)
            .ok_or_else(|| AppError::BadRequest(format!("cannot sort by '{}'", page.sort.property)))?;
        let guard = self.read()?;
        let mut items: Vec<Album> = guard
            .albums
            .values()
            .filter(|a| criteria.matches(a))
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            let ord = compare(a, b, column);
            let ord = if page.sort.ascending { ord } else { ord.reverse() };
            ord.then_with(|| a.id.cmp(&b.id))
        });
        let total = items.len() as u64;
        let items = items
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size as usize)
            .collect();
        Ok(Page { items, total })
    }

    async fn count(&self, criteria: &AlbumCriteria) -> Result<u64, AppError> {
        Ok(self.read()?.albums.values().filter(|a| criteria.matches(a)).count() as u64)
    }

    async fn create(&self, mut album: Album) -> Result<Album, AppError> {
        let mut guard = self.write()?;
        guard.next_id += 1;
        let id = guard.next_id;
        album.id = Some(id);
        guard.albums.insert(id, album.clone());
        Ok(album)
    }

    async fn update(&self, album: Album) -> Result<Option<Album>, AppError> {
        let id = album
            .id
            .ok_or_else(|| AppError::BadRequest("album id is required for update".into()))?;
        let mut guard = self.write()?;
        match guard.albums.get_mut(&id) {
            Some(slot) => {
                *slot = album.clone();
                Ok(Some(album))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.write()?.albums.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AlbumCriteria, Sort};

    fn album(id: i64, title: &str) -> Album {
        Album {
            id: Some(id),
            title: title.into(),
            ..Album::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_ids_after_seeded_rows() {
        let svc = InMemoryAlbumService::with_albums([album(5, "Kind of Blue")]);
        let created = svc.create(Album { title: "Blue Train".into(), ..Album::default() }).await.unwrap();
        assert_eq!(created.id, Some(6));
        assert_eq!(svc.count(&AlbumCriteria::default()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn query_sorts_and_pages() {
        let svc = InMemoryAlbumService::with_albums([album(1, "C"), album(2, "A"), album(3, "B")]);
        let req = PageRequest {
            page: 0,
            size: 2,
            sort: Sort { property: "title".into(), ascending: false },
        };
        let page = svc.query(&AlbumCriteria::default(), &req).await.unwrap();
        assert_eq!(page.total, 3);
        let titles: Vec<&str> = page.items.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["C", "B"]);

        let next = svc
            .query(&AlbumCriteria::default(), &PageRequest { page: 1, ..req })
            .await
            .unwrap();
        assert_eq!(next.items.len(), 1);
        assert_eq!(next.items[0].title, "A");
    }

    #[tokio::test]
    async fn query_and_count_apply_criteria() {
        let svc = InMemoryAlbumService::with_albums([
            Album { artist: Some("Miles Davis".into()), ..album(1, "Kind of Blue") },
            Album { artist: Some("John Coltrane".into()), ..album(2, "Blue Train") },
            album(3, "Giant Steps"),
        ]);
        let blue = AlbumCriteria { title_contains: Some("blue".into()), ..Default::default() };
        let req = PageRequest { page: 0, size: 1, sort: Sort::default() };

        let page = svc.query(&blue, &req).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items, [Album { artist: Some("Miles Davis".into()), ..album(1, "Kind of Blue") }]);
        assert_eq!(svc.count(&blue).await.unwrap(), 2);
        assert_eq!(svc.count(&AlbumCriteria::search("coltrane")).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_and_delete_unknown_ids() {
        let svc = InMemoryAlbumService::new();
        assert_eq!(svc.update(album(9, "x")).await.unwrap(), None);
        assert!(!svc.delete(9).await.unwrap());
    }
}
