//! Album storage in PostgreSQL.

use crate::case::sort_column;
use crate::error::AppError;
use crate::model::{Album, AlbumCriteria, Page, PageRequest};
use crate::service::AlbumService;
use async_trait::async_trait;
use sqlx::PgPool;

const COLUMNS: &str = "id, title, artist, release_date";

pub struct PgAlbumService {
    pool: PgPool,
}

impl PgAlbumService {
    pub fn new(pool: PgPool) -> Self {
        PgAlbumService { pool }
    }
}

/// ORDER BY clause for a page request. The column comes from a fixed allow-list, never from input.
fn order_by(page: &PageRequest) -> Result<String, AppError> {
    let column = sort_column(&page.sort.property)
        .ok_or_else(|| AppError::BadRequest(format!("cannot sort by '{}'", page.sort.property)))?;
    let dir = if page.sort.ascending { "ASC" } else { "DESC" };
    // Tie-break on id so paging is stable.
    if column == "id" {
        Ok(format!("ORDER BY id {}", dir))
    } else {
        Ok(format!("ORDER BY {} {}, id ASC", column, dir))
    }
}

/// WHERE clause for the criteria and its bind values, numbered from `$1`.
fn where_clause(criteria: &AlbumCriteria) -> (String, Vec<String>) {
    let mut conditions = Vec::new();
    let mut binds = Vec::new();
    if let Some(title) = &criteria.title_contains {
        binds.push(like_pattern(title));
        conditions.push(format!("title ILIKE ${}", binds.len()));
    }
    if let Some(artist) = &criteria.artist_contains {
        binds.push(like_pattern(artist));
        conditions.push(format!("artist ILIKE ${}", binds.len()));
    }
    if let Some(text) = &criteria.text {
        binds.push(like_pattern(text));
        let n = binds.len();
        conditions.push(format!("(title ILIKE ${n} OR artist ILIKE ${n})"));
    }
    if conditions.is_empty() {
        (String::new(), binds)
    } else {
        (format!("WHERE {}", conditions.join(" AND ")), binds)
    }
}

/// `%needle%` with LIKE metacharacters escaped (backslash is the default escape).
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl AlbumService for PgAlbumService {
    async fn find(&self, id: i64) -> Result<Option<Album>, AppError> {
        let sql = format!("SELECT {} FROM album WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Album>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn query(&self, criteria: &AlbumCriteria, page: &PageRequest) -> Result<Page<Album>, AppError> {
        let (filter, binds) = where_clause(criteria);
        let sql = format!(
            "SELECT {} FROM album {} {} LIMIT ${} OFFSET ${}",
            COLUMNS,
            filter,
            order_by(page)?,
            binds.len() + 1,
            binds.len() + 2
        );
        tracing::debug!(sql = %sql, page = page.page, size = page.size, "query");
        let mut q = sqlx::query_as::<_, Album>(&sql);
        for b in &binds {
            q = q.bind(b);
        }
        let items = q
            .bind(i64::from(page.size))
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await?;
        let total = self.count(criteria).await?;
        Ok(Page { items, total })
    }

    async fn count(&self, criteria: &AlbumCriteria) -> Result<u64, AppError> {
        let (filter, binds) = where_clause(criteria);
        let sql = format!("SELECT COUNT(*) FROM album {}", filter);
        tracing::debug!(sql = %sql, "query");
        let mut q = sqlx::query_as::<_, (i64,)>(&sql);
        for b in &binds {
            q = q.bind(b);
        }
        let (n,) = q.fetch_one(&self.pool).await?;
        Ok(n.max(0) as u64)
    }

    async fn create(&self, album: Album) -> Result<Album, AppError> {
        let sql = format!(
            "INSERT INTO album (title, artist, release_date) VALUES ($1, $2, $3) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Album>(&sql)
            .bind(&album.title)
            .bind(&album.artist)
            .bind(album.release_date)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, album: Album) -> Result<Option<Album>, AppError> {
        let id = album
            .id
            .ok_or_else(|| AppError::BadRequest("album id is required for update".into()))?;
        let sql = format!(
            "UPDATE album SET title = $2, artist = $3, release_date = $4 WHERE id = $1 RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Album>(&sql)
            .bind(id)
            .bind(&album.title)
            .bind(&album.artist)
            .bind(album.release_date)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        tracing::debug!(id, "delete album");
        let done = sqlx::query("DELETE FROM album WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sort;

    fn page(property: &str, ascending: bool) -> PageRequest {
        PageRequest {
            page: 0,
            size: 20,
            sort: Sort {
                property: property.into(),
                ascending,
            },
        }
    }

    #[test]
    fn order_by_uses_column_names() {
        assert_eq!(order_by(&page("id", true)).unwrap(), "ORDER BY id ASC");
        assert_eq!(
            order_by(&page("releaseDate", false)).unwrap(),
            "ORDER BY release_date DESC, id ASC"
        );
    }

    #[test]
    fn where_clause_numbers_binds_in_order() {
        assert_eq!(where_clause(&AlbumCriteria::default()), (String::new(), vec![]));

        let criteria = AlbumCriteria {
            title_contains: Some("blue".into()),
            artist_contains: None,
            text: Some("miles".into()),
        };
        let (sql, binds) = where_clause(&criteria);
        assert_eq!(sql, "WHERE title ILIKE $1 AND (title ILIKE $2 OR artist ILIKE $2)");
        assert_eq!(binds, ["%blue%", "%miles%"]);
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(like_pattern("100%_a\\b"), "%100\\%\\_a\\\\b%");
    }

    #[test]
    fn order_by_rejects_unknown_property() {
        assert!(matches!(order_by(&page("rating", true)), Err(AppError::BadRequest(_))));
    }
}
