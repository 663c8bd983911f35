//! Album REST handlers: create, update, list, count, read, delete, search.

use crate::config::MAX_ITEMS_PER_PAGE;
use crate::error::AppError;
use crate::model::{Album, AlbumCriteria, PageRequest, Sort};
use crate::response::{alert_headers, created_one, success_one, success_page, EntityAlert};
use crate::service::AlbumValidator;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    Json,
};
use std::collections::HashMap;

pub const ALBUM_API_PATH: &str = "/api/albums";
pub const ALBUM_SEARCH_PATH: &str = "/api/_search/albums";
const ENTITY_NAME: &str = "album";

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id: {}", id_str)))
}

/// `page` is zero-based; `size` defaults to the configured page size; `sort` is `property[,asc|desc]`.
fn page_request(params: &HashMap<String, String>, default_size: u32) -> Result<PageRequest, AppError> {
    let page = match params.get("page") {
        Some(p) => p
            .parse()
            .map_err(|_| AppError::BadRequest(format!("invalid page: {}", p)))?,
        None => 0,
    };
    let size = match params.get("size") {
        Some(s) => s
            .parse::<u32>()
            .map_err(|_| AppError::BadRequest(format!("invalid size: {}", s)))?
            .clamp(1, MAX_ITEMS_PER_PAGE),
        None => default_size,
    };
    let sort = match params.get("sort") {
        Some(s) => Sort::parse(s).ok_or_else(|| AppError::BadRequest(format!("invalid sort: {}", s)))?,
        None => Sort::default(),
    };
    Ok(PageRequest { page, size, sort })
}

/// `title.contains` and `artist.contains` filters; empty values are ignored.
fn criteria(params: &HashMap<String, String>) -> AlbumCriteria {
    let get = |k: &str| params.get(k).map(|v| v.trim()).filter(|v| !v.is_empty()).map(str::to_string);
    AlbumCriteria {
        title_contains: get("title.contains"),
        artist_contains: get("artist.contains"),
        text: None,
    }
}

pub async fn list(
    State(state): State<AppState>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let req = page_request(&params, state.settings.items_per_page)?;
    let criteria = criteria(&params);
    tracing::debug!(?criteria, page = req.page, size = req.size, sort = %req.sort.property, "list albums");
    let page = state.service.query(&criteria, &req).await?;
    Ok(success_page(&uri, page.items, page.total, req.page, req.size))
}

pub async fn count(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let criteria = criteria(&params);
    tracing::debug!(?criteria, "count albums");
    let n = state.service.count(&criteria).await?;
    Ok(success_one(n))
}

/// Free-text search over title and artist, paged like `list`.
pub async fn search(
    State(state): State<AppState>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let query = params
        .get("query")
        .map(|q| q.trim())
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest("query parameter is required".into()))?;
    let req = page_request(&params, state.settings.items_per_page)?;
    tracing::debug!(query, page = req.page, size = req.size, "search albums");
    let page = state.service.query(&AlbumCriteria::search(query), &req).await?;
    Ok(success_page(&uri, page.items, page.total, req.page, req.size))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    tracing::debug!(id, "get album");
    let album = state
        .service
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("album {}", id)))?;
    Ok(success_one(album))
}

pub async fn create(
    State(state): State<AppState>,
    Json(album): Json<Album>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    tracing::debug!(?album, "create album");
    if album.id.is_some() {
        return Err(AppError::BadRequest("a new album cannot already have an id".into()));
    }
    AlbumValidator::validate(&album)?;
    let created = state.service.create(album).await?;
    let id = created.id.unwrap_or_default();
    let location = format!("{}/{}", ALBUM_API_PATH, id);
    let alert = alert_headers(&state.settings.app_name, EntityAlert::Created, ENTITY_NAME, id);
    Ok((alert, created_one(&location, created)))
}

pub async fn update(
    State(state): State<AppState>,
    Json(album): Json<Album>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    tracing::debug!(?album, "update album");
    let id = album
        .id
        .ok_or_else(|| AppError::BadRequest("invalid id: null".into()))?;
    AlbumValidator::validate(&album)?;
    let updated = state
        .service
        .update(album)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("album {}", id)))?;
    let alert = alert_headers(&state.settings.app_name, EntityAlert::Updated, ENTITY_NAME, id);
    Ok((alert, success_one(updated)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    tracing::debug!(id, "delete album");
    if !state.service.delete(id).await? {
        return Err(AppError::NotFound(format!("album {}", id)));
    }
    let alert = alert_headers(&state.settings.app_name, EntityAlert::Deleted, ENTITY_NAME, id);
    Ok((StatusCode::NO_CONTENT, alert))
}
