//! Standard response envelope helpers.

use axum::{
    http::{header::HeaderName, header::LINK, HeaderMap, HeaderValue, StatusCode, Uri},
    Json,
};
use serde::Serialize;

/// Total number of rows across all pages, sent with list responses.
pub const X_TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");

#[derive(Serialize)]
pub struct SuccessOne<T> {
    pub data: T,
}

#[derive(Serialize)]
pub struct SuccessMany<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

#[derive(Serialize)]
pub struct PageMeta {
    pub count: u64,
    pub total: u64,
    pub page: u32,
    pub size: u32,
}

pub fn success_one<T: Serialize>(data: T) -> (StatusCode, Json<SuccessOne<T>>) {
    (StatusCode::OK, Json(SuccessOne { data }))
}

pub fn created_one<T: Serialize>(location: &str, data: T) -> (StatusCode, HeaderMap, Json<SuccessOne<T>>) {
    let mut headers = HeaderMap::new();
    if let Ok(v) = HeaderValue::from_str(location) {
        headers.insert(axum::http::header::LOCATION, v);
    }
    (StatusCode::CREATED, headers, Json(SuccessOne { data }))
}

/// A page of results with `X-Total-Count` and a `Link` header built from the request `uri`.
pub fn success_page<T: Serialize>(
    uri: &Uri,
    data: Vec<T>,
    total: u64,
    page: u32,
    size: u32,
) -> (StatusCode, HeaderMap, Json<SuccessMany<T>>) {
    let mut headers = HeaderMap::new();
    headers.insert(X_TOTAL_COUNT, HeaderValue::from(total));
    if let Ok(v) = HeaderValue::from_str(&pagination_link(uri, page, size, total)) {
        headers.insert(LINK, v);
    }
    let count = data.len() as u64;
    (
        StatusCode::OK,
        headers,
        Json(SuccessMany {
            data,
            meta: PageMeta {
                count,
                total,
                page,
                size,
            },
        }),
    )
}

/// `Link` header value: `next` and `prev` when they exist, then `last` and `first`.
/// Each target is the request URI with `page` and `size` replaced.
pub fn pagination_link(uri: &Uri, page: u32, size: u32, total: u64) -> String {
    let size = size.max(1);
    let total_pages = total.div_ceil(u64::from(size));
    let page = u64::from(page);
    let target = |p: u64| {
        let mut pairs: Vec<String> = uri
            .query()
            .unwrap_or_default()
            .split('&')
            .filter(|kv| {
                let key = kv.split('=').next().unwrap_or_default();
                !kv.is_empty() && key != "page" && key != "size"
            })
            .map(str::to_string)
            .collect();
        pairs.push(format!("page={}&size={}", p, size));
        let href = format!("{}?{}", uri.path(), pairs.join("&"))
            .replace(',', "%2C")
            .replace(';', "%3B");
        format!("<{}>", href)
    };

    let mut links = Vec::new();
    if page + 1 < total_pages {
        links.push(format!("{}; rel=\"next\"", target(page + 1)));
    }
    if page > 0 {
        links.push(format!("{}; rel=\"prev\"", target(page - 1)));
    }
    links.push(format!("{}; rel=\"last\"", target(total_pages.saturating_sub(1))));
    links.push(format!("{}; rel=\"first\"", target(0)));
    links.join(",")
}

/// Write operations reported through the alert headers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityAlert {
    Created,
    Updated,
    Deleted,
}

/// `X-<app>-alert` with a readable message and `X-<app>-params` with the entity id.
pub fn alert_headers(app_name: &str, alert: EntityAlert, entity: &str, id: i64) -> HeaderMap {
    let message = match alert {
        EntityAlert::Created => format!("A new {} is created with identifier {}", entity, id),
        EntityAlert::Updated => format!("A {} is updated with identifier {}", entity, id),
        EntityAlert::Deleted => format!("A {} is deleted with identifier {}", entity, id),
    };
    let mut headers = HeaderMap::new();
    let pairs = [
        (format!("x-{}-alert", app_name), message),
        (format!("x-{}-params", app_name), id.to_string()),
    ];
    for (name, value) in pairs {
        match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(&value)) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::warn!(header = %name, "skipping alert header"),
        }
    }
    headers
}

pub fn error_body(code: &str, message: String) -> serde_json::Value {
    serde_json::json!({
        "error": {
            "code": code,
            "message": message
        }
    })
}
