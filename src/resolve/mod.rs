//! Route resolvers: data a view needs before the router activates it.
//!
//! A resolver either yields a value or aborts the navigation after asking the
//! [`Navigator`] for a redirect. Both outcomes are carried by [`Resolution`].

mod album;
mod paging;

pub use album::AlbumResolver;
pub use paging::{PagingParams, PagingParamsResolver, DEFAULT_SORT};

use crate::error::AppError;
use crate::navigation::RouteData;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// Outcome of one resolver run: a value for the view, or an abort after a redirect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution<T> {
    Value(T),
    Redirected,
}

impl<T> Resolution<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Resolution::Value(v) => Some(v),
            Resolution::Redirected => None,
        }
    }
}

/// Receives redirect requests from resolvers. Fire-and-forget.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str) + Send + Sync,
{
    fn navigate(&self, path: &str) {
        self(path)
    }
}

/// Keeps the first redirect requested during one navigation.
#[derive(Debug, Default)]
pub struct RedirectSlot {
    target: Mutex<Option<String>>,
}

impl RedirectSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Option<String> {
        self.target.lock().ok().and_then(|mut t| t.take())
    }
}

impl Navigator for RedirectSlot {
    fn navigate(&self, path: &str) {
        let Ok(mut target) = self.target.lock() else {
            return;
        };
        if let Some(first) = target.as_deref() {
            tracing::warn!(first = %first, ignored = %path, "redirect already requested");
            return;
        }
        *target = Some(path.to_string());
    }
}

/// What a resolver sees of the route being activated.
#[derive(Clone, Debug)]
pub struct RouteSnapshot<'a> {
    /// Path parameters (e.g. `id` for `:id/view`).
    pub params: HashMap<String, String>,
    pub query: HashMap<String, String>,
    pub data: &'a RouteData,
}

impl<'a> RouteSnapshot<'a> {
    pub fn new(data: &'a RouteData) -> Self {
        RouteSnapshot {
            params: HashMap::new(),
            query: HashMap::new(),
            data,
        }
    }

    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.params.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.insert(key.to_string(), value.to_string());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str).filter(|s| !s.is_empty())
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str).filter(|s| !s.is_empty())
    }
}

/// A named resolver on a route. Output is JSON so heterogeneous resolvers share one route table.
#[async_trait]
pub trait Resolve: Send + Sync {
    async fn resolve(
        &self,
        route: &RouteSnapshot<'_>,
        navigator: &dyn Navigator,
    ) -> Result<Resolution<Value>, AppError>;
}
