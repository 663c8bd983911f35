//! Paging parameters for list views, from `page` and `sort` query parameters.

use super::{Navigator, Resolution, Resolve, RouteSnapshot};
use crate::error::AppError;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Sort used when neither the query nor the route data name one.
pub const DEFAULT_SORT: &str = "id,asc";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PagingParams {
    /// 1-based page number.
    pub page: u32,
    pub predicate: String,
    pub ascending: bool,
}

impl PagingParams {
    pub fn from_route(route: &RouteSnapshot<'_>) -> Self {
        let page = route
            .query_param("page")
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        let default_sort = route.data.default_sort.as_deref().unwrap_or(DEFAULT_SORT);
        let sort = route.query_param("sort").unwrap_or(default_sort);
        let parts: Vec<&str> = sort.split(',').collect();
        let predicate = parts.first().copied().unwrap_or_default().to_string();
        // With a direction, the last segment decides; without one the order is ascending.
        let ascending = match parts.as_slice() {
            [_, .., last] => *last == "asc",
            _ => true,
        };
        PagingParams {
            page,
            predicate,
            ascending,
        }
    }
}

/// Never redirects.
pub struct PagingParamsResolver;

#[async_trait]
impl Resolve for PagingParamsResolver {
    async fn resolve(
        &self,
        route: &RouteSnapshot<'_>,
        _navigator: &dyn Navigator,
    ) -> Result<Resolution<Value>, AppError> {
        let params = PagingParams::from_route(route);
        tracing::debug!(page = params.page, predicate = %params.predicate, ascending = params.ascending, "paging params");
        serde_json::to_value(params)
            .map(Resolution::Value)
            .map_err(|e| AppError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sort;
    use crate::navigation::RouteData;
    use crate::resolve::RedirectSlot;

    fn list_data() -> RouteData {
        RouteData::new(["ROLE_USER"], "Albums").with_default_sort("id,asc")
    }

    #[test]
    fn defaults_from_route_data() {
        let data = list_data();
        let params = PagingParams::from_route(&RouteSnapshot::new(&data));
        assert_eq!(
            params,
            PagingParams {
                page: 1,
                predicate: "id".into(),
                ascending: true
            }
        );
    }

    #[test]
    fn query_overrides_default_sort() {
        let data = list_data();
        let route = RouteSnapshot::new(&data)
            .with_query("page", "3")
            .with_query("sort", "title,desc");
        let params = PagingParams::from_route(&route);
        assert_eq!(params.page, 3);
        assert_eq!(params.predicate, "title");
        assert!(!params.ascending);
    }

    #[test]
    fn bad_page_falls_back_to_first() {
        let data = RouteData::new(["ROLE_USER"], "Albums");
        let route = RouteSnapshot::new(&data).with_query("page", "zero");
        assert_eq!(PagingParams::from_route(&route).page, 1);
        let route = RouteSnapshot::new(&data).with_query("page", "0");
        assert_eq!(PagingParams::from_route(&route).page, 1);
    }

    #[test]
    fn sort_without_direction_is_ascending_like_the_rest_resource() {
        let data = list_data();
        let route = RouteSnapshot::new(&data).with_query("sort", "title");
        let params = PagingParams::from_route(&route);
        assert_eq!(params.predicate, "title");
        assert!(params.ascending);
        assert_eq!(Some(params.ascending), Sort::parse("title").map(|s| s.ascending));
    }

    #[test]
    fn last_sort_segment_decides_direction() {
        let data = list_data();
        let route = RouteSnapshot::new(&data).with_query("sort", "title,desc,asc");
        assert!(PagingParams::from_route(&route).ascending);
        let route = RouteSnapshot::new(&data).with_query("sort", "title,asc,desc");
        assert!(!PagingParams::from_route(&route).ascending);
    }

    #[tokio::test]
    async fn resolves_to_json() {
        let data = list_data();
        let out = PagingParamsResolver
            .resolve(&RouteSnapshot::new(&data), &RedirectSlot::new())
            .await
            .unwrap();
        assert_eq!(
            out,
            Resolution::Value(serde_json::json!({"page": 1, "predicate": "id", "ascending": true}))
        );
    }
}
