//! Extract the caller's granted authorities from the request (e.g. X-Authorities header).

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Header set by the upstream authentication layer: comma-separated authorities.
pub const AUTHORITIES_HEADER: &str = "X-Authorities";

/// The caller as seen by route guards. Anonymous when the header is missing or empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Principal {
    authorities: Vec<String>,
}

impl Principal {
    pub fn anonymous() -> Self {
        Principal::default()
    }

    pub fn with_authorities<I, S>(authorities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Principal {
            authorities: authorities.into_iter().map(Into::into).collect(),
        }
    }

    pub fn parse(header: &str) -> Self {
        Principal {
            authorities: header
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.authorities.is_empty()
    }

    pub fn authorities(&self) -> &[String] {
        &self.authorities
    }

    pub fn has_any_authority(&self, required: &[String]) -> bool {
        required.iter().any(|r| self.authorities.contains(r))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = parts
            .headers
            .get(AUTHORITIES_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(Principal::parse)
            .unwrap_or_default();
        Ok(principal)
    }
}
