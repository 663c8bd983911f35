//! Runtime settings read from the environment.

use crate::error::ConfigError;
use crate::navigation::ALBUM_ROUTE_PREFIX;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_NOT_FOUND_PATH: &str = "/404";
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 20;
pub const MAX_ITEMS_PER_PAGE: u32 = 1000;
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;
pub const DEFAULT_APP_NAME: &str = "albumRoutes";

/// Routes the server mounts itself. The not-found page must not collide with them.
const RESERVED_PATHS: &[&str] = &["/health", "/ready", "/version"];
const RESERVED_PREFIXES: &[&str] = &[ALBUM_ROUTE_PREFIX, "/api"];

#[derive(Clone, Debug)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    /// When unset the server keeps albums in memory.
    pub database_url: Option<String>,
    /// Where the album resolver redirects when an id does not exist.
    pub not_found_path: String,
    pub items_per_page: u32,
    pub max_body_bytes: usize,
    /// Prefix of the `X-<app>-alert` / `X-<app>-params` headers on REST writes.
    pub app_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            database_url: None,
            not_found_path: DEFAULT_NOT_FOUND_PATH.into(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            app_name: DEFAULT_APP_NAME.into(),
        }
    }
}

impl Settings {
    /// Load from process environment, after merging a `.env` file if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(ConfigError::Load(format!(".env: {}", e)));
            }
        }
        Self::from_vars(std::env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |k: &str| vars.get(k).map(|s| s.trim()).filter(|s| !s.is_empty());

        let bind_addr: SocketAddr = parse_var("BIND_ADDR", get("BIND_ADDR").unwrap_or(DEFAULT_BIND_ADDR))?;
        let items_per_page = match get("ITEMS_PER_PAGE") {
            Some(v) => parse_var::<u32>("ITEMS_PER_PAGE", v)?,
            None => DEFAULT_ITEMS_PER_PAGE,
        };
        if items_per_page == 0 || items_per_page > MAX_ITEMS_PER_PAGE {
            return Err(ConfigError::Load(format!(
                "ITEMS_PER_PAGE must be between 1 and {}",
                MAX_ITEMS_PER_PAGE
            )));
        }
        let max_body_bytes = match get("MAX_BODY_BYTES") {
            Some(v) => parse_var("MAX_BODY_BYTES", v)?,
            None => DEFAULT_MAX_BODY_BYTES,
        };
        let not_found_path = get("NOT_FOUND_PATH").unwrap_or(DEFAULT_NOT_FOUND_PATH);
        check_not_found_path(not_found_path)?;
        let app_name = get("APP_NAME").unwrap_or(DEFAULT_APP_NAME);
        if !app_name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(ConfigError::Load(format!("invalid APP_NAME: {}", app_name)));
        }

        Ok(Settings {
            bind_addr,
            database_url: get("DATABASE_URL").map(str::to_string),
            not_found_path: not_found_path.to_string(),
            items_per_page,
            max_body_bytes,
            app_name: app_name.to_string(),
        })
    }
}

/// A static path of its own: no captures or wildcards, and nothing the server already serves.
fn check_not_found_path(path: &str) -> Result<(), ConfigError> {
    if !path.starts_with('/') {
        return Err(ConfigError::Load("NOT_FOUND_PATH must start with '/'".into()));
    }
    if path
        .split('/')
        .any(|segment| segment.starts_with(':') || segment.starts_with('*'))
    {
        return Err(ConfigError::Load(format!(
            "NOT_FOUND_PATH must be a static path: {}",
            path
        )));
    }
    let trimmed = path.trim_end_matches('/');
    let reserved = RESERVED_PATHS.contains(&trimmed)
        || RESERVED_PREFIXES
            .iter()
            .any(|p| trimmed == *p || trimmed.starts_with(&format!("{}/", p)));
    if reserved {
        return Err(ConfigError::Load(format!(
            "NOT_FOUND_PATH collides with a served route: {}",
            path
        )));
    }
    Ok(())
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Load(format!("invalid {}: {}", name, value)))
}
