//! Database bootstrap: create the target database and the album table if missing.

use crate::error::{AppError, ConfigError};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

const ALBUM_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS album (
    id BIGSERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    artist TEXT,
    release_date DATE
)
"#;

/// Connect a small pool, creating the database first when it does not exist.
pub async fn connect(database_url: &str) -> Result<PgPool, AppError> {
    ensure_database_exists(database_url).await?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;
    ensure_album_table(&pool).await?;
    Ok(pool)
}

pub async fn ensure_album_table(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(ALBUM_DDL).execute(pool).await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS album_title_idx ON album (title)")
        .execute(pool)
        .await?;
    Ok(())
}

/// Connects to the `postgres` maintenance database on the same server to check/create the target.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url);
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::Load(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split `postgres://host/name?opts` into (`postgres://host/postgres?opts`, `name`).
/// A URL without a database path yields an empty name: the server default database is used as-is.
fn parse_db_name_from_url(url: &str) -> (String, String) {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let authority_end = url[scheme_end..]
        .find(|c: char| c == '/' || c == '?')
        .map(|i| scheme_end + i);
    let Some(path_start) = authority_end.filter(|i| url[*i..].starts_with('/')).map(|i| i + 1) else {
        return (url.to_string(), String::new());
    };
    let (path, query) = match url[path_start..].split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (&url[path_start..], None),
    };
    let mut admin_url = format!("{}postgres", &url[..path_start]);
    if let Some(q) = query {
        admin_url.push('?');
        admin_url.push_str(q);
    }
    (admin_url, path.trim().to_string())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_database_name() {
        let (admin, name) = parse_db_name_from_url("postgres://u:p@localhost:5432/albums");
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(name, "albums");
    }

    #[test]
    fn keeps_query_on_admin_url() {
        let (admin, name) = parse_db_name_from_url("postgres://localhost/albums?sslmode=disable");
        assert_eq!(admin, "postgres://localhost/postgres?sslmode=disable");
        assert_eq!(name, "albums");
    }

    #[test]
    fn url_without_database_uses_server_default() {
        let (admin, name) = parse_db_name_from_url("postgres://user:pw@localhost:5432");
        assert_eq!(admin, "postgres://user:pw@localhost:5432");
        assert_eq!(name, "");

        let (_, name) = parse_db_name_from_url("postgres://localhost?sslmode=disable");
        assert_eq!(name, "");
        let (_, name) = parse_db_name_from_url("postgres://localhost/");
        assert_eq!(name, "");
    }

    #[tokio::test]
    async fn url_without_database_skips_creation() {
        // No connection is attempted when there is no database name to create.
        ensure_database_exists("postgres://user:pw@localhost:5432").await.unwrap();
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident("my\"db"), "\"my\"\"db\"");
    }
}
