use std::env;

use anyhow::{bail, Context, Result};
use axum::http::HeaderValue;

use crate::handlers::docs::API_DOCS_PATH;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub port: u16,
    pub cors_origin: HeaderValue,
    pub docs_path: String,
}

impl Config {
    /// Loads `.env` (if any) and reads the service settings from the environment.
    pub fn init() -> Result<Config> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a number: {raw}"))?,
            None => 10,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("PORT is not a valid port: {raw}"))?,
            None => 8080,
        };

        let origin = lookup("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:3000".to_string());
        let cors_origin = HeaderValue::from_str(&origin)
            .with_context(|| format!("CORS_ORIGIN is not a valid header value: {origin}"))?;

        let docs_path = lookup("DOCS_PATH").unwrap_or_else(|| "/swagger-ui.html".to_string());
        let taken = ["/", "/posts", "/post", API_DOCS_PATH];
        if !docs_path.starts_with('/') || taken.contains(&docs_path.as_str()) {
            bail!("DOCS_PATH must be an absolute path not used by another route: {docs_path}");
        }
        // Served as a literal route and echoed in the Location header.
        if !docs_path
            .chars()
            .all(|c| c.is_ascii_graphic() && !matches!(c, '{' | '}' | '*' | '?' | '#'))
        {
            bail!("DOCS_PATH must be a plain path of visible ASCII characters: {docs_path}");
        }

        Ok(Config {
            database_url,
            max_connections,
            port,
            cors_origin,
            docs_path,
        })
    }
}
