pub mod models;
pub mod test_utils;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::path::Path;

/// Turns a configured database location into a SQLite connection URL.
///
/// `sqlite:` URLs are used as-is; anything else is treated as a file path,
/// created on first use.
pub fn database_url(path_or_url: &str) -> String {
    if path_or_url.starts_with("sqlite:") {
        return path_or_url.to_owned();
    }
    format!("sqlite://{path_or_url}?mode=rwc")
}

/// Opens a connection pool for `path_or_url`.
pub async fn connect(path_or_url: &str) -> Result<DatabaseConnection, DbErr> {
    let url = database_url(path_or_url);
    if url.starts_with("sqlite://") {
        // SQLite won't create intermediate directories.
        if let Some(parent) = Path::new(path_or_url).parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Could not create database directory {}: {e}", parent.display());
            }
        }
    }

    let mut opts = ConnectOptions::new(url);
    opts.sqlx_logging(false);
    Database::connect(opts).await
}
