//! Database bootstrap: create the database if missing, apply DDL, seed rows, and verify the
//! connection at startup. All statements are idempotent.

use crate::config::redact_password;
use crate::error::{AppError, ConfigError};
use crate::model::SAMPLE_TABLE;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, Connection, PgPool};
use std::str::FromStr;

/// Rows inserted by [`seed`] when no row with the same name exists.
pub const SEED_NAMES: [&str; 3] = ["Sample Data 1", "Sample Data 2", "Sample Data 3"];

/// Create `sample_table` and its name index if they do not exist.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        SAMPLE_TABLE
    );
    sqlx::query(&ddl).execute(pool).await?;
    let index = format!(
        "CREATE INDEX IF NOT EXISTS idx_{0}_name ON {0} (name)",
        SAMPLE_TABLE
    );
    sqlx::query(&index).execute(pool).await?;
    tracing::debug!(table = SAMPLE_TABLE, "schema ensured");
    Ok(())
}

/// Insert the seed rows that are not present yet (matched by name). Returns rows inserted.
pub async fn seed(pool: &PgPool) -> Result<u64, AppError> {
    let sql = format!(
        "INSERT INTO {0} (name) SELECT $1::VARCHAR WHERE NOT EXISTS (SELECT 1 FROM {0} WHERE name = $1)",
        SAMPLE_TABLE
    );
    let mut inserted = 0;
    for name in SEED_NAMES {
        inserted += sqlx::query(&sql)
            .bind(name)
            .execute(pool)
            .await?
            .rows_affected();
    }
    if inserted > 0 {
        tracing::info!(inserted, "seed rows inserted");
    }
    Ok(inserted)
}

/// Run `SELECT version()` and log the server version. Called once at startup; an error
/// here aborts boot.
pub async fn check_connection(pool: &PgPool, redacted_url: &str) -> Result<String, AppError> {
    let (version,): (String,) = sqlx::query_as("SELECT version()")
        .fetch_one(pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, url = %redacted_url, "database connection check failed");
            AppError::Db(e)
        })?;
    tracing::info!(url = %redacted_url, version = %version, "database connection ok");
    Ok(version)
}

/// Database on every PostgreSQL server that a fresh install can always connect to.
const MAINTENANCE_DB: &str = "postgres";

/// Create the database named in `database_url` if it is missing. The check runs over a
/// single connection to the maintenance database on the same server.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (maintenance, target) = maintenance_target(database_url)?;
    let Some(name) = target.filter(|n| !n.is_empty() && n != MAINTENANCE_DB) else {
        return Ok(());
    };
    let mut conn = maintenance.connect().await?;
    let (present,): (bool,) =
        sqlx::query_as("SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&name)
            .fetch_one(&mut conn)
            .await?;
    if present {
        tracing::debug!(database = %name, "database present");
    } else {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %name, "database created");
    }
    conn.close().await?;
    Ok(())
}

/// Connection options for the maintenance database, plus the database name the URL asks for.
/// Host, credentials and TLS settings are carried over unchanged.
fn maintenance_target(
    database_url: &str,
) -> Result<(PgConnectOptions, Option<String>), ConfigError> {
    let options =
        PgConnectOptions::from_str(database_url).map_err(|e| ConfigError::InvalidValue {
            key: "DATABASE_URL",
            value: format!("{} ({})", redact_password(database_url), e),
        })?;
    let target = options.get_database().map(str::to_owned);
    Ok((options.database(MAINTENANCE_DB), target))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maintenance_options_keep_server_and_swap_database() {
        let (opts, target) = maintenance_target("postgres://app:pw@db:5433/appdb").unwrap();
        assert_eq!(target.as_deref(), Some("appdb"));
        assert_eq!(opts.get_database(), Some("postgres"));
        assert_eq!(opts.get_host(), "db");
        assert_eq!(opts.get_port(), 5433);
        assert_eq!(opts.get_username(), "app");
    }

    #[test]
    fn query_parameters_are_accepted() {
        let (_, target) =
            maintenance_target("postgres://localhost/appdb?sslmode=disable").unwrap();
        assert_eq!(target.as_deref(), Some("appdb"));
    }

    #[test]
    fn malformed_url_is_a_config_error_without_the_password() {
        let err = maintenance_target("postgres://app:s3cret@db:notaport/appdb").unwrap_err();
        match err {
            ConfigError::InvalidValue { key, value } => {
                assert_eq!(key, "DATABASE_URL");
                assert!(!value.contains("s3cret"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn malformed_url_aborts_before_connecting() {
        let err = ensure_database_exists("not a url").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::InvalidValue { key: "DATABASE_URL", .. })
        ));
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident("app\"db"), "\"app\"\"db\"");
    }
}
