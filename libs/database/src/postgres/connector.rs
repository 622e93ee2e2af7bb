use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::{info, warn};

use super::PostgresConfig;
use crate::common::{retry_with_backoff, RetryConfig};

async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    info!("Connected to PostgreSQL");
    Ok(db)
}

/// Opens a pooled connection, retrying with exponential backoff.
///
/// Startup ordering in containers is loose, so the store may not accept
/// connections yet when the service boots.
///
/// ```ignore
/// let config = PostgresConfig::from_env()?;
/// let db = connect_from_config_with_retry(config, RetryConfig::new().with_max_retries(5)).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry: RetryConfig,
) -> Result<DatabaseConnection, DbErr> {
    let options = config.into_connect_options();

    retry_with_backoff(
        || {
            let opts = options.clone();
            async move {
                connect_with_options(opts).await.inspect_err(|e| {
                    warn!(error = %e, "PostgreSQL connection attempt failed");
                })
            }
        },
        retry,
    )
    .await
}

/// Applies all pending migrations of `M`.
///
/// ```ignore
/// run_migrations::<migration::Migrator>(&db, "shop_api").await?;
/// ```
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!(app = app_name, "Running database migrations");
    M::up(db, None).await?;
    info!(app = app_name, "Migrations completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_with_retry_gives_up_on_bad_url() {
        let config = PostgresConfig::new("not-a-url");
        let retry = RetryConfig::new()
            .with_max_retries(1)
            .with_initial_delay(1)
            .without_jitter();

        let result = connect_from_config_with_retry(config, retry).await;
        assert!(result.is_err());
    }
}
