use crate::config::DatabaseConfig;
use crate::entities::uploaded_files;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use std::time::Duration;
use tracing::info;

pub async fn setup_database(config: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    info!("📂 Database: {}", redact_url(&config.url));

    let mut opt = ConnectOptions::new(&config.url);
    opt.max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(30))
        .acquire_timeout(Duration::from_secs(30))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let db = Database::connect(opt).await?;

    info!("✅ Database connected successfully");

    run_migrations(&db).await?;

    Ok(db)
}

/// Create the upload records table when it does not exist yet.
pub async fn run_migrations(db: &DatabaseConnection) -> anyhow::Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    info!("🔄 Running auto-migrations...");

    let stmt = schema
        .create_table_from_entity(uploaded_files::Entity)
        .if_not_exists()
        .to_owned();
    db.execute(builder.build(&stmt)).await?;
    info!("   - Table 'uploaded_files' checked/created");

    db.execute(sea_orm::Statement::from_string(
        builder,
        "CREATE INDEX IF NOT EXISTS idx_uploaded_files_sub_folder_name ON uploaded_files(sub_folder_name)"
            .to_string(),
    ))
    .await?;

    Ok(())
}

/// Hide the password part of a connection URL before it is logged.
fn redact_url(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(mut parsed) if parsed.password().is_some() => {
            let _ = parsed.set_password(Some("****"));
            parsed.to_string()
        }
        _ => raw.to_string(),
    }
}
