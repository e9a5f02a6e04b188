use dotenvy::dotenv;
use shop_catalog::config::{catalog, database, Settings};
use shop_catalog::core::seed::seed_catalog;
use shop_catalog::errors::Result;
use shop_catalog::server::start_server;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also be set externally
    dotenv().ok();

    // 3. Runtime settings
    let settings = Settings::from_env()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;

    // 4. Database connection and schema
    let db = database::create_connection(&settings.database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Optional catalog seed
    if let Some(path) = &settings.catalog_seed {
        let config = catalog::load_catalog(path)?;
        seed_catalog(&db, &settings.storage(), settings.variant_failure, &config)
            .await
            .inspect_err(|e| error!("Failed to seed catalog: {}", e))?;
    }

    // 6. Serve the read API
    start_server(&settings, db).await
}
