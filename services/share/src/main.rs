use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use common::auth::{JwtConfig, JwtVerifier};
use common::database::{DatabaseConfig, init_pool};

use share::projects::ProjectReader;
use share::routes;
use share::state::AppState;
use share::store::{ShareConfig, ShareStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting share service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Initialize the token verifier
    let jwt_config = JwtConfig::from_env()?;
    let jwt_verifier = JwtVerifier::new(&jwt_config)?;

    // Initialize the share store with its configured backends
    let share_config = ShareConfig::from_env();
    let share_store = ShareStore::new(&share_config)?;

    info!("Share service initialized successfully");

    let app_state = AppState {
        share_store,
        project_reader: ProjectReader::new(pool),
        jwt_verifier,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3001").await?;
    info!("Share service listening on 0.0.0.0:3001");

    axum::serve(listener, app).await?;

    Ok(())
}
