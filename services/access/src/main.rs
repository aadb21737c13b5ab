use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use common::auth::{JwtConfig, JwtVerifier};
use common::database::{DatabaseConfig, init_pool};

use access::repositories::ProjectRepository;
use access::routes;
use access::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting access service");

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

    // Initialize the repository and make sure the schema exists
    let project_repository = ProjectRepository::new(pool.clone());
    project_repository.ensure_schema().await?;

    info!("Access service initialized successfully");

    let app_state = AppState {
        db_pool: pool,
        project_repository,
        jwt_verifier,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    info!("Access service listening on 0.0.0.0:3000");

    axum::serve(listener, app).await?;

    Ok(())
}
