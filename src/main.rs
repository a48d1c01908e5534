use std::sync::Arc;

use anyhow::Result;
use axum::{extract::Request, ServiceExt};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use trainer_service::api::routes::create_app;
use trainer_service::auth::JwtService;
use trainer_service::config::{run_migrations, AppConfig, DatabaseConfig};
use trainer_service::repository::{
    InMemoryTrainerRepository, PgTrainerRepository, TrainerRepository,
};
use trainer_service::services::TrainerService;

fn init_tracing(log_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    init_tracing(&config.log_level);

    let repo: Arc<dyn TrainerRepository> = match DatabaseConfig::from_env()? {
        Some(db_config) => {
            let pool = db_config.create_pool().await?;
            run_migrations(&pool).await?;
            info!("Connected to Postgres, migrations applied");
            Arc::new(PgTrainerRepository::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory storage");
            let repo = InMemoryTrainerRepository::new();
            if config.is_development() {
                repo.seed_demo().await;
                info!("Seeded demo data (trainer user_id=1)");
            }
            Arc::new(repo)
        }
    };

    let app = create_app(
        TrainerService::new(repo),
        JwtService::new(&config.jwt_secret),
    );

    let listener = TcpListener::bind(config.server_address()).await?;
    info!(
        environment = %config.environment,
        "Trainer service starting on http://{}",
        config.server_address()
    );
    info!("Health check available at http://{}/health", config.server_address());

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
