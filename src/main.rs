use campus_radar::{
    AppState,
    campus::{CampusState, InMemoryCampus},
    config::{AppConfig, Env},
    create_router,
    identity::{IdentityState, SupabaseIdentityClient},
    repository::{PostgresRepository, RepositoryState},
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Boots configuration, logging, the profile database, the campus store and the identity
/// provider client, then serves HTTP until the process is stopped.
#[tokio::main]
async fn main() {
    // 1. Configuration (fail-fast on missing production secrets).
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging: RUST_LOG wins, otherwise verbose defaults for local work.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "campus_radar=debug,tower_http=info,axum=trace".into());

    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // JSON lines for the log aggregator.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 3. Profiles database.
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.db_url)
        .await
        .expect("FATAL: Failed to connect to Postgres. Check DATABASE_URL.");
    let repo = Arc::new(PostgresRepository::new(pool)) as RepositoryState;

    // 4. Campus catalogue, starting from the demo campus.
    let campus = Arc::new(InMemoryCampus::seeded()) as CampusState;

    // 5. Identity provider.
    let identity = Arc::new(SupabaseIdentityClient::new(
        &config.supabase_url,
        &config.supabase_anon_key,
    )) as IdentityState;

    let bind_addr = config.bind_addr.clone();
    let app = create_router(AppState {
        repo,
        campus,
        identity,
        config,
    });

    let listener = TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("FATAL: cannot bind {bind_addr}: {e}"));

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at /swagger-ui");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {:?}", e);
    }
}
