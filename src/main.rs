use anyhow::{Context, Result};
use backoffice_core::application::{
    ports::{media::MediaStore, security::PasswordHasher, session::SessionStore, time::Clock},
    services::ApplicationServices,
};
use backoffice_core::config::AppConfig;
use backoffice_core::domain::{
    audit::AuditStore, client::ClientDirectory, scenario::ScenarioRepository,
    user::AdminUserRepository,
};
use backoffice_core::infrastructure::{
    audit::JsonlAuditStore,
    database,
    media::LocalMediaStore,
    repositories::{
        PostgresAdminUserRepository, PostgresClientDirectory, PostgresScenarioRepository,
    },
    security::{password::Argon2PasswordHasher, session_store::InMemorySessionStore},
    time::SystemClock,
};
use backoffice_core::presentation::http::{
    routes::build_router_with_rate_limiter,
    state::{HttpSettings, HttpState},
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let audit_store: Arc<dyn AuditStore> =
        Arc::new(JsonlAuditStore::new(config.audit_log_path().clone()));
    let user_repo: Arc<dyn AdminUserRepository> =
        Arc::new(PostgresAdminUserRepository::new(pool.clone()));
    let scenario_repo: Arc<dyn ScenarioRepository> =
        Arc::new(PostgresScenarioRepository::new(pool.clone()));
    let client_directory: Arc<dyn ClientDirectory> =
        Arc::new(PostgresClientDirectory::new(pool));
    let media = LocalMediaStore::new(config.upload_dir().clone());
    tracing::info!(upload_dir = %media.root().display(), "scenario uploads configured");
    let media_store: Arc<dyn MediaStore> = Arc::new(media);
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);
    let session_store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let session_ttl = chrono::Duration::from_std(config.session_ttl())
        .context("SESSION_TTL_SECONDS is out of range")?;

    let services = Arc::new(ApplicationServices::new(
        audit_store,
        user_repo,
        scenario_repo,
        client_directory,
        media_store,
        password_hasher,
        session_store,
        clock,
        session_ttl,
    ));

    let state = HttpState {
        services,
        settings: Arc::new(HttpSettings {
            max_page_size: config.audit_max_page_size(),
            allowed_origins: config.allowed_origins().to_vec(),
        }),
    };

    tracing::info!(
        audit_log = %config.audit_log_path().display(),
        login_rate_limit = config.login_rate_limit(),
        "audit trail configured"
    );

    let app = build_router_with_rate_limiter(state, config.login_rate_limit());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
