use anyhow::{Context, Result};
use news_portal::application::{
    ports::notification::{Broadcaster, Mailer},
    services::{Adapters, ApplicationServices, Repositories},
};
use news_portal::config::AppConfig;
use news_portal::infrastructure::{
    database,
    notifications::{ConsoleMailer, DisabledBroadcaster, HttpBroadcaster, SmtpMailer},
    repositories::{
        PostgresContentReadRepository, PostgresContentWriteRepository,
        PostgresPublisherRepository, PostgresSubscriptionRepository, PostgresUserRepository,
    },
    security::{password::Argon2PasswordHasher, token::BiscuitTokenManager},
    time::SystemClock,
};
use news_portal::presentation::{
    http::{
        routes::build_router,
        state::{HttpState, RouterSettings},
    },
    web::templates,
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
    templates::ensure_loaded().map_err(anyhow::Error::msg)?;

    let pool = database::init_pool(config.database_url())
        .await
        .context("connecting to the database")?;
    database::run_migrations(&pool)
        .await
        .context("running migrations")?;

    let repos = Repositories {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        publishers: Arc::new(PostgresPublisherRepository::new(pool.clone())),
        subscriptions: Arc::new(PostgresSubscriptionRepository::new(pool.clone())),
        content_write: Arc::new(PostgresContentWriteRepository::new(pool.clone())),
        content_read: Arc::new(PostgresContentReadRepository::new(pool)),
    };

    let mailer: Arc<dyn Mailer> = match config.smtp() {
        Some(settings) => {
            tracing::info!(host = %settings.host, "delivering mail over SMTP");
            Arc::new(SmtpMailer::new(settings)?)
        }
        None => {
            tracing::info!("SMTP_HOST unset; mail is written to the log");
            Arc::new(ConsoleMailer)
        }
    };
    let broadcaster: Arc<dyn Broadcaster> = match config.broadcast() {
        Some(settings) => Arc::new(HttpBroadcaster::new(
            settings.endpoint.clone(),
            settings.bearer_token.clone(),
            config.notification_timeout(),
        )?),
        None => {
            tracing::info!("X_API_BEARER_TOKEN unset; broadcasts are disabled");
            Arc::new(DisabledBroadcaster)
        }
    };

    let adapters = Adapters {
        password_hasher: Arc::new(Argon2PasswordHasher),
        token_manager: Arc::new(BiscuitTokenManager::new(
            config.biscuit_private_key(),
            config.token_ttl(),
        )?),
        clock: Arc::new(SystemClock),
        mailer,
        broadcaster,
    };

    let services = Arc::new(ApplicationServices::new(
        repos,
        adapters,
        config.notification_settings(),
    ));

    let state = HttpState::new(
        services,
        RouterSettings {
            allowed_origins: config.allowed_origins().to_vec(),
            login_rate_limit: config.login_rate_limit(),
        },
    );
    let app = build_router(state);

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
            tracing::error!(error = %err, "failed to listen for CTRL+C");
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
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
