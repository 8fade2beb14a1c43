//! Modatepe Restoran & Konaklama site service
//!
//! Serves the locale-routed site:
//! - Redirects unprefixed page paths to the default locale (tr)
//! - Resolves page context (translations, menu, posts) per locale
//! - Relays contact and feedback form submissions by SMTP, rate limited per client

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};

use api::{middleware::RateLimitConfig, router, AppState};
use mailer::{Mailer, SmtpConfig, SmtpMailer};
use site_core::{ContentStore, SystemClock};
use telemetry::{health, init_tracing_from_env};

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    /// Directory holding `locales/`, `posts/` and `menu.json`
    #[serde(default = "default_content_dir")]
    content_dir: String,

    #[serde(default)]
    smtp: SmtpConfig,

    #[serde(default)]
    rate_limit: RateLimitConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_content_dir() -> String {
    "content".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            content_dir: default_content_dir(),
            smtp: SmtpConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install rustls crypto provider BEFORE any TLS operations
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("rustls crypto provider was already installed");
    }

    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing_from_env();

    info!("Starting Modatepe site v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;

    info!(
        smtp_host = %config.smtp.host,
        smtp_port = config.smtp.port,
        smtp_user = config.smtp.username.as_deref().unwrap_or("none"),
        content_dir = %config.content_dir,
        "Loaded config"
    );

    let content = ContentStore::load(&config.content_dir)
        .with_context(|| format!("Failed to load content from {}", config.content_dir))?;

    let smtp = Arc::new(SmtpMailer::new(&config.smtp).context("Failed to create SMTP mailer")?);
    check_health(&smtp).await;

    let state = AppState::with_rate_limit(
        smtp.clone() as Arc<dyn Mailer>,
        content,
        config.rate_limit.clone(),
        Arc::new(SystemClock),
    );

    let _rate_limiter_cleanup = state.start_rate_limiter_cleanup();
    info!(
        every_secs = config.rate_limit.cleanup_interval_secs,
        "Started rate limiter cleanup task"
    );

    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("MODATEPE")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    Ok(config)
}

/// Flat environment overrides for nested SMTP keys.
///
/// `GMAIL_USER` / `GMAIL_APP_PASSWORD` are accepted so existing deployments
/// keep working; the `MODATEPE_SMTP_*` names win when both are set.
fn apply_env_overrides(config: &mut Config, var: impl Fn(&str) -> Option<String>) {
    if let Some(user) = var("GMAIL_USER") {
        config.smtp.username = Some(user);
    }
    if let Some(password) = var("GMAIL_APP_PASSWORD") {
        config.smtp.password = Some(password);
    }

    if let Some(host) = var("MODATEPE_SMTP_HOST") {
        config.smtp.host = host;
    }
    if let Some(port) = var("MODATEPE_SMTP_PORT").and_then(|p| p.parse().ok()) {
        config.smtp.port = port;
    }
    if let Some(user) = var("MODATEPE_SMTP_USERNAME") {
        config.smtp.username = Some(user);
    }
    if let Some(password) = var("MODATEPE_SMTP_PASSWORD") {
        config.smtp.password = Some(password);
    }
    if let Some(recipient) = var("MODATEPE_SMTP_RECIPIENT") {
        config.smtp.recipient = Some(recipient);
    }
    if let Some(sender) = var("MODATEPE_SMTP_SENDER") {
        config.smtp.sender = Some(sender);
    }
    if let Some(dir) = var("MODATEPE_CONTENT_DIR") {
        config.content_dir = dir;
    }
}

/// Probe the SMTP server once on startup.
async fn check_health(smtp: &SmtpMailer) {
    if mailer::health::check_connection(smtp).await {
        health().mailer.set_healthy();
        info!("SMTP connection: healthy");
    } else {
        health().mailer.set_unhealthy("Connection failed");
        error!("SMTP connection: unhealthy, form submissions will fail until it recovers");
    }
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
