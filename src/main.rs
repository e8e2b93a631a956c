use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use webxio_functions::api;
use webxio_functions::config::Config;
use webxio_functions::mail::{EmailDispatcher, FunctionInvoker, InProcessDispatcher, SmtpMailer};
use webxio_functions::profiles::SupabaseProfiles;
use webxio_functions::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }

    tracing::info!("Starting WebXIO functions...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        host = %config.server_host,
        port = %config.server_port,
        smtp_host = %config.smtp_host,
        smtp_port = config.smtp_port,
        "Configuration loaded"
    );

    if config.function_secret.is_none() {
        tracing::warn!("FUNCTION_SECRET not set, function endpoints accept any caller");
    }
    if config.smtps_on_submission_port() {
        tracing::warn!(
            "SMTP_TLS=tls on port 587, most relays expect STARTTLS there (SMTP_TLS=starttls)"
        );
    }
    if config.supabase_url.is_empty() {
        tracing::warn!("SUPABASE_URL not set, inviter lookups will fall back to a generic name");
    }

    let mailer = Arc::new(SmtpMailer::new(&config));
    let profiles = Arc::new(SupabaseProfiles::from_config(&config));

    let dispatcher: Arc<dyn EmailDispatcher> = match &config.send_email_function_url {
        Some(url) => {
            tracing::info!(url = %url, "Invitations delegate to remote send-email function");
            Arc::new(FunctionInvoker::new(url, config.invocation_token()))
        }
        None => Arc::new(InProcessDispatcher::new(mailer.clone(), &config.email_from)),
    };

    let addr: SocketAddr = config.server_addr().parse()?;
    let state = AppState::new(config, mailer, profiles, dispatcher);

    // Build router
    let app = api::create_router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Handle shutdown signals
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, shutting down...");
        },
    }
}
