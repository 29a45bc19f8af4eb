//! stratboard HTTP server entry point.
//!
//! Binary name: `stratboard`
//!
//! Parses CLI arguments, initializes services, then starts the HTTP
//! server or emits shell completions.

mod http;
mod state;

use clap::{Parser, Subcommand};
use clap_complete::{generate, Shell};

use state::AppState;

/// Chat with your personal board of advisors.
#[derive(Parser)]
#[command(name = "stratboard", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Port to listen on (overrides the config file).
        #[arg(long)]
        port: Option<u16>,

        /// Host to bind (overrides the config file).
        #[arg(long)]
        host: Option<String>,

        /// Export spans via the OpenTelemetry stdout exporter.
        #[arg(long)]
        otel: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need tracing or app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "stratboard", &mut std::io::stdout());
        return Ok(());
    }

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,stratboard=debug",
        _ => "trace",
    };
    let enable_otel = matches!(&cli.command, Commands::Serve { otel: true, .. });
    stratboard_observe::tracing_setup::init_tracing(filter, enable_otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let Commands::Serve { port, host, .. } = cli.command else {
        unreachable!("completions handled above");
    };

    // Initialize application state (config, store, completion client)
    let state = AppState::init().await?;

    let addr = match (host, port) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => {
            let default_port = state
                .app_config
                .listen_addr
                .rsplit(':')
                .next()
                .unwrap_or("8080")
                .to_string();
            format!("{host}:{default_port}")
        }
        (None, Some(port)) => {
            let default_host = state
                .app_config
                .listen_addr
                .rsplit_once(':')
                .map(|(h, _)| h.to_string())
                .unwrap_or_else(|| "127.0.0.1".to_string());
            format!("{default_host}:{port}")
        }
        (None, None) => state.app_config.listen_addr.clone(),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!(
        "  {} stratboard API listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\n  Server stopped.");
    stratboard_observe::tracing_setup::shutdown_tracing();

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
