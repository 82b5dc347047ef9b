mod logger;
mod telemetry;
mod web;

use clap::Parser;
use std::process::ExitCode;

use crate::web::{Config, ServerError};

#[derive(Parser)]
#[command(name = "launchpad-dev-server")]
#[command(about = "Local stand-in for the launchpad firmware web server")]
struct Cli {
    /// Port to run the server on
    #[arg(short, long)]
    port: Option<u16>,
    /// YAML config file (bind host, port, frontend root)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    logger::init_logger();
    let cli = Cli::parse();

    let mut config = match cli.config.as_deref() {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to load config {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };
    if let Some(port) = cli.port {
        config.web.port = port;
    }

    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(ServerError::PortInUse { port }) => {
            log::error!("Port {} is already in use. Try a different port:", port);
            log::error!("    launchpad-dev-server --port {}", port.saturating_add(1));
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("Error starting server: {}", e);
            ExitCode::FAILURE
        }
    }
}
