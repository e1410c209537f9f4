//! Command-line entry point for the table-extraction ingestion server.
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tablerag::config::Config;

#[derive(Parser)]
#[command(name = "tablerag-server", version, about = "Table-aware PDF ingestion server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP ingestion server.
    Serve {
        /// Overrides the HOST environment variable.
        #[arg(short = 'H', long)]
        host: Option<String>,
        /// Overrides the PORT environment variable.
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;

    match cli.command.unwrap_or(Commands::Serve { host: None, port: None }) {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            tablerag::api::serve(Arc::new(config)).await?;
        }
    }

    Ok(())
}
