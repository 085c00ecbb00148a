use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// estately - property listings with cookie sessions
#[derive(Parser)]
#[command(name = "estately")]
#[command(about = "Property listing web application", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Issue an access/refresh token pair for local testing
    Token {
        /// Claim to embed, as key=value (repeatable)
        #[arg(long = "claim", value_name = "KEY=VALUE")]
        claims: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = estately::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    estately::observability::init_observability(
        config.environment,
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Token { claims } => cli::token::issue(config, claims),
    }
}
