//! edge-admin-proxy CLI
//!
//! HTTP proxy for EdgeX, ChirpStack and Vault container administration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use edge_admin_proxy::orchestration::AdminService;
use edge_admin_proxy::{
    ConfigLoadOptions, ConfigLoader, ContainerCommandExecutor, ProxyConfig, ProxyError, logging,
    server,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

/// HTTP proxy for EdgeX, ChirpStack and Vault container administration
#[derive(Parser)]
#[command(name = "edge-admin-proxy")]
#[command(version)]
#[command(about = "HTTP proxy for EdgeX, ChirpStack and Vault container administration", long_about = None)]
struct Cli {
    /// Config file (defaults to ./.admin-proxy.yaml when present)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to bind, e.g. 0.0.0.0:8000
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Create an EdgeX proxy user and print its password
    GeneratePassword {
        #[arg(value_name = "USERNAME")]
        username: String,
    },

    /// Create a ChirpStack API key
    CreateApiKey {
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Print the Vault root token(s)
    Tokens,

    /// Validate and print the effective configuration
    CheckConfig,
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Commands::Serve { .. } => "info",
        _ => "warn",
    };
    logging::init(default_filter);

    let bind_override = match &cli.command {
        Commands::Serve { bind } => bind.clone(),
        _ => None,
    };
    let config = ConfigLoader::load(ConfigLoadOptions {
        config_path: cli.config,
        search_dir: None,
        env: std::env::vars().collect(),
        bind_override,
    })
    .await
    .context("failed to load configuration")?;

    if let Commands::CheckConfig = cli.command {
        print!("{}", serde_yaml::to_string(&config)?);
        return Ok(0);
    }

    let service = build_service(config.clone());

    match cli.command {
        Commands::Serve { .. } => {
            let addr: SocketAddr = config
                .server
                .bind
                .parse()
                .with_context(|| format!("invalid bind address {}", config.server.bind))?;
            server::serve(addr, service).await?;
            Ok(0)
        }
        Commands::GeneratePassword { username } => {
            print_outcome(service.generate_password(&username).await)
        }
        Commands::CreateApiKey { name } => print_outcome(service.create_api_key(&name).await),
        Commands::Tokens => print_outcome(service.list_root_tokens().await),
        Commands::CheckConfig => Ok(0),
    }
}

fn build_service(config: ProxyConfig) -> AdminService {
    let executor = ContainerCommandExecutor::from_config(&config);
    AdminService::new(Arc::new(config), Arc::new(executor))
}

/// Print the response body the HTTP front would send; exit 0 only on success
fn print_outcome<T: Serialize>(result: Result<T, ProxyError>) -> Result<i32> {
    match result {
        Ok(body) => {
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(0)
        }
        Err(error) => {
            println!("{}", serde_json::to_string_pretty(&error.body())?);
            eprintln!("{} (HTTP {})", error.code(), error.status());
            Ok(1)
        }
    }
}
