use clap::{Parser, Subcommand};
use colored::*;
use std::process;

mod cli;

use cli::todos::TodosCommands;
use todolux_cli::{init_tracing, run_server, Config};
use todolux_client::ApiClient;
use todolux_config::constants::{DEFAULT_API_URL, TODOLUX_API_URL};

#[derive(Parser)]
#[command(name = "todolux")]
#[command(about = "TodoLux - todo list server and command-line client")]
#[command(version)]
struct Cli {
    /// Base URL of the TodoLux API
    #[arg(long, global = true, env = TODOLUX_API_URL, default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    #[command(flatten)]
    Todos(TodosCommands),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match handle_command(cli.command, &cli.api_url).await {
        Ok(_) => {}
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

async fn handle_command(command: Commands, api_url: &str) -> anyhow::Result<()> {
    match command {
        Commands::Serve { port } => {
            let mut config = Config::from_env()?;
            if let Some(port) = port {
                config = config.with_port(port)?;
            }
            run_server(config).await?;
            Ok(())
        }
        Commands::Todos(command) => {
            cli::todos::handle_todos_command(command, ApiClient::new(api_url)).await
        }
    }
}
