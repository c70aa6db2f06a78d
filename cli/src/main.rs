//! Zenith CLI entry point

mod chat;
mod config;
mod interface;
mod output;

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use zenith_core::llm::OpenAiClient;
use zenith_core::{AgentBuilder, AgentConfig};

#[derive(Parser)]
#[command(name = "zenith")]
#[command(version = zenith_core::VERSION)]
#[command(about = "Zenith - A CLI-based AI coding agent")]
struct Cli {
    /// Path to a configuration file (.json or .env)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    zenith_core::init_tracing_with_debug(cli.verbose);

    interface::print_banner();

    let config = match config::resolve_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            interface::print_error_panel(&e.to_string());
            std::process::exit(1);
        }
    };

    tracing::debug!(model = %config.model, "Configuration resolved");

    let client = Arc::new(OpenAiClient::new(
        config.api_key.clone(),
        config.api_base.clone(),
        config.model.clone(),
    ));

    let agent = AgentBuilder::new()
        .with_config(AgentConfig {
            description: config.description.clone(),
            system_message: config.system_message.clone(),
            ..AgentConfig::default()
        })
        .with_llm_client(client)
        .with_output(Arc::new(output::ConsoleOutput::new()))
        .build();

    let agent = match agent {
        Ok(agent) => agent,
        Err(e) => {
            interface::print_error_panel(&e.to_string());
            std::process::exit(1);
        }
    };

    if let Err(e) = chat::run(agent).await {
        interface::print_error_panel(&e.to_string());
        std::process::exit(1);
    }
}
