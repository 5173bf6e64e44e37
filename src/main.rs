mod artifact;
mod cli;
mod commands;
mod config;
mod error;
mod fingerprint;
mod hardware;
mod output;
mod pipeline;

use clap::Parser;
use cli::{Cli, Commands};
use commands::{
    handle_decode_command,
    handle_generate_command,
    handle_inventory_command,
    handle_show_command,
};
use config::Config;
use output::print_error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let mut cfg = match Config::load(cli.options.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            print_error(&e.to_string());
            std::process::exit(1);
        }
    };
    cli.options.apply(&mut cfg);
    if let Err(e) = cfg.validate() {
        print_error(&e.to_string());
        std::process::exit(1);
    }

    let result = match &cli.command {
        None | Some(Commands::Generate) => handle_generate_command(&cfg).await,
        Some(Commands::Show { format }) => handle_show_command(format).await,
        Some(Commands::Inventory { format }) => handle_inventory_command(format).await,
        Some(Commands::Decode { payload, format }) => handle_decode_command(&cfg, payload, format),
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
