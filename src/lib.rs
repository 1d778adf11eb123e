pub mod cli;
pub mod conversation;
pub mod llm;
pub mod models;
pub mod server;

use cli::Args;
use log::info;
use server::Server;
use std::error::Error;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Relay Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Provider Base URL: {}", args.provider_base_url);
    info!("Chat Model: {}", args.chat_model);
    info!("Credential: {}", if args.credential().is_some() { "set" } else { "missing" });
    info!("TLS Enabled: {}", args.enable_tls);
    info!("---------------------------");

    let server = Server::new(args)?;
    server.run().await?;

    Ok(())
}
