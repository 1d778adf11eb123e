pub mod api;

use crate::cli::Args;
use crate::llm::chat::new_client;
use crate::llm::ProviderConfig;
use api::{ create_router, AppState };
use std::error::Error;
use std::net::SocketAddr;
use log::{ info, warn, error };

pub struct Server {
    addr: String,
    state: AppState,
    args: Args,
}

impl Server {
    pub fn new(args: Args) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let config = ProviderConfig::from(&args);
        if config.api_key.is_none() {
            warn!("HF_TOKEN is not set. Every relay call will answer with an error envelope.");
        }

        let chat_client = new_client(&config)?;

        Ok(Self {
            addr: args.server_addr.clone(),
            state: AppState { chat_client },
            args,
        })
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let addr = self.addr.parse::<SocketAddr>()?;
        let app = create_router(self.state.clone());

        if self.args.enable_tls {
            let (cert_path, key_path) = match (&self.args.tls_cert_path, &self.args.tls_key_path) {
                (Some(cert), Some(key)) => (cert, key),
                (Some(_), None) | (None, Some(_)) => {
                    error!("Both --tls-cert-path and --tls-key-path must be provided to enable TLS.");
                    return Err("Missing TLS certificate or key path".into());
                }
                (None, None) => {
                    error!("--enable-tls was set but no certificate/key paths provided.");
                    return Err("TLS enabled without cert/key".into());
                }
            };

            info!("TLS enabled. Loading certificate from '{}' and key from '{}'", cert_path, key_path);
            let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
                cert_path,
                key_path
            ).await?;

            info!("Relay listening on: https://{}", addr);
            axum_server::bind_rustls(addr, tls_config)
                .serve(app.into_make_service()).await?;
        } else {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!("Relay listening on: http://{}", addr);
            axum::serve(listener, app.into_make_service()).await?;
        }

        Ok(())
    }
}
