use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Provider Args ---
    /// Bearer credential for the hosted chat-completion provider.
    #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
    pub hf_token: Option<String>,

    /// Base URL of the provider; `/v1/chat/completions` is appended to it.
    #[arg(long, env = "PROVIDER_BASE_URL", default_value = crate::llm::DEFAULT_BASE_URL)]
    pub provider_base_url: String,

    /// Model identifier attached to every forwarded request.
    #[arg(long, env = "CHAT_MODEL", default_value = crate::llm::DEFAULT_MODEL)]
    pub chat_model: String,

    // --- Server Args ---
    /// Host address and port for the relay to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:3000")]
    pub server_addr: String,

    /// Optional path to the TLS certificate file (PEM format). Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format). Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,
}

impl Args {
    /// The credential with blank values treated as absent.
    pub fn credential(&self) -> Option<String> {
        self.hf_token.clone().filter(|k| !k.trim().is_empty())
    }
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Terminal chat widget for the relay", long_about = None)]
pub struct ClientArgs {
    /// Base URL of a running relay; requests go to `<url>/api/chat`.
    #[arg(long, env = "RELAY_URL", default_value = "http://127.0.0.1:3000")]
    pub relay_url: String,
}
