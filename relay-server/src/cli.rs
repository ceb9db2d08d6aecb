use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "relay-server",
    about = "Inference Relay - chat passthrough and image generation gateway",
    version = env!("CARGO_PKG_VERSION"),
    author
)]
pub struct Cli {
    #[arg(short, long, env = "RELAY_PORT", default_value = "3000")]
    pub port: u16,

    #[arg(long, env = "RELAY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "FIREWORKS_API_KEY", hide_env_values = true, help = "Bearer credential for the provider")]
    pub api_key: Option<String>,

    #[arg(long, env = "RELAY_BASE_URL", help = "Provider base URL")]
    pub base_url: Option<String>,

    #[arg(long, env = "RELAY_CHAT_MODEL")]
    pub chat_model: Option<String>,

    #[arg(long, env = "RELAY_IMAGE_MODEL")]
    pub image_model: Option<String>,

    #[arg(long, env = "RELAY_POLL_MAX_ATTEMPTS", help = "Result queries before giving up")]
    pub poll_max_attempts: Option<u32>,

    #[arg(long, env = "RELAY_POLL_INITIAL_DELAY_MS")]
    pub poll_initial_delay_ms: Option<u64>,

    #[arg(long, env = "RELAY_POLL_MAX_DELAY_MS")]
    pub poll_max_delay_ms: Option<u64>,

    #[arg(long, env = "RELAY_POLL_RETRY_TRANSPORT", help = "Keep polling through network errors and 5xx answers")]
    pub poll_retry_transport: bool,

    #[arg(long, env = "RELAY_REQUEST_TIMEOUT_SECS", help = "Timeout for a single provider call")]
    pub request_timeout_secs: Option<u64>,
}
