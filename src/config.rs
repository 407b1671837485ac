use clap::{Args, Parser, ValueEnum};
use ipnetwork::IpNetwork;

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub rate_limit: RateLimitConfig,

    #[command(flatten)]
    pub health: HealthConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "PGP_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port for the public API
    #[arg(long, env = "PGP_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Port for liveness and readiness probes
    #[arg(long, env = "PGP_MGMT_PORT", default_value_t = 9090)]
    pub mgmt_port: u16,

    /// Seconds to wait for in-flight requests during shutdown
    #[arg(long, env = "PGP_SHUTDOWN_TIMEOUT_SECS", default_value_t = 5)]
    pub shutdown_timeout_secs: u64,

    /// Comma-separated list of CIDRs to trust for X-Forwarded-For IP extraction
    #[arg(
        long,
        env = "PGP_TRUSTED_PROXIES",
        default_value = "10.0.0.0/8,172.16.0.0/12,192.168.0.0/16,127.0.0.1/32",
        value_delimiter = ','
    )]
    pub trusted_proxies: Vec<IpNetwork>,
}

#[derive(Clone, Debug, Args)]
pub struct RateLimitConfig {
    /// Requests per second allowed per client on /api routes
    #[arg(long = "rate-limit-per-second", env = "PGP_RATE_LIMIT_PER_SECOND", default_value_t = 5)]
    pub per_second: u32,

    /// Burst allowance per client on /api routes
    #[arg(long = "rate-limit-burst", env = "PGP_RATE_LIMIT_BURST", default_value_t = 20)]
    pub burst: u32,
}

#[derive(Clone, Debug, Args)]
pub struct HealthConfig {
    /// How long the readiness probe waits for the inquiry store
    #[arg(long, env = "PGP_HEALTH_STORE_TIMEOUT_MS", default_value_t = 500)]
    pub store_timeout_ms: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "PGP_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// OTLP collector endpoint; traces and metrics are exported only when set
    #[arg(long, env = "PGP_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}
