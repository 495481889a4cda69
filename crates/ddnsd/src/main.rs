// # ddnsd - DDNS Daemon
//
// Thin integration layer: reads configuration from environment variables,
// wires the IP lookup and Porkbun provider into the reconciler, and runs
// the loop until a shutdown signal arrives. All reconciliation logic
// lives in homelab-ddns.
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// ### Provider (required)
// - `PORKBUN_API_KEY`: Porkbun API key
// - `PORKBUN_SECRET_KEY`: Porkbun secret API key
// - `PORKBUN_DOMAIN`: Domain whose record is kept in sync
//
// ### Record
// - `PORKBUN_SUBDOMAIN`: Subdomain label, "@" for the apex (default: @)
// - `DDNS_TTL`: Record TTL in seconds (default: 300)
//
// ### Loop
// - `DDNS_INTERVAL`: Poll interval in seconds (default: 300)
// - `DDNS_IP_ENDPOINTS`: Comma-separated override of the IP lookup list
// - `DDNS_LOG_LEVEL`: trace|debug|info|warn|error (default: info)
//
// ## Example
//
// ```bash
// export PORKBUN_API_KEY=pk1_...
// export PORKBUN_SECRET_KEY=sk1_...
// export PORKBUN_DOMAIN=example.com
// export PORKBUN_SUBDOMAIN=@
// export DDNS_INTERVAL=300
//
// ddnsd
// ```

use anyhow::Result;
use homelab_ddns::{DdnsConfig, Reconciler, ReconcilerEvent, RecordSpec, TokioClock};
use homelab_ip_lookup::HttpIpLookup;
use homelab_porkbun::PorkbunProvider;
use std::env;
use std::process::ExitCode;
use tracing::{debug, error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

/// Exit codes, following systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum DaemonExitCode {
    CleanShutdown = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<DaemonExitCode> for ExitCode {
    fn from(code: DaemonExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    api_key: String,
    secret_key: String,
    domain: String,
    subdomain: String,
    ttl_secs: u32,
    interval_secs: u64,
    ip_endpoints: Option<Vec<String>>,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: env::var("PORKBUN_API_KEY").unwrap_or_default(),
            secret_key: env::var("PORKBUN_SECRET_KEY").unwrap_or_default(),
            domain: env::var("PORKBUN_DOMAIN").unwrap_or_default(),
            subdomain: env::var("PORKBUN_SUBDOMAIN").unwrap_or_else(|_| "@".to_string()),
            ttl_secs: parse_env("DDNS_TTL", 300)?,
            interval_secs: parse_env("DDNS_INTERVAL", 300)?,
            ip_endpoints: env::var("DDNS_IP_ENDPOINTS").ok().map(|list| {
                list.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),
            log_level: env::var("DDNS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate the configuration
    ///
    /// Missing credentials or domain are fatal: the daemon must not enter
    /// the loop without them.
    fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() || self.secret_key.is_empty() || self.domain.is_empty() {
            anyhow::bail!(
                "PORKBUN_API_KEY, PORKBUN_SECRET_KEY, and PORKBUN_DOMAIN must be set"
            );
        }

        if self.subdomain.is_empty() {
            anyhow::bail!("PORKBUN_SUBDOMAIN cannot be empty (use \"@\" for the apex)");
        }

        if self.interval_secs == 0 {
            anyhow::bail!("DDNS_INTERVAL must be > 0 seconds");
        }

        if let Some(ref endpoints) = self.ip_endpoints {
            if endpoints.is_empty() {
                anyhow::bail!("DDNS_IP_ENDPOINTS must contain at least one URL when set");
            }
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => anyhow::bail!(
                "DDNS_LOG_LEVEL '{}' is not valid. Valid levels: trace, debug, info, warn, error",
                other
            ),
        }

        Ok(())
    }

    fn record_spec(&self) -> RecordSpec {
        RecordSpec {
            domain: self.domain.clone(),
            subdomain: self.subdomain.clone(),
            ttl_secs: self.ttl_secs,
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("{} has an invalid value: {}", name, raw)),
        Err(_) => Ok(default),
    }
}

fn main() -> ExitCode {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return DaemonExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return DaemonExitCode::ConfigError.into();
    }

    // Initialize tracing
    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DaemonExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DaemonExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        match run_daemon(config).await {
            Ok(()) => DaemonExitCode::CleanShutdown,
            Err(e) => {
                error!("Daemon error: {}", e);
                DaemonExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Wire the components and run the loop until a signal arrives
async fn run_daemon(config: Config) -> Result<()> {
    let record = config.record_spec();
    info!("Porkbun DDNS started for {}", record.record_name());
    info!("Update interval: {} seconds", config.interval_secs);

    let lookup = match config.ip_endpoints.clone() {
        Some(endpoints) => HttpIpLookup::with_endpoints(endpoints),
        None => HttpIpLookup::new(),
    };

    let provider = PorkbunProvider::new(&config.api_key, &config.secret_key)?;

    let mut ddns_config = DdnsConfig::new(record);
    ddns_config.interval_secs = config.interval_secs;

    let (mut reconciler, mut events) = Reconciler::new(
        Box::new(lookup),
        Box::new(provider),
        Box::new(TokioClock),
        ddns_config,
    )?;

    // Surface engine events for external monitoring. The reconciler
    // already logs every transition at info, so these stay at debug.
    let event_logger = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            log_event(&event);
        }
    });

    tokio::select! {
        _ = reconciler.run() => {
            // run() only returns on process teardown
        }
        signal = wait_for_shutdown() => {
            info!("Received {}, shutting down", signal?);
        }
    }

    event_logger.abort();
    Ok(())
}

fn log_event(event: &ReconcilerEvent) {
    debug!("reconciler event: {:?}", event);
}

/// Wait for SIGTERM or SIGINT
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGTERM handler: {}", e))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGINT handler: {}", e))?;

    let name = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };

    Ok(name)
}

/// Wait for CTRL-C (non-Unix fallback)
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to wait for CTRL-C: {}", e))?;
    Ok("SIGINT")
}
