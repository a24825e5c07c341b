use clap::Parser;
use dnsrelay_domain::CliOverrides;
use std::net::SocketAddr;
use tracing::info;

mod bootstrap;
mod di;
mod lifecycle;
mod server;

#[derive(Parser)]
#[command(name = "dnsrelay")]
#[command(version)]
#[command(about = "Caching DNS forwarder that relays client queries to a single upstream resolver")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS listening port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream resolver (ip:port)
    #[arg(short = 'u', long, value_name = "ADDR")]
    upstream: Option<SocketAddr>,

    /// Cache snapshot file
    #[arg(long, value_name = "FILE")]
    cache_file: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind,
        upstream: cli.upstream,
        snapshot_path: cli.cache_file,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting dnsrelay v{}", env!("CARGO_PKG_VERSION"));

    server::run_dns_relay(&config).await?;

    info!("Server shutdown complete");
    Ok(())
}
