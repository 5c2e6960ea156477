use clap::Parser;
use redeemd_core::{ADMIN_KEY_VAR, DEFAULT_LISTEN_ADDR};
use redeemd_server::ServerConfig;
use std::io::IsTerminal;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "redeemd")]
#[command(about = "Serves static files gated by per-file redeem codes", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory to serve files from
    #[arg(long)]
    root: PathBuf,

    /// Location of the redeem-code store file (created if absent)
    #[arg(long)]
    store: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
    listen: SocketAddr,

    /// Admin shared secret; prefer the REDEEMD_ADMIN_KEY environment
    /// variable to keep it out of process listings
    #[arg(long, env = ADMIN_KEY_VAR, hide_env_values = true)]
    admin_key: String,
}

/// Initialize the tracing system
///
/// `RUST_LOG` controls the filter, defaulting to `info`. Output goes to
/// stderr, without ANSI colors when stderr is not a terminal.
fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    init_tracing().map_err(|e| eyre::eyre!("failed to initialize tracing: {e}"))?;

    let config = ServerConfig {
        root: cli.root,
        store: cli.store,
        listen: cli.listen,
        admin_key: cli.admin_key,
    };

    redeemd_server::serve(config)
        .await
        .map_err(|e| eyre::eyre!("{e}"))?;

    Ok(())
}
