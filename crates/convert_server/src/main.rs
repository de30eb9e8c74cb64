use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use convert_service::ServiceConfig;
use html2go_core::ValidationMode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line overrides. Anything left unset falls back to the
/// environment, then to the built-in defaults.
#[derive(Parser, Debug, Clone)]
#[command(name = "html2go-server")]
#[command(about = "HTML to htmlgo conversion server")]
#[command(version)]
struct Cli {
    /// Bind address
    #[arg(long)]
    host: Option<String>,

    /// Listen port
    #[arg(long, short)]
    port: Option<u16>,

    /// HTTP worker count
    #[arg(long)]
    workers: Option<usize>,

    /// Directory holding index.html and the front-end assets
    #[arg(long)]
    public_dir: Option<PathBuf>,

    /// Run the syntax repair pass on generated code
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    repair: Option<bool>,

    /// Delimiter balance check: off, warn or enforce
    #[arg(long)]
    validation: Option<ValidationMode>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn apply(self, mut config: ServiceConfig) -> ServiceConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(workers) = self.workers {
            config.workers = workers.max(1);
        }
        if let Some(public_dir) = self.public_dir {
            config.public_dir = Some(public_dir);
        }
        if let Some(repair) = self.repair {
            config.pipeline.repair = repair;
        }
        if let Some(validation) = self.validation {
            config.pipeline.validation = validation;
        }
        config
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true)
                .with_file(false),
        )
        .init();
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = cli.apply(ServiceConfig::from_env());
    tracing::info!(
        host = %config.host,
        port = config.port,
        workers = config.workers,
        "starting html2go server"
    );

    convert_service::server::run(config)
        .await
        .map_err(|e| anyhow!("failed to run conversion service: {e}"))
}
