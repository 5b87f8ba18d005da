use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{error::ErrorKind, Parser, Subcommand, ValueEnum};
use mprov::config::Config;
use mprov::error::ProvisionError;
use mprov::inventory::{self, NetworkSpec, PortalFile, WebhookSpec};
use mprov::meraki::cameras::SnapshotFetcher;
use mprov::meraki::client::MerakiClient;
use mprov::meraki::networks::resolve_network_id;
use mprov::meraki::webhooks::list_http_servers_raw;
use mprov::provision::footage::collect_footage;
use mprov::provision::networks::{build_networks, ExistingNetworkPolicy};
use mprov::provision::portals::apply_portals;
use mprov::provision::webhooks::register_webhooks;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Provision Meraki networks, devices, portals, webhooks and camera snapshots
#[derive(Parser, Debug)]
#[command(name = "mprov", version, about, long_about = None)]
struct Args {
    /// Dashboard API key
    #[arg(long, env = "MERAKI_DASHBOARD_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Dashboard API root
    #[arg(long, env = "MERAKI_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Config file (defaults to <config dir>/mprov/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level for console output (RUST_LOG overrides)
    #[arg(long, value_enum, default_value = "info", global = true)]
    log_level: LogLevel,

    /// Also append logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create networks in an organization and claim their devices
    Networks {
        org_name: String,

        /// Networks to create
        #[arg(long, default_value = inventory::NETWORKS_FILE)]
        file: PathBuf,

        /// What to do when a listed network already exists
        #[arg(long, value_enum)]
        on_existing: Option<ExistingNetworkPolicy>,
    },
    /// Update SSID and captive portal splash settings on a network
    Portals {
        org_name: String,
        net_name: String,

        /// SSID settings keyed by slot number
        #[arg(long, default_value = inventory::PORTALS_FILE)]
        file: PathBuf,
    },
    /// Register webhook receivers on a network and test them
    Webhooks {
        net_name: String,

        /// Organization owning the network [default: DevNet Sandbox]
        #[arg(long, env = "MERAKI_ORG_NAME")]
        org: Option<String>,

        /// Receivers to register
        #[arg(long, default_value = inventory::WEBHOOKS_FILE)]
        file: PathBuf,
    },
    /// Save a snapshot from every camera in a network
    Footage {
        org_name: String,
        net_name: String,

        /// Directory for <serial>.jpg files [default: camera_snapshots]
        #[arg(long)]
        out: Option<PathBuf>,

        /// Take snapshots at this RFC 3339 time instead of now
        #[arg(long)]
        timestamp: Option<DateTime<Utc>>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn setup_logging(
    level: LogLevel,
    log_file: Option<&Path>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    let console = fmt::layer().with_target(false);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
            }

            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Parse arguments; usage errors exit with status 1
fn parse_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            std::process::exit(code);
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = parse_args();

    let _log_guard = match setup_logging(args.log_level, args.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            if let Some(hint) = err.downcast_ref::<ProvisionError>().and_then(ProvisionError::hint) {
                eprintln!("{hint}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let api_key = args.api_key.ok_or(ProvisionError::MissingApiKey)?;
    let base_url = config.effective_base_url(args.base_url);
    tracing::debug!("Using dashboard at {}", base_url);

    let client = MerakiClient::new(&base_url, &api_key)?;

    match args.command {
        Command::Networks {
            org_name,
            file,
            on_existing,
        } => {
            let specs: Vec<NetworkSpec> = inventory::load(&file)?;
            let policy = config.effective_existing_policy(on_existing);

            let report = build_networks(&client, &org_name, &specs, policy).await?;
            if let Some(name) = &report.stopped_at {
                tracing::info!("Stopping: network {} already exists, nothing more to do", name);
            }
            tracing::info!(
                "{} networks created, {} skipped, {} devices claimed",
                report.created.len(),
                report.skipped.len(),
                report.devices.len()
            );
        }
        Command::Portals {
            org_name,
            net_name,
            file,
        } => {
            let net_id = resolve_network_id(&client, &org_name, &net_name).await?;
            let portals: PortalFile = inventory::load(&file)?;

            let report = apply_portals(&client, &net_id, &portals).await?;
            tracing::info!(
                "{} SSIDs updated, {} splash pages updated",
                report.ssids_updated.len(),
                report.splash_updated.len()
            );
        }
        Command::Webhooks { net_name, org, file } => {
            let org_name = config.effective_org_name(org);
            let net_id = resolve_network_id(&client, &org_name, &net_name).await?;
            let specs: Vec<WebhookSpec> = inventory::load(&file)?;

            register_webhooks(&client, &net_id, &specs, &config.webhook_poll).await?;

            let receivers = list_http_servers_raw(&client, &net_id).await?;
            println!("Current webhook receivers for {net_name}:");
            println!("{}", serde_json::to_string_pretty(&receivers)?);
        }
        Command::Footage {
            org_name,
            net_name,
            out,
            timestamp,
        } => {
            let net_id = resolve_network_id(&client, &org_name, &net_name).await?;
            let fetcher = SnapshotFetcher::new()?;
            let out_dir = config.effective_snapshot_dir(out);

            let saved = collect_footage(&client, &fetcher, &net_id, &out_dir, timestamp, &config.snapshot_poll).await?;
            tracing::info!("{} snapshots saved to {}", saved.len(), out_dir.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_networks_defaults() {
        let args = Args::try_parse_from(["mprov", "networks", "Acme"]).unwrap();
        match args.command {
            Command::Networks { org_name, file, on_existing } => {
                assert_eq!(org_name, "Acme");
                assert_eq!(file, PathBuf::from("add_networks.json"));
                assert_eq!(on_existing, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_on_existing_flag() {
        let args = Args::try_parse_from(["mprov", "networks", "Acme", "--on-existing", "skip"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Networks {
                on_existing: Some(ExistingNetworkPolicy::Skip),
                ..
            }
        ));
    }

    #[test]
    fn test_wrong_argument_count_is_a_usage_error() {
        assert!(Args::try_parse_from(["mprov", "portals", "Acme"]).is_err());
        assert!(Args::try_parse_from(["mprov", "footage", "Acme", "Cams", "extra"]).is_err());
    }

    #[test]
    fn test_footage_timestamp_parses_rfc3339() {
        let args = Args::try_parse_from([
            "mprov",
            "footage",
            "Acme",
            "Cams",
            "--timestamp",
            "2024-05-01T12:00:00Z",
        ])
        .unwrap();
        match args.command {
            Command::Footage { timestamp, .. } => {
                assert_eq!(timestamp.unwrap().to_rfc3339(), "2024-05-01T12:00:00+00:00");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
