//! Revboard CLI
//!
//! Command-line front end for the revenue dashboard:
//! - Store or clear the display identity
//! - Load revenue charts from the analytics API
//! - Run an interactive dashboard session

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Stdout;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use revboard::config::generate_default_config;
use revboard::{
    ChartId, Config, DashboardController, DashboardError, DashboardResult, FileIdentityStore,
    Identity, IdentityStore, LoggingConfig, MetricsClient, TerminalView, TextChartSurface,
};

type Dashboard =
    DashboardController<MetricsClient, FileIdentityStore, TextChartSurface, TerminalView<Stdout>>;

#[derive(Parser)]
#[command(name = "revboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Revenue dashboard for the analytics API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/revboard/config.toml, then ./revboard.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Analytics API origin, overrides the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store the display identity
    Login {
        /// Username sent as X-User
        username: String,
    },

    /// Show the stored identity and its badge
    Whoami,

    /// Bar chart of revenue by country
    Revenue,

    /// Line chart of daily revenue
    Daily {
        /// Number of days to request (default: config `daily_limit`)
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Request the admin user list
    Users,

    /// Clear the stored identity
    Logout,

    /// Interactive dashboard session
    Interactive,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    }
    .with_cli_overrides(cli.api_url);

    init_logging(&config.logging);
    match &config.source {
        Some(path) => tracing::debug!(path = ?path, "Loaded config"),
        None => tracing::debug!("No config file found, using defaults"),
    }

    let store = FileIdentityStore::new(config.session.data_dir_path());
    tracing::debug!(path = ?store.path(), api = %config.api.base_url, "Starting revboard");

    match cli.command {
        Commands::Login { username } => {
            let identity = Identity::new(username);
            store
                .save(&identity)
                .with_context(|| format!("failed to store identity in {:?}", store.path()))?;
            println!("Logged in as: {} [{}]", identity, identity.role());
        }

        Commands::Whoami => {
            open(&config, store)?;
        }

        Commands::Revenue => {
            let mut dashboard = open(&config, store)?;
            if dashboard.load_revenue_by_country().await?.is_some() {
                print_chart(&dashboard);
            }
        }

        Commands::Daily { limit } => {
            let mut dashboard = open(&config, store)?;
            if dashboard.load_daily_revenue(limit).await?.is_some() {
                print_chart(&dashboard);
            }
        }

        Commands::Users => {
            let mut dashboard = open(&config, store)?;
            dashboard.load_admin_users().await?;
        }

        Commands::Logout => {
            if store.load()?.is_none() {
                println!("Not logged in");
                return Ok(());
            }
            open(&config, store)?.logout()?;
        }

        Commands::Interactive => {
            run_interactive(open(&config, store)?).await?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Install the tracing subscriber; `RUST_LOG` wins over the config level.
/// Logs go to stderr so stdout stays the dashboard.
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("revboard={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

fn open(config: &Config, store: FileIdentityStore) -> Result<Dashboard> {
    let client = MetricsClient::new(config.api.metrics_config())?;

    DashboardController::initialize(
        client,
        store,
        TextChartSurface::default(),
        TerminalView::new(std::io::stdout()),
        config.dashboard_options(),
    )
    .map_err(|e| match e {
        DashboardError::NotLoggedIn => anyhow!("not logged in, run `revboard login <username>` first"),
        other => other.into(),
    })
}

fn print_chart(dashboard: &Dashboard) {
    match dashboard.chart_surface().render() {
        Some(chart) => {
            println!();
            print!("{}", chart);
        }
        None => println!("(no chart)"),
    }
}

fn report(result: DashboardResult<Option<ChartId>>, dashboard: &Dashboard) {
    match result {
        Ok(Some(_)) => print_chart(dashboard),
        Ok(None) => {}
        Err(e) => eprintln!("error: {}", e),
    }
}

fn print_help() {
    println!("commands: revenue | daily [limit] | users | chart | logout | quit");
}

/// One controller for the whole session; each command replaces the chart
async fn run_interactive(mut dashboard: Dashboard) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_help();

    while let Some(line) = lines.next_line().await? {
        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (None, _) => {}
            (Some("revenue"), _) => {
                let result = dashboard.load_revenue_by_country().await;
                report(result, &dashboard);
            }
            (Some("daily"), arg) => match arg.map(str::parse::<u32>).transpose() {
                Ok(limit) => {
                    let result = dashboard.load_daily_revenue(limit).await;
                    report(result, &dashboard);
                }
                Err(_) => eprintln!("usage: daily [limit]"),
            },
            (Some("users"), _) => {
                if let Err(e) = dashboard.load_admin_users().await {
                    eprintln!("error: {}", e);
                }
            }
            (Some("chart"), _) => print_chart(&dashboard),
            (Some("logout"), _) => {
                dashboard.logout()?;
                return Ok(());
            }
            (Some("quit" | "exit"), _) => return Ok(()),
            (Some("help"), _) => print_help(),
            (Some(other), _) => eprintln!("unknown command: {}", other),
        }
    }

    Ok(())
}
