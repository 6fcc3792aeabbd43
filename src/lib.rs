//! # Revboard
//!
//! Revenue dashboard client for the analytics API. Shows who is logged in,
//! fetches revenue metrics, prints the raw responses and draws them as
//! charts.
//!
//! ## Modules
//!
//! - [`session`]: Stored identity and the cosmetic role badge
//! - [`metrics`]: Analytics API client and metric record parsing
//! - [`chart`]: Chart specs and the text chart surface
//! - [`dashboard`]: The controller tying them together
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use revboard::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MemoryIdentityStore::with_identity("alice_admin");
//!     let client = MetricsClient::new(MetricsConfig::default())?;
//!
//!     let mut dashboard = DashboardController::initialize(
//!         client,
//!         store,
//!         TextChartSurface::default(),
//!         TerminalView::new(std::io::stdout()),
//!         DashboardOptions::default(),
//!     )?;
//!
//!     dashboard.load_daily_revenue(None).await?;
//!     if let Some(chart) = dashboard.chart_surface().render() {
//!         println!("{}", chart);
//!     }
//!
//!     dashboard.logout()?;
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod metrics;
pub mod session;

pub use chart::{ChartId, ChartKind, ChartSpec, ChartSurface, TextChartSurface};

pub use config::{Config, ConfigError, LoggingConfig};

pub use dashboard::{
    DashboardController, DashboardError, DashboardOptions, DashboardResult, DashboardView,
    RegionView, TerminalView,
};

pub use metrics::{
    Endpoint, MetricsClient, MetricsConfig, MetricsError, MetricsSource, RawResponse,
    RecordError, Series,
};

pub use session::{
    FileIdentityStore, Identity, IdentityStore, MemoryIdentityStore, RoleLabel, SessionError,
};
