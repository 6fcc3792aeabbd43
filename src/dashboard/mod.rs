//! Dashboard
//!
//! The controller behind the revenue dashboard: identity and role badge on
//! start, metric loads that show the raw response and chart what parses,
//! and logout.
//!
//! ## Flow
//!
//! 1. `initialize` reads the stored identity and fills the user and badge regions
//! 2. Each load shows `Loading...`, then the raw body, then replaces the chart
//! 3. `logout` clears the identity and navigates to the landing page

mod controller;
mod view;

pub use controller::{DashboardController, DashboardOptions, DAILY_SERIES, REVENUE_SERIES};
pub use view::{DashboardView, RegionView, TerminalView};

use thiserror::Error;

use crate::metrics::{MetricsError, RecordError};
use crate::session::SessionError;

/// Errors surfaced by dashboard operations
#[derive(Error, Debug)]
pub enum DashboardError {
    /// No identity is stored
    #[error("Not logged in: no stored identity")]
    NotLoggedIn,

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// The request never produced a response
    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),

    /// The body was JSON but not the expected records
    #[error("Record error: {0}")]
    Records(#[from] RecordError),
}

/// Result type for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
