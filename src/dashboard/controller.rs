//! Dashboard Controller
//!
//! Owns the identity, the view regions and the single chart slot. All
//! chart changes go through [`DashboardController::replace_chart`].

use serde_json::Value;

use super::{DashboardError, DashboardResult, DashboardView};
use crate::chart::{ChartId, ChartKind, ChartSpec, ChartSurface};
use crate::metrics::{
    daily_revenue_series, revenue_by_country_series, Endpoint, MetricsSource,
};
use crate::session::{Identity, IdentityStore, RoleLabel};

/// Series name of the revenue-by-country chart
pub const REVENUE_SERIES: &str = "Revenue";

/// Series name of the daily revenue chart
pub const DAILY_SERIES: &str = "Daily Revenue";

/// Text shown in the output region while a request is in flight
const LOADING: &str = "Loading...";

/// Controller settings
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardOptions {
    /// Where logout sends the user
    pub landing_location: String,
    /// Days requested when no limit is given
    pub daily_limit: u32,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            landing_location: "index.html".to_string(),
            daily_limit: 30,
        }
    }
}

/// Single-page dashboard controller
pub struct DashboardController<S, I, C, V> {
    source: S,
    store: I,
    surface: C,
    view: V,
    identity: Identity,
    role: RoleLabel,
    chart: Option<ChartId>,
    options: DashboardOptions,
}

impl<S, I, C, V> DashboardController<S, I, C, V>
where
    S: MetricsSource,
    I: IdentityStore,
    C: ChartSurface,
    V: DashboardView,
{
    /// Read the stored identity and fill the user and badge regions
    pub fn initialize(
        source: S,
        store: I,
        surface: C,
        mut view: V,
        options: DashboardOptions,
    ) -> DashboardResult<Self> {
        let identity = store.load()?.ok_or(DashboardError::NotLoggedIn)?;
        let role = identity.role();

        view.show_user(&format!("Logged in as: {}", identity));
        view.show_role(role);

        tracing::info!(user = %identity, role = %role, "Dashboard initialized");

        Ok(Self {
            source,
            store,
            surface,
            view,
            identity,
            role,
            chart: None,
            options,
        })
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn role(&self) -> RoleLabel {
        self.role
    }

    pub fn options(&self) -> &DashboardOptions {
        &self.options
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn chart_surface(&self) -> &C {
        &self.surface
    }

    /// Handle of the chart currently shown
    pub fn current_chart(&self) -> Option<ChartId> {
        self.chart
    }

    /// GET `path`, show the raw body, and return it parsed.
    ///
    /// Any body that is not JSON, or is a falsy JSON scalar (`null`,
    /// `false`, `0`, `""`), yields `Ok(None)` whatever the status code.
    /// `Err` means no response arrived; the output region then keeps
    /// showing the loading text.
    pub async fn fetch_metrics(&mut self, path: &str) -> DashboardResult<Option<Value>> {
        self.view.show_output(LOADING);

        let response = self.source.get(path, &self.identity).await.map_err(|e| {
            tracing::warn!(path = %path, error = %e, "Metrics request failed");
            DashboardError::from(e)
        })?;

        self.view.show_output(&response.body);

        match serde_json::from_str::<Value>(&response.body) {
            Ok(value) if is_falsy(&value) => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::debug!(
                    path = %path,
                    status = response.status,
                    error = %e,
                    "Response body is not JSON"
                );
                Ok(None)
            }
        }
    }

    /// Bar chart of revenue per country
    pub async fn load_revenue_by_country(&mut self) -> DashboardResult<Option<ChartId>> {
        let Some(data) = self.fetch_metrics(&Endpoint::RevenueByCountry.path()).await? else {
            return Ok(None);
        };

        let series = revenue_by_country_series(&data)?;
        let spec = ChartSpec::from_series(ChartKind::Bar, series, REVENUE_SERIES);
        Ok(Some(self.replace_chart(spec)))
    }

    /// Line chart of daily revenue, oldest day first. `None` uses the
    /// configured default limit.
    pub async fn load_daily_revenue(&mut self, limit: Option<u32>) -> DashboardResult<Option<ChartId>> {
        let limit = limit.unwrap_or(self.options.daily_limit);
        let Some(data) = self.fetch_metrics(&Endpoint::DailyRevenue { limit }.path()).await? else {
            return Ok(None);
        };

        let series = daily_revenue_series(&data)?;
        let spec = ChartSpec::from_series(ChartKind::Line, series, DAILY_SERIES);
        Ok(Some(self.replace_chart(spec)))
    }

    /// Request the user list so its body (or the denial) shows in the
    /// output region. The result is not charted.
    pub async fn load_admin_users(&mut self) -> DashboardResult<()> {
        self.fetch_metrics(&Endpoint::AdminUsers.path()).await?;
        Ok(())
    }

    /// Draw a single-series chart in place of the current one
    pub fn render_chart(
        &mut self,
        kind: ChartKind,
        labels: Vec<String>,
        values: Vec<f64>,
        series_name: &str,
    ) -> ChartId {
        self.replace_chart(ChartSpec::new(kind, labels, values, series_name))
    }

    /// Destroy the current chart, then create one from `spec`
    pub fn replace_chart(&mut self, spec: ChartSpec) -> ChartId {
        if let Some(old) = self.chart.take() {
            self.surface.destroy(old);
        }

        let id = self.surface.create(&spec);
        self.chart = Some(id);

        tracing::debug!(
            chart = %id,
            kind = %spec.kind,
            points = spec.labels.len(),
            "Chart replaced"
        );
        id
    }

    /// Clear the stored identity and navigate to the landing location.
    /// Hands back the view, which now shows the landing location.
    pub fn logout(mut self) -> DashboardResult<V> {
        self.store.clear()?;

        if let Some(id) = self.chart.take() {
            self.surface.destroy(id);
        }
        self.view.navigate(&self.options.landing_location);

        tracing::info!(user = %self.identity, "Logged out");
        Ok(self.view)
    }
}

/// JSON values a browser treats as false in a boolean test
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
