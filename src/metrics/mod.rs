//! Analytics API Access
//!
//! Fetches metric bodies from the analytics API and turns them into chart
//! series.
//!
//! ## Endpoints
//!
//! - `GET /metrics/revenue-by-country` - `[{country, revenue}, ...]`
//! - `GET /metrics/daily-revenue?limit=<n>` - `[{date|order_date, revenue}, ...]`, newest first
//! - `GET /admin/users` - user list, admin identities only
//!
//! Every request carries `X-User: <identity>`. Status codes are passed
//! through untouched; the body text is what the caller shows.

mod client;
mod records;

pub use client::{
    Endpoint, MetricsClient, MetricsConfig, MetricsError, MetricsSource, RawResponse,
    USER_HEADER,
};
pub use records::{
    coerce_number, daily_revenue_series, revenue_by_country_series, CountryRevenue,
    DailyRevenue, RecordError, Series,
};
