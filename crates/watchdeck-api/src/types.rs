// Domain records as the backend returns them.
//
// Server-owned shapes decoded by serde at the client boundary: unknown
// fields are ignored, optional fields default. Records are replaced whole;
// the only partial mutation is the store's shallow-merge patch.

use serde::{Deserialize, Serialize};

/// A server-owned record identified by a server-assigned id.
pub trait Entity {
    fn id(&self) -> &str;
}

// ── Devices ──────────────────────────────────────────────────────────

/// A monitored device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ip_address: Option<String>,
    /// Health status as reported by the backend (e.g. "online", "offline",
    /// "degraded").
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub last_seen: Option<String>,
    #[serde(default)]
    pub cpu_percent: Option<f64>,
    #[serde(default)]
    pub memory_percent: Option<f64>,
}

impl Entity for Device {
    fn id(&self) -> &str {
        &self.id
    }
}

// ── SSL ──────────────────────────────────────────────────────────────

/// Result of one SSL certificate check for a domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SslCheck {
    pub id: String,
    pub domain: String,
    #[serde(default)]
    pub port: Option<u16>,
    pub is_valid: bool,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub days_until_expiry: Option<i64>,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub checked_at: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Entity for SslCheck {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Body of `POST /api/v1/ssl/check`. The port is omitted from the wire
/// when absent.
#[derive(Debug, Clone, Serialize)]
pub struct SslCheckRequest<'a> {
    pub domain: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

// ── Uptime ───────────────────────────────────────────────────────────

/// A configured uptime check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UptimeCheck {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub interval_seconds: Option<u32>,
    #[serde(default)]
    pub is_up: Option<bool>,
    #[serde(default)]
    pub paused: bool,
    #[serde(default)]
    pub last_checked: Option<String>,
    #[serde(default)]
    pub response_time_ms: Option<u64>,
    #[serde(default)]
    pub uptime_percent: Option<f64>,
}

impl Entity for UptimeCheck {
    fn id(&self) -> &str {
        &self.id
    }
}

/// One historical probe of an uptime check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UptimeSample {
    pub checked_at: String,
    pub is_up: bool,
    #[serde(default)]
    pub response_time_ms: Option<u64>,
    #[serde(default)]
    pub status_code: Option<u16>,
}

/// Body of `POST /api/v1/uptime`.
#[derive(Debug, Clone, Serialize)]
pub struct NewUptimeCheck {
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_seconds: Option<u32>,
}

// ── Analytics ────────────────────────────────────────────────────────

/// Connection state of the analytics credentials on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsCredentials {
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub property_id: Option<String>,
    #[serde(default)]
    pub account_email: Option<String>,
}

/// A realtime or ranged analytics report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    #[serde(default)]
    pub rows: Vec<ReportRow>,
    #[serde(default)]
    pub row_count: u64,
}

/// One report row: dimension values and metric values in request order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(default)]
    pub dimension_values: Vec<String>,
    #[serde(default)]
    pub metric_values: Vec<String>,
}

// ── Dashboard ────────────────────────────────────────────────────────

/// Aggregate stats for the dashboard header cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub devices_total: u64,
    #[serde(default)]
    pub devices_online: u64,
    #[serde(default)]
    pub ssl_total: u64,
    #[serde(default)]
    pub ssl_expiring_soon: u64,
    #[serde(default)]
    pub uptime_total: u64,
    #[serde(default)]
    pub uptime_up: u64,
}
