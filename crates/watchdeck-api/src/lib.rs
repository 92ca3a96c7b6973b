// watchdeck-api: Async Rust client for the watchdeck monitoring backend.

pub mod analytics;
pub mod dashboard;
pub mod devices;
pub mod error;
pub mod executor;
pub mod ssl;
pub mod types;
pub mod uptime;

pub use analytics::AnalyticsClient;
pub use dashboard::DashboardClient;
pub use devices::DeviceClient;
pub use error::Error;
pub use executor::{Executor, Method, Payload, RequestSpec, ResponseEnvelope};
pub use ssl::SslClient;
pub use uptime::UptimeClient;
