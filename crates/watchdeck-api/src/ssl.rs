//! SSL certificate monitoring endpoints under `/api/v1/ssl`.

use std::sync::Arc;

use crate::Error;
use crate::executor::Executor;
use crate::types::{SslCheck, SslCheckRequest};

/// Typed client for the SSL domain. Each method maps one backend
/// capability onto one executor call; failures propagate unchanged.
pub struct SslClient {
    exec: Arc<Executor>,
}

impl SslClient {
    pub fn new(exec: Arc<Executor>) -> Self {
        Self { exec }
    }

    /// All tracked SSL checks.
    pub async fn list(&self) -> Result<Vec<SslCheck>, Error> {
        self.exec.get("api/v1/ssl").await
    }

    /// Check history for one domain, optionally limited to the last
    /// `days` days.
    pub async fn checks_for_domain(
        &self,
        domain: &str,
        days: Option<u32>,
    ) -> Result<Vec<SslCheck>, Error> {
        let mut query = Vec::new();
        if let Some(days) = days {
            query.push(("days", days.to_string()));
        }
        self.exec
            .get_with_query(&format!("api/v1/ssl/{domain}"), &query)
            .await
    }

    /// Most recent check for one domain.
    pub async fn latest(&self, domain: &str) -> Result<SslCheck, Error> {
        self.exec.get(&format!("api/v1/ssl/{domain}/latest")).await
    }

    /// Certificates expiring within `days` days (backend default applies
    /// when omitted).
    pub async fn expiring_soon(&self, days: Option<u32>) -> Result<Vec<SslCheck>, Error> {
        let mut query = Vec::new();
        if let Some(days) = days {
            query.push(("days", days.to_string()));
        }
        self.exec
            .get_with_query("api/v1/ssl/expiring/soon", &query)
            .await
    }

    /// Run an on-demand certificate check against `domain` (port 443 when
    /// omitted; the backend decides).
    pub async fn check(&self, domain: &str, port: Option<u16>) -> Result<SslCheck, Error> {
        self.exec
            .post("api/v1/ssl/check", &SslCheckRequest { domain, port })
            .await
    }
}
