//! Uptime check endpoints under `/api/v1/uptime`.

use std::sync::Arc;

use crate::Error;
use crate::executor::Executor;
use crate::types::{NewUptimeCheck, UptimeCheck, UptimeSample};

/// Typed client for the uptime domain.
pub struct UptimeClient {
    exec: Arc<Executor>,
}

impl UptimeClient {
    pub fn new(exec: Arc<Executor>) -> Self {
        Self { exec }
    }

    /// All configured uptime checks.
    pub async fn list(&self) -> Result<Vec<UptimeCheck>, Error> {
        self.exec.get("api/v1/uptime").await
    }

    pub async fn get(&self, id: &str) -> Result<UptimeCheck, Error> {
        self.exec.get(&format!("api/v1/uptime/{id}")).await
    }

    /// Probe history, optionally limited to the last `hours` hours.
    pub async fn history(
        &self,
        id: &str,
        hours: Option<u32>,
    ) -> Result<Vec<UptimeSample>, Error> {
        let mut query = Vec::new();
        if let Some(hours) = hours {
            query.push(("hours", hours.to_string()));
        }
        self.exec
            .get_with_query(&format!("api/v1/uptime/{id}/history"), &query)
            .await
    }

    pub async fn create(&self, check: &NewUptimeCheck) -> Result<UptimeCheck, Error> {
        self.exec.post("api/v1/uptime", check).await
    }

    pub async fn pause(&self, id: &str) -> Result<UptimeCheck, Error> {
        self.exec.post_empty(&format!("api/v1/uptime/{id}/pause")).await
    }

    pub async fn resume(&self, id: &str) -> Result<UptimeCheck, Error> {
        self.exec
            .post_empty(&format!("api/v1/uptime/{id}/resume"))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.exec.delete(&format!("api/v1/uptime/{id}")).await
    }
}
