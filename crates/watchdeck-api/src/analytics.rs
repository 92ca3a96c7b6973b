//! Analytics endpoints under `/api/v1/analytics`.

use std::sync::Arc;

use crate::Error;
use crate::executor::Executor;
use crate::types::{AnalyticsCredentials, AnalyticsReport};

/// Typed client for the analytics domain.
pub struct AnalyticsClient {
    exec: Arc<Executor>,
}

impl AnalyticsClient {
    pub fn new(exec: Arc<Executor>) -> Self {
        Self { exec }
    }

    /// Connection state of the backend's analytics credentials.
    pub async fn credentials(&self) -> Result<AnalyticsCredentials, Error> {
        self.exec.get("api/v1/analytics/credentials").await
    }

    /// Realtime report for a property. Metrics and dimensions are emitted
    /// as repeated query keys, in caller order.
    pub async fn realtime_report(
        &self,
        property_id: &str,
        metrics: &[&str],
        dimensions: &[&str],
    ) -> Result<AnalyticsReport, Error> {
        let mut query = Vec::new();
        for metric in metrics {
            query.push(("metric", (*metric).to_owned()));
        }
        for dimension in dimensions {
            query.push(("dimension", (*dimension).to_owned()));
        }
        self.exec
            .get_with_query(
                &format!("api/v1/analytics/{property_id}/realtime-report"),
                &query,
            )
            .await
    }

    /// Ranged report. Date bounds are appended only when supplied.
    pub async fn report(
        &self,
        property_id: &str,
        metrics: &[&str],
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<AnalyticsReport, Error> {
        let mut query = Vec::new();
        for metric in metrics {
            query.push(("metric", (*metric).to_owned()));
        }
        if let Some(start) = start_date {
            query.push(("start_date", start.to_owned()));
        }
        if let Some(end) = end_date {
            query.push(("end_date", end.to_owned()));
        }
        self.exec
            .get_with_query(&format!("api/v1/analytics/{property_id}/report"), &query)
            .await
    }
}
