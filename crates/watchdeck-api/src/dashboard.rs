//! Dashboard aggregate endpoints under `/api/v1/dashboard`.

use std::sync::Arc;

use crate::Error;
use crate::executor::Executor;
use crate::types::DashboardStats;

/// Typed client for the dashboard stats card.
pub struct DashboardClient {
    exec: Arc<Executor>,
}

impl DashboardClient {
    pub fn new(exec: Arc<Executor>) -> Self {
        Self { exec }
    }

    pub async fn stats(&self) -> Result<DashboardStats, Error> {
        self.exec.get("api/v1/dashboard/stats").await
    }
}
