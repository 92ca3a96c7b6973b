//! Device health endpoints under `/api/v1/devices`.

use std::sync::Arc;

use crate::Error;
use crate::executor::Executor;
use crate::types::Device;

/// Typed client for the device domain.
pub struct DeviceClient {
    exec: Arc<Executor>,
}

impl DeviceClient {
    pub fn new(exec: Arc<Executor>) -> Self {
        Self { exec }
    }

    pub async fn list(&self) -> Result<Vec<Device>, Error> {
        self.exec.get("api/v1/devices").await
    }

    pub async fn get(&self, id: &str) -> Result<Device, Error> {
        self.exec.get(&format!("api/v1/devices/{id}")).await
    }
}
