//! Device command handlers.

use std::sync::Arc;

use tabled::Tabled;

use watchdeck_api::types::Device;
use watchdeck_api::{DeviceClient, Executor};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "CPU %")]
    cpu: String,
    #[tabled(rename = "Mem %")]
    mem: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            id: d.id.clone(),
            name: d.name.clone(),
            ip: util::opt(d.ip_address.as_ref()),
            status: d.status.clone(),
            cpu: util::opt(d.cpu_percent.as_ref()),
            mem: util::opt(d.memory_percent.as_ref()),
        }
    }
}

fn detail(d: &Device) -> String {
    [
        format!("ID:         {}", d.id),
        format!("Name:       {}", d.name),
        format!("IP:         {}", util::opt(d.ip_address.as_ref())),
        format!("Status:     {}", d.status),
        format!("Last seen:  {}", util::opt(d.last_seen.as_ref())),
        format!("CPU:        {}%", util::opt(d.cpu_percent.as_ref())),
        format!("Memory:     {}%", util::opt(d.memory_percent.as_ref())),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    exec: Arc<Executor>,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let client = DeviceClient::new(exec);

    match args.command {
        DevicesCommand::List => {
            let devices = client.list().await?;
            let out =
                output::render_list(&global.output, &devices, |d| DeviceRow::from(d), |d| d.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Get { id } => {
            let device = client
                .get(&id)
                .await
                .map_err(|e| CliError::from(e).with_not_found("device", &id, "devices list"))?;
            let out = output::render_single(&global.output, &device, detail, |d| d.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
