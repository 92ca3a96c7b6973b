//! Uptime command handlers.

use std::sync::Arc;

use tabled::Tabled;

use watchdeck_api::types::{NewUptimeCheck, UptimeCheck, UptimeSample};
use watchdeck_api::{Executor, UptimeClient};

use crate::cli::{GlobalOpts, UptimeArgs, UptimeCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct CheckRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "Up")]
    up: String,
    #[tabled(rename = "Paused")]
    paused: String,
    #[tabled(rename = "Uptime %")]
    uptime: String,
}

impl From<&UptimeCheck> for CheckRow {
    fn from(c: &UptimeCheck) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            url: c.url.clone(),
            up: c.is_up.map_or_else(|| "-".into(), |up| util::yes_no(up).into()),
            paused: util::yes_no(c.paused).into(),
            uptime: util::opt(c.uptime_percent.as_ref()),
        }
    }
}

#[derive(Tabled)]
struct SampleRow {
    #[tabled(rename = "Checked At")]
    checked_at: String,
    #[tabled(rename = "Up")]
    up: String,
    #[tabled(rename = "Response (ms)")]
    response_ms: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&UptimeSample> for SampleRow {
    fn from(s: &UptimeSample) -> Self {
        Self {
            checked_at: s.checked_at.clone(),
            up: util::yes_no(s.is_up).into(),
            response_ms: util::opt(s.response_time_ms.as_ref()),
            status: util::opt(s.status_code.as_ref()),
        }
    }
}

fn detail(c: &UptimeCheck) -> String {
    [
        format!("ID:            {}", c.id),
        format!("Name:          {}", c.name),
        format!("URL:           {}", c.url),
        format!("Interval:      {}s", util::opt(c.interval_seconds.as_ref())),
        format!(
            "Up:            {}",
            c.is_up.map_or("-", util::yes_no)
        ),
        format!("Paused:        {}", util::yes_no(c.paused)),
        format!("Last checked:  {}", util::opt(c.last_checked.as_ref())),
        format!("Response:      {}ms", util::opt(c.response_time_ms.as_ref())),
        format!("Uptime:        {}%", util::opt(c.uptime_percent.as_ref())),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    exec: Arc<Executor>,
    args: UptimeArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let client = UptimeClient::new(exec);

    match args.command {
        UptimeCommand::List => {
            let checks = client.list().await?;
            let out =
                output::render_list(&global.output, &checks, |c| CheckRow::from(c), |c| c.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UptimeCommand::Get { id } => {
            let check = client.get(&id).await.map_err(not_found(&id))?;
            let out = output::render_single(&global.output, &check, detail, |c| c.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UptimeCommand::History { id, hours } => {
            let samples = client.history(&id, hours).await.map_err(not_found(&id))?;
            let out = output::render_list(&global.output, &samples, |s| SampleRow::from(s), |s| {
                s.checked_at.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UptimeCommand::Create {
            name,
            url,
            interval,
        } => {
            let check = client
                .create(&NewUptimeCheck {
                    name,
                    url,
                    interval_seconds: interval,
                })
                .await?;
            if !global.quiet {
                eprintln!("Created uptime check '{}' ({})", check.name, check.id);
            }
            Ok(())
        }

        UptimeCommand::Pause { id } => {
            client.pause(&id).await.map_err(not_found(&id))?;
            if !global.quiet {
                eprintln!("Check paused");
            }
            Ok(())
        }

        UptimeCommand::Resume { id } => {
            client.resume(&id).await.map_err(not_found(&id))?;
            if !global.quiet {
                eprintln!("Check resumed");
            }
            Ok(())
        }

        UptimeCommand::Delete { id } => {
            if !util::confirm(&format!("Delete uptime check '{id}'?"), global.yes)? {
                return Ok(());
            }
            client.delete(&id).await.map_err(not_found(&id))?;
            if !global.quiet {
                eprintln!("Check deleted");
            }
            Ok(())
        }
    }
}

fn not_found(id: &str) -> impl Fn(watchdeck_api::Error) -> CliError + '_ {
    move |e| CliError::from(e).with_not_found("uptime check", id, "uptime list")
}
