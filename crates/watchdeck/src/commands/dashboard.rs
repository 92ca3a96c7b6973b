//! Dashboard command handler, including watch mode.
//!
//! Watch mode drives a polling session: render on every Ready transition,
//! surface errors without clearing the last good stats, stop on Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use owo_colors::OwoColorize;

use watchdeck_api::types::DashboardStats;
use watchdeck_api::{DashboardClient, Executor};
use watchdeck_core::{Phase, spawn_poller};

use crate::cli::{DashboardArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

fn detail(s: &DashboardStats) -> String {
    [
        format!("Devices:       {} / {} online", s.devices_online, s.devices_total),
        format!("SSL checks:    {} ({} expiring soon)", s.ssl_total, s.ssl_expiring_soon),
        format!("Uptime checks: {} / {} up", s.uptime_up, s.uptime_total),
    ]
    .join("\n")
}

/// Update stamp for watch mode, rendered in the local wall clock.
fn stamp(at: DateTime<Utc>) -> String {
    format!("updated {}", at.with_timezone(&Local).format("%H:%M:%S"))
}

fn plain(s: &DashboardStats) -> String {
    format!(
        "{} {} {} {} {} {}",
        s.devices_online,
        s.devices_total,
        s.ssl_total,
        s.ssl_expiring_soon,
        s.uptime_up,
        s.uptime_total
    )
}

pub async fn handle(
    exec: Arc<Executor>,
    args: DashboardArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if args.watch {
        return watch(exec, args.interval, global).await;
    }

    let stats = DashboardClient::new(exec).stats().await?;
    let out = output::render_single(&global.output, &stats, detail, plain);
    output::print_output(&out, global.quiet);
    Ok(())
}

async fn watch(exec: Arc<Executor>, interval_secs: u64, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let period = Duration::from_secs(interval_secs.max(1));

    let handle = spawn_poller((), period, move |()| {
        let client = DashboardClient::new(Arc::clone(&exec));
        async move { client.stats().await }
    });

    let mut rx = handle.subscribe();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,

            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = rx.borrow_and_update().clone();
                match state.phase {
                    Phase::Ready => {
                        if let Some(stats) = state.data {
                            let out = output::render_single(&global.output, stats.as_ref(), detail, plain);
                            output::print_output(&out, global.quiet);
                            if let Some(at) = state.last_updated {
                                let line = stamp(at);
                                if color {
                                    eprintln!("{}", line.dimmed());
                                } else {
                                    eprintln!("{line}");
                                }
                            }
                        }
                    }
                    Phase::Error => {
                        if let Some(error) = state.error {
                            eprintln!("refresh failed: {error}");
                        }
                    }
                    Phase::Idle | Phase::Loading => {}
                }
            }
        }
    }

    handle.shutdown().await;
    Ok(())
}
