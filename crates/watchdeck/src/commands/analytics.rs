//! Analytics command handlers.

use std::sync::Arc;

use tabled::Tabled;

use watchdeck_api::types::{AnalyticsCredentials, AnalyticsReport};
use watchdeck_api::{AnalyticsClient, Executor};

use crate::cli::{AnalyticsArgs, AnalyticsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ReportTableRow {
    #[tabled(rename = "Dimensions")]
    dimensions: String,
    #[tabled(rename = "Metrics")]
    metrics: String,
}

fn credentials_detail(c: &AnalyticsCredentials) -> String {
    [
        format!("Connected:  {}", util::yes_no(c.connected)),
        format!("Property:   {}", util::opt(c.property_id.as_ref())),
        format!("Account:    {}", util::opt(c.account_email.as_ref())),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    exec: Arc<Executor>,
    args: AnalyticsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let client = AnalyticsClient::new(exec);

    match args.command {
        AnalyticsCommand::Credentials => {
            let creds = client.credentials().await?;
            let out = output::render_single(&global.output, &creds, credentials_detail, |c| {
                util::yes_no(c.connected).to_owned()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AnalyticsCommand::Realtime {
            property_id,
            metrics,
            dimensions,
        } => {
            let metric_refs: Vec<&str> = metrics.iter().map(String::as_str).collect();
            let dimension_refs: Vec<&str> = dimensions.iter().map(String::as_str).collect();
            let report = client
                .realtime_report(&property_id, &metric_refs, &dimension_refs)
                .await
                .map_err(property_not_found(&property_id))?;
            print_report(&report, global);
            Ok(())
        }

        AnalyticsCommand::Report {
            property_id,
            metrics,
            start_date,
            end_date,
        } => {
            let metric_refs: Vec<&str> = metrics.iter().map(String::as_str).collect();
            let report = client
                .report(
                    &property_id,
                    &metric_refs,
                    start_date.as_deref(),
                    end_date.as_deref(),
                )
                .await
                .map_err(property_not_found(&property_id))?;
            print_report(&report, global);
            Ok(())
        }
    }
}

fn print_report(report: &AnalyticsReport, global: &GlobalOpts) {
    let out = output::render_list(
        &global.output,
        &report.rows,
        |row| ReportTableRow {
            dimensions: row.dimension_values.join(", "),
            metrics: row.metric_values.join(", "),
        },
        |row| row.metric_values.join(","),
    );
    output::print_output(&out, global.quiet);
    if !global.quiet {
        eprintln!("{} row(s)", report.row_count);
    }
}

fn property_not_found(property_id: &str) -> impl Fn(watchdeck_api::Error) -> CliError + '_ {
    move |e| CliError::from(e).with_not_found("property", property_id, "analytics credentials")
}
