//! SSL command handlers.

use std::sync::Arc;

use tabled::Tabled;

use watchdeck_api::types::SslCheck;
use watchdeck_api::{Executor, SslClient};

use crate::cli::{GlobalOpts, SslArgs, SslCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SslRow {
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Valid")]
    valid: String,
    #[tabled(rename = "Expires")]
    expires: String,
    #[tabled(rename = "Days Left")]
    days_left: String,
    #[tabled(rename = "Issuer")]
    issuer: String,
}

impl From<&SslCheck> for SslRow {
    fn from(c: &SslCheck) -> Self {
        Self {
            domain: c.domain.clone(),
            valid: util::yes_no(c.is_valid).into(),
            expires: util::opt(c.expires_at.as_ref()),
            days_left: util::opt(c.days_until_expiry.as_ref()),
            issuer: util::opt(c.issuer.as_ref()),
        }
    }
}

fn detail(c: &SslCheck) -> String {
    let mut lines = vec![
        format!("Domain:      {}", c.domain),
        format!("Port:        {}", util::opt(c.port.as_ref())),
        format!("Valid:       {}", util::yes_no(c.is_valid)),
        format!("Expires:     {}", util::opt(c.expires_at.as_ref())),
        format!("Days left:   {}", util::opt(c.days_until_expiry.as_ref())),
        format!("Issuer:      {}", util::opt(c.issuer.as_ref())),
        format!("Checked at:  {}", util::opt(c.checked_at.as_ref())),
    ];
    if let Some(ref error) = c.error {
        lines.push(format!("Error:       {error}"));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    exec: Arc<Executor>,
    args: SslArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let client = SslClient::new(exec);

    match args.command {
        SslCommand::List => {
            let checks = client.list().await?;
            print_checks(&checks, global);
            Ok(())
        }

        SslCommand::Get { domain, days } => {
            let checks = client
                .checks_for_domain(&domain, days)
                .await
                .map_err(|e| CliError::from(e).with_not_found("domain", &domain, "ssl list"))?;
            print_checks(&checks, global);
            Ok(())
        }

        SslCommand::Latest { domain } => {
            let check = client
                .latest(&domain)
                .await
                .map_err(|e| CliError::from(e).with_not_found("domain", &domain, "ssl list"))?;
            let out = output::render_single(&global.output, &check, detail, |c| c.domain.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SslCommand::Expiring { days } => {
            let checks = client.expiring_soon(Some(days)).await?;
            print_checks(&checks, global);
            Ok(())
        }

        SslCommand::Check { domain, port } => {
            let check = client.check(&domain, port).await?;
            let out = output::render_single(&global.output, &check, detail, |c| c.domain.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

fn print_checks(checks: &[SslCheck], global: &GlobalOpts) {
    let out = output::render_list(&global.output, checks, |c| SslRow::from(c), |c| c.domain.clone());
    output::print_output(&out, global.quiet);
}
