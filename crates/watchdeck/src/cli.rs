//! Clap derive structures for the `watchdeck` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// watchdeck -- monitoring dashboard data from the command line
#[derive(Debug, Parser)]
#[command(
    name = "watchdeck",
    version,
    about = "Query device health, SSL certificates, uptime checks, and analytics",
    long_about = "A CLI for the watchdeck monitoring backend.\n\n\
        Talks to the same REST API the dashboard uses: device health,\n\
        SSL certificate checks, uptime monitors, and analytics reports.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend base URL (overrides config)
    #[arg(long, env = "WATCHDECK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "WATCHDECK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "WATCHDECK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// SSL certificate checks
    Ssl(SslArgs),

    /// Uptime monitors
    #[command(alias = "up")]
    Uptime(UptimeArgs),

    /// Monitored devices
    #[command(alias = "dev")]
    Devices(DevicesArgs),

    /// Analytics reports
    Analytics(AnalyticsArgs),

    /// Aggregate dashboard stats
    #[command(alias = "dash")]
    Dashboard(DashboardArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SSL
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SslArgs {
    #[command(subcommand)]
    pub command: SslCommand,
}

#[derive(Debug, Subcommand)]
pub enum SslCommand {
    /// List all SSL checks
    #[command(alias = "ls")]
    List,

    /// Check history for a domain
    Get {
        /// Domain name
        domain: String,

        /// Only include checks from the last N days
        #[arg(long)]
        days: Option<u32>,
    },

    /// Latest check for a domain
    Latest {
        /// Domain name
        domain: String,
    },

    /// Certificates expiring soon
    Expiring {
        /// Expiry window in days
        #[arg(long, default_value = "14")]
        days: u32,
    },

    /// Trigger an immediate check for a domain
    Check {
        /// Domain name
        domain: String,

        /// TLS port (default 443 on the backend)
        #[arg(long)]
        port: Option<u16>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  UPTIME
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct UptimeArgs {
    #[command(subcommand)]
    pub command: UptimeCommand,
}

#[derive(Debug, Subcommand)]
pub enum UptimeCommand {
    /// List uptime checks
    #[command(alias = "ls")]
    List,

    /// Get uptime check details
    Get {
        /// Check ID
        id: String,
    },

    /// Probe history for a check
    History {
        /// Check ID
        id: String,

        /// Hours of history to include
        #[arg(long)]
        hours: Option<u32>,
    },

    /// Create an uptime check
    Create {
        /// Display name
        #[arg(long, required = true)]
        name: String,

        /// URL to probe
        #[arg(long, required = true)]
        url: String,

        /// Probe interval in seconds
        #[arg(long)]
        interval: Option<u32>,
    },

    /// Pause a check
    Pause {
        /// Check ID
        id: String,
    },

    /// Resume a paused check
    Resume {
        /// Check ID
        id: String,
    },

    /// Delete a check
    Delete {
        /// Check ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List monitored devices
    #[command(alias = "ls")]
    List,

    /// Get device details
    Get {
        /// Device ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ANALYTICS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AnalyticsArgs {
    #[command(subcommand)]
    pub command: AnalyticsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AnalyticsCommand {
    /// Connection state of the analytics credentials
    Credentials,

    /// Realtime report for a property
    Realtime {
        /// Analytics property ID
        property_id: String,

        /// Metric name (repeatable)
        #[arg(long = "metric", required = true)]
        metrics: Vec<String>,

        /// Dimension name (repeatable)
        #[arg(long = "dimension")]
        dimensions: Vec<String>,
    },

    /// Ranged report for a property
    Report {
        /// Analytics property ID
        property_id: String,

        /// Metric name (repeatable)
        #[arg(long = "metric", required = true)]
        metrics: Vec<String>,

        /// Range start (YYYY-MM-DD); backend default when omitted
        #[arg(long)]
        start_date: Option<String>,

        /// Range end (YYYY-MM-DD); backend default when omitted
        #[arg(long)]
        end_date: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DASHBOARD
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Keep refreshing until interrupted
    #[arg(long, short = 'w')]
    pub watch: bool,

    /// Refresh interval in seconds (watch mode)
    #[arg(long, default_value = "30")]
    pub interval: u64,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the current resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// Write the current resolved configuration to the config file
    Init,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
