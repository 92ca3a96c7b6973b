//! Config command handlers.

use watchdeck_config::{config_path, load_config_or_default, save_config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = load_config_or_default();
            let format = match global.output {
                // Tables don't fit nested config; show TOML-ish YAML instead.
                OutputFormat::Table | OutputFormat::Plain => OutputFormat::Yaml,
                ref other => other.clone(),
            };
            let out = output::render_single(&format, &cfg, |_| String::new(), |_| String::new());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init => {
            let cfg = load_config_or_default();
            save_config(&cfg)?;
            if !global.quiet {
                eprintln!("Wrote {}", config_path().display());
            }
            Ok(())
        }
    }
}
