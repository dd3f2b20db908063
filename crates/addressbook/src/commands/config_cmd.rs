//! Config subcommand handlers.

use addressbook_config::{self as abconfig, ConfigError};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::resolve(global)?;
            let toml_str = toml::to_string_pretty(&cfg).map_err(ConfigError::from)?;
            let out = output::render_single(
                &global.output,
                &cfg,
                |_| toml_str.trim_end().to_owned(),
                |c| c.base_url.clone().unwrap_or_default(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&abconfig::config_path().display().to_string(), false);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = abconfig::config_path();
            if path.exists() && !force {
                return Err(CliError::Validation {
                    message: format!(
                        "Config file already exists at {}; pass --force to overwrite",
                        path.display()
                    ),
                });
            }

            let cfg = config::resolve(global)?;
            cfg.to_lookup_config()?;
            abconfig::save_config_to(&cfg, &path)?;

            let color = output::should_color(&global.color);
            output::print_output(
                &output::success(&format!("Wrote {}", path.display()), color),
                global.quiet,
            );
            Ok(())
        }
    }
}
