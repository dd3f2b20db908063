//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};
use std::time::Duration;

use addressbook_config::Config;
use addressbook_core::{FormController, FormState};
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::{GlobalOpts, LookupArgs};
use crate::config;
use crate::error::CliError;

/// Whether prompts can be shown.
pub fn interactive() -> bool {
    io::stdin().is_terminal() && io::stderr().is_terminal()
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !interactive() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()?;
    Ok(confirmed)
}

/// Spinner on stderr while a request is in flight. Hidden when quiet or
/// not attached to a terminal.
pub fn spinner(message: &str, quiet: bool) -> ProgressBar {
    if quiet || !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_owned());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Fill in the address form and run the lookup. The form error, if any,
/// becomes the returned error.
pub async fn lookup_addresses(
    form: &mut FormController,
    args: &LookupArgs,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    form.set_post_code(args.postcode.clone());
    form.set_house_number(args.house_number.clone());

    let pb = spinner("Looking up addresses...", global.quiet);
    let state = form.submit_address().await;
    pb.finish_and_clear();

    if state == FormState::Error {
        return Err(form_error(form, cfg));
    }
    Ok(())
}

/// The error currently shown on the form, as a CLI error.
pub fn form_error(form: &FormController, cfg: &Config) -> CliError {
    form.error().map_or_else(
        || CliError::Validation {
            message: "the form is in an error state".into(),
        },
        |err| CliError::from_form(err, &config::base_url_hint(cfg)),
    )
}
