//! `add`: the full form flow. Look up, select, name, and store.

use addressbook_config::Config;
use addressbook_core::{FormController, FormState, PersonAddress};
use dialoguer::{Input, Select};

use crate::cli::{AddArgs, GlobalOpts};
use crate::commands::util;
use crate::config;
use crate::error::CliError;
use crate::output;

pub async fn handle(args: AddArgs, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let lookup = config::build_lookup(cfg)?;
    let book = config::open_book(cfg)?;
    let mut form = FormController::new(lookup, book, config::diagnostics());

    util::lookup_addresses(&mut form, &args.lookup, cfg, global).await?;

    let id = choose_address(&form, &args)?;
    if form.select_address(&id) == FormState::Error {
        return Err(util::form_error(&form, cfg));
    }

    let first_name = name_or_prompt(args.first_name, "First name")?;
    let last_name = name_or_prompt(args.last_name, "Last name")?;
    form.set_first_name(first_name);
    form.set_last_name(last_name);

    let before = form.book().len();
    if form.submit_person() == FormState::Error {
        return Err(util::form_error(&form, cfg));
    }
    let added = form.book().len() > before;

    let mut book = form.into_book();
    book.flush()?;

    let Some(entry) = book.get(&id).cloned() else {
        return Err(CliError::Storage {
            message: format!("entry '{id}' missing after submit"),
        });
    };

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &entry,
        |e| detail(e, added, color),
        |e| e.id().to_owned(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Resolve which lookup result to use: the `--address` flag, the only
/// result, or an interactive pick.
fn choose_address(form: &FormController, args: &AddArgs) -> Result<String, CliError> {
    if let Some(ref id) = args.address {
        return Ok(id.clone());
    }

    let results = form.results();
    match results {
        [] => Err(CliError::NotFound {
            message: format!(
                "No addresses found for postcode {} and house number {}",
                args.lookup.postcode.trim(),
                args.lookup.house_number.trim()
            ),
            hint: "find --postcode <P> --house-number <N>".into(),
        }),
        [only] => Ok(only.id.clone()),
        many if util::interactive() => {
            let labels: Vec<String> = many.iter().map(addressbook_core::Address::summary).collect();
            let idx = Select::new()
                .with_prompt("Select an address")
                .items(&labels)
                .default(0)
                .interact()?;
            Ok(many.get(idx).map_or_else(String::new, |a| a.id.clone()))
        }
        _ => Err(CliError::AmbiguousAddress {
            postcode: args.lookup.postcode.trim().to_owned(),
            house_number: args.lookup.house_number.trim().to_owned(),
        }),
    }
}

/// Use the flag value, else prompt when interactive. Non-interactive
/// callers get an empty name, which the form rejects.
fn name_or_prompt(value: Option<String>, prompt: &str) -> Result<String, CliError> {
    if let Some(v) = value {
        return Ok(v);
    }
    if !util::interactive() {
        return Ok(String::new());
    }
    let v: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(v)
}

fn detail(entry: &PersonAddress, added: bool, color: bool) -> String {
    let line = format!("{} at {}", entry.full_name(), entry.address.summary());
    if added {
        output::success(&format!("Added {line}"), color)
    } else {
        output::muted(&format!("Already in the address book: {line}"), color)
    }
}
