//! `list`, `remove`, `clear`: operations on the stored address book.

use addressbook_config::Config;
use addressbook_core::PersonAddress;
use tabled::Tabled;

use crate::cli::{GlobalOpts, RemoveArgs};
use crate::commands::util;
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
pub struct EntryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Street")]
    street: String,
    #[tabled(rename = "No.")]
    house_number: String,
    #[tabled(rename = "Postcode")]
    postcode: String,
    #[tabled(rename = "City")]
    city: String,
}

impl From<&PersonAddress> for EntryRow {
    fn from(e: &PersonAddress) -> Self {
        Self {
            id: e.id().to_owned(),
            name: e.full_name(),
            street: e.address.street.clone(),
            house_number: e.address.house_number.clone(),
            postcode: e.address.postcode.clone(),
            city: e.address.city.clone(),
        }
    }
}

pub fn list(cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let book = config::open_book(cfg)?;
    let entries = book.list_addresses();

    let out = output::render_list(
        &global.output,
        entries.as_slice(),
        |e| EntryRow::from(e),
        |e| e.id().to_owned(),
        "The address book is empty",
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

pub fn remove(args: &RemoveArgs, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let mut book = config::open_book(cfg)?;
    let removed = book
        .remove_address(&args.id)
        .ok_or_else(|| CliError::NotFound {
            message: format!("No address book entry with id '{}'", args.id),
            hint: "list".into(),
        })?;
    book.flush()?;

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &removed,
        |e| {
            output::success(
                &format!("Removed {} at {}", e.full_name(), e.address.summary()),
                color,
            )
        },
        |e| e.id().to_owned(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

pub fn clear(cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    if !util::confirm("Remove every address book entry?", "clear", global.yes)? {
        output::print_output("Aborted", global.quiet);
        return Ok(());
    }

    let mut book = config::open_book(cfg)?;
    let count = book.len();
    book.clear();
    book.flush()?;

    let color = output::should_color(&global.color);
    output::print_output(
        &output::success(&format!("Removed {count} entries"), color),
        global.quiet,
    );
    Ok(())
}
