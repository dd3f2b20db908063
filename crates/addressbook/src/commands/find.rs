//! `find`: look up addresses without touching the address book.

use addressbook_config::Config;
use addressbook_core::{Address, AddressBook, FormController};
use tabled::Tabled;

use crate::cli::{GlobalOpts, LookupArgs};
use crate::commands::util;
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
pub struct AddressRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Street")]
    street: String,
    #[tabled(rename = "No.")]
    house_number: String,
    #[tabled(rename = "Postcode")]
    postcode: String,
    #[tabled(rename = "City")]
    city: String,
}

impl From<&Address> for AddressRow {
    fn from(a: &Address) -> Self {
        Self {
            id: a.id.clone(),
            street: a.street.clone(),
            house_number: a.house_number.clone(),
            postcode: a.postcode.clone(),
            city: a.city.clone(),
        }
    }
}

pub async fn handle(args: &LookupArgs, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let lookup = config::build_lookup(cfg)?;
    let mut form = FormController::new(lookup, AddressBook::new(), config::diagnostics());

    util::lookup_addresses(&mut form, args, cfg, global).await?;

    let out = output::render_list(
        &global.output,
        form.results(),
        |a| AddressRow::from(a),
        |a| a.id.clone(),
        "No addresses found",
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
