//! Command dispatch: bridges CLI args -> form controller / address book ->
//! output formatting.

pub mod add;
pub mod book;
pub mod config_cmd;
pub mod find;
pub mod util;

use addressbook_config::Config;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a book or lookup command to its handler.
pub async fn dispatch(cmd: Command, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Find(args) => find::handle(&args, cfg, global).await,
        Command::Add(args) => add::handle(args, cfg, global).await,
        Command::List => book::list(cfg, global),
        Command::Remove(args) => book::remove(&args, cfg, global),
        Command::Clear => book::clear(cfg, global),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
