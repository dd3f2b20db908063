//! Effective configuration for a CLI invocation.
//!
//! Layers the global flags over the file + environment config and opens
//! the pieces a command needs: the persisted address book and the lookup
//! client.

use std::sync::Arc;

use addressbook_config::Config;
use addressbook_core::{
    AddressBook, AddressLookup, DiagnosticSink, FileStorage, KeyValueStore, TracingSink,
};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Load the config file and apply CLI flag overrides on top.
pub fn resolve(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = addressbook_config::load_config()?;
    apply_overrides(&mut cfg, global);
    Ok(cfg)
}

fn apply_overrides(cfg: &mut Config, global: &GlobalOpts) {
    if let Some(ref url) = global.base_url {
        cfg.base_url = Some(url.clone());
    }
    if let Some(ref dir) = global.data_dir {
        cfg.storage.dir = Some(dir.clone());
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
}

pub fn diagnostics() -> Arc<dyn DiagnosticSink> {
    Arc::new(TracingSink)
}

/// Open the address book persisted in the configured data directory.
pub fn open_book(cfg: &Config) -> Result<AddressBook, CliError> {
    let storage: Arc<dyn KeyValueStore> = Arc::new(FileStorage::new(cfg.data_dir()));
    let book = AddressBook::hydrate(storage, cfg.storage.key.clone(), diagnostics())?;
    Ok(book)
}

/// Build the lookup flow; fails when no usable base URL is configured.
pub fn build_lookup(cfg: &Config) -> Result<Arc<AddressLookup>, CliError> {
    let lookup_config = cfg.to_lookup_config()?;
    let lookup = AddressLookup::new(&lookup_config)?;
    Ok(Arc::new(lookup))
}

/// Base URL for help texts, as configured.
pub fn base_url_hint(cfg: &Config) -> String {
    cfg.base_url.clone().unwrap_or_else(|| "(not set)".into())
}
