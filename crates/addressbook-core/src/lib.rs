// addressbook-core: Lookup flow, address book store, and form state
// between addressbook-api and consumers (CLI, other front ends).

pub mod config;
pub mod convert;
pub mod diagnostics;
pub mod error;
pub mod form;
pub mod lookup;
pub mod model;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::LookupConfig;
pub use convert::{address_id, transform_address};
pub use diagnostics::{DiagnosticEvent, DiagnosticSink, MemorySink, Severity, TracingSink};
pub use error::{CoreError, ErrorKind};
pub use form::{FormController, FormError, FormState};
pub use lookup::{AddressLookup, LookupTicket};
pub use model::{Address, PersonAddress};
pub use store::{AddressBook, FileStorage, KeyValueStore, MemoryStorage};
