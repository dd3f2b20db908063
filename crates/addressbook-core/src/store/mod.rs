// ── Address book store ──
//
// Ordered, de-duplicated entry storage with snapshot subscription and a
// pluggable key-value persistence backend.

mod address_book;
pub mod codec;
mod persistence;

pub use address_book::{AddressBook, DEFAULT_STORAGE_KEY};
pub use codec::{deserialize, serialize};
pub use persistence::{FileStorage, KeyValueStore, MemoryStorage};
