// ── Domain model ──

pub mod address;

pub use address::{Address, PersonAddress};
