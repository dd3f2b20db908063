// addressbook-api: Async Rust client for the postcode address lookup API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::AddressClient;
pub use error::Error;
pub use models::{AddressesResponse, RawAddressRecord};
pub use transport::TransportConfig;
