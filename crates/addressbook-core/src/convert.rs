// ── API-to-domain conversion ──
//
// Bridges the raw `addressbook_api` record into the canonical `Address`.

use addressbook_api::RawAddressRecord;

use crate::model::Address;

/// Stable identifier for a physical address: `{lat}_{lon}_{house_number}`.
pub fn address_id(lat: f64, lon: f64, house_number: &str) -> String {
    format!("{lat}_{lon}_{house_number}")
}

/// Normalize a raw lookup record, stamping it with `house_number`.
///
/// Pure and infallible: input validation happens upstream in the lookup
/// flow.
pub fn transform_address(raw: RawAddressRecord, house_number: &str) -> Address {
    Address {
        id: address_id(raw.lat, raw.lon, house_number),
        street: raw.street,
        house_number: house_number.to_owned(),
        postcode: raw.postcode,
        city: raw.city,
        lat: raw.lat,
        lon: raw.lon,
        region: raw.region,
    }
}
