// Wire models for the getAddresses endpoint.
//
// Field names follow the JSON the backend emits (camelCase). Unknown
// fields are ignored so the backend can grow its payload freely.

use serde::{Deserialize, Deserializer, Serialize};

/// Response envelope: `{ "details": [ ... ] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressesResponse {
    pub details: Vec<RawAddressRecord>,
}

/// A single address as returned by the lookup API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAddressRecord {
    pub street: String,
    pub city: String,
    pub postcode: String,
    /// Some backends echo the house number, some don't. Accepts a JSON
    /// string or number.
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub house_number: Option<String>,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub region: Option<String>,
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    }))
}
