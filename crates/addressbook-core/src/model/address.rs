use serde::{Deserialize, Serialize};

/// A normalized address produced from a lookup result.
///
/// `id` is derived from latitude, longitude and house number, so the same
/// place looked up twice with the same house number has the same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: String,
    pub street: String,
    pub house_number: String,
    pub postcode: String,
    pub city: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Address {
    /// One-line rendering: `Street 12, 1234 City`.
    pub fn summary(&self) -> String {
        format!(
            "{} {}, {} {}",
            self.street, self.house_number, self.postcode, self.city
        )
    }

    /// Attach a person to this address.
    pub fn with_person(
        self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> PersonAddress {
        PersonAddress {
            address: self,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// An address book entry: an address plus the person living there.
///
/// Serialized flat, with the address fields next to `firstName` and
/// `lastName`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonAddress {
    #[serde(flatten)]
    pub address: Address,
    pub first_name: String,
    pub last_name: String,
}

impl PersonAddress {
    pub fn id(&self) -> &str {
        &self.address.id
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
