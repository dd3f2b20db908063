// (De)serialization boundary between the store and its persistence backend.

use crate::error::CoreError;
use crate::model::PersonAddress;

/// Encode entries as a JSON array, preserving order.
pub fn serialize(entries: &[PersonAddress]) -> Result<String, CoreError> {
    Ok(serde_json::to_string(entries)?)
}

/// Decode a JSON array produced by [`serialize`].
pub fn deserialize(payload: &str) -> Result<Vec<PersonAddress>, CoreError> {
    Ok(serde_json::from_str(payload)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::convert::address_id;
    use crate::model::Address;
    use pretty_assertions::assert_eq;

    fn entry(lat: f64, lon: f64, house_number: &str, first: &str, last: &str) -> PersonAddress {
        Address {
            id: address_id(lat, lon, house_number),
            street: "Dorpsstraat".into(),
            house_number: house_number.into(),
            postcode: "1345".into(),
            city: "Aalsmeer".into(),
            lat,
            lon,
            region: None,
        }
        .with_person(first, last)
    }

    #[test]
    fn empty_sequence_round_trips() {
        assert_eq!(serialize(&[]).unwrap(), "[]");
        assert!(deserialize(&serialize(&[]).unwrap()).unwrap().is_empty());
    }

    #[test]
    fn entries_round_trip_in_order() {
        let mut with_region = entry(51.923_6, 4.477_9, "7", "Grace", "Hopper");
        with_region.address.region = Some("Zuid-Holland".into());

        let entries = vec![
            entry(52.1, 5.1, "350", "Ada", "Lovelace"),
            with_region,
            entry(-33.868_8, 151.209_3, "1", "Alan", "Turing"),
        ];

        assert_eq!(deserialize(&serialize(&entries).unwrap()).unwrap(), entries);
    }

    #[test]
    fn garbage_is_a_serialization_error() {
        let err = deserialize("{not json").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Serialization);
    }

    #[test]
    fn accepts_payloads_written_by_other_front_ends() {
        let payload = r#"[{
            "id": "52.1_5.1_350",
            "street": "Dorpsstraat",
            "houseNumber": "350",
            "postcode": "1345",
            "city": "Aalsmeer",
            "lat": 52.1,
            "lon": 5.1,
            "firstName": "Ada",
            "lastName": "Lovelace"
        }]"#;

        let entries = deserialize(payload).unwrap();
        assert_eq!(entries, vec![entry(52.1, 5.1, "350", "Ada", "Lovelace")]);
    }
}
