// ── Address lookup flow ──
//
// Validates the two form inputs, issues one request to the address API,
// and transforms the records. Every request gets a ticket from a
// generation counter; only the newest ticket is current, which lets the
// form controller drop responses that were overtaken by a later submit.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use addressbook_api::transport::{TlsMode, TransportConfig};
use addressbook_api::AddressClient;

use crate::config::LookupConfig;
use crate::convert::transform_address;
use crate::error::{messages, CoreError};
use crate::model::Address;

/// Handle for one lookup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    generation: u64,
    post_code: String,
    house_number: String,
}

impl LookupTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn post_code(&self) -> &str {
        &self.post_code
    }

    pub fn house_number(&self) -> &str {
        &self.house_number
    }
}

/// Check the post code and house number before anything hits the network.
pub fn validate_lookup_input(post_code: &str, house_number: &str) -> Result<(), CoreError> {
    let post_code = post_code.trim();
    let house_number = house_number.trim();

    // With both fields blank the house number message is the one shown.
    if house_number.is_empty() {
        return Err(CoreError::validation(messages::HOUSE_NUMBER_MANDATORY));
    }
    if post_code.is_empty() {
        return Err(CoreError::validation(messages::POST_CODE_MANDATORY));
    }
    if post_code.parse::<u64>().is_err() || house_number.parse::<u64>().is_err() {
        return Err(CoreError::validation(messages::NOT_NUMERIC));
    }
    Ok(())
}

/// The address lookup flow.
pub struct AddressLookup {
    client: AddressClient,
    generation: AtomicU64,
}

impl AddressLookup {
    /// Build the lookup flow from runtime configuration.
    pub fn new(config: &LookupConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: config
                .ca_cert
                .clone()
                .map_or(TlsMode::System, TlsMode::CustomCa),
            timeout: config.timeout,
        };
        let client = AddressClient::new(config.base_url.clone(), &transport)?;
        Ok(Self::with_client(client))
    }

    /// Build the lookup flow around an existing client.
    pub fn with_client(client: AddressClient) -> Self {
        Self {
            client,
            generation: AtomicU64::new(0),
        }
    }

    pub fn client(&self) -> &AddressClient {
        &self.client
    }

    /// Start a lookup: supersede any earlier ticket, then validate.
    ///
    /// A submission that fails validation still supersedes in-flight
    /// requests, so their late responses are dropped.
    pub fn begin(&self, post_code: &str, house_number: &str) -> Result<LookupTicket, CoreError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        validate_lookup_input(post_code, house_number)?;

        Ok(LookupTicket {
            generation,
            post_code: post_code.trim().to_owned(),
            house_number: house_number.trim().to_owned(),
        })
    }

    /// Whether `ticket` belongs to the most recent submission.
    pub fn is_current(&self, ticket: &LookupTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }

    /// Issue the request for a ticket and transform the results.
    ///
    /// Each record keeps its own house number when the API returns one;
    /// otherwise the submitted house number is used.
    pub async fn execute(&self, ticket: &LookupTicket) -> Result<Vec<Address>, CoreError> {
        let records = self
            .client
            .get_addresses(&ticket.post_code, &ticket.house_number)
            .await?;

        debug!(
            generation = ticket.generation,
            count = records.len(),
            "transforming lookup results"
        );

        Ok(records
            .into_iter()
            .map(|raw| {
                let house_number = raw
                    .house_number
                    .as_deref()
                    .map(str::trim)
                    .filter(|h| !h.is_empty())
                    .unwrap_or(&ticket.house_number)
                    .to_owned();
                transform_address(raw, &house_number)
            })
            .collect())
    }

    /// Validate and look up in one step.
    pub async fn lookup(
        &self,
        post_code: &str,
        house_number: &str,
    ) -> Result<Vec<Address>, CoreError> {
        let ticket = self.begin(post_code, house_number)?;
        self.execute(&ticket).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn lookup() -> AddressLookup {
        let config = LookupConfig::new("http://127.0.0.1:1".parse().unwrap());
        AddressLookup::new(&config).unwrap()
    }

    #[test]
    fn blank_post_code_is_mandatory() {
        let err = validate_lookup_input("  ", "350").unwrap_err();
        assert_eq!(err, CoreError::validation(messages::POST_CODE_MANDATORY));
    }

    #[test]
    fn blank_house_number_is_mandatory() {
        let err = validate_lookup_input("1345", "").unwrap_err();
        assert_eq!(err, CoreError::validation(messages::HOUSE_NUMBER_MANDATORY));
    }

    #[test]
    fn both_blank_reports_house_number() {
        let err = validate_lookup_input("", "").unwrap_err();
        assert_eq!(err, CoreError::validation(messages::HOUSE_NUMBER_MANDATORY));

        let err = validate_lookup_input(" ", "\t").unwrap_err();
        assert_eq!(err, CoreError::validation(messages::HOUSE_NUMBER_MANDATORY));
    }

    #[test]
    fn non_numeric_inputs_are_rejected() {
        for (post_code, house_number) in [("abc", "350"), ("1345", "12b"), ("13.4", "1")] {
            let err = validate_lookup_input(post_code, house_number).unwrap_err();
            assert_eq!(err, CoreError::validation(messages::NOT_NUMERIC));
        }
    }

    #[test]
    fn numeric_inputs_pass_with_surrounding_whitespace() {
        assert!(validate_lookup_input(" 1345 ", "350 ").is_ok());
    }

    #[test]
    fn begin_trims_and_issues_increasing_generations() {
        let lookup = lookup();
        let first = lookup.begin(" 1345", "350 ").unwrap();
        assert_eq!(first.post_code(), "1345");
        assert_eq!(first.house_number(), "350");
        assert!(lookup.is_current(&first));

        let second = lookup.begin("1345", "351").unwrap();
        assert!(second.generation() > first.generation());
        assert!(!lookup.is_current(&first));
        assert!(lookup.is_current(&second));
    }

    #[test]
    fn invalid_submission_still_supersedes_earlier_tickets() {
        let lookup = lookup();
        let ticket = lookup.begin("1345", "350").unwrap();
        assert!(lookup.begin("", "350").is_err());
        assert!(!lookup.is_current(&ticket));
    }

    #[tokio::test]
    async fn validation_failure_never_touches_the_network() {
        // The client points at a closed port: a request would surface as a
        // network error, not a validation error.
        let err = lookup().lookup("1345", "").await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Validation);
    }
}
