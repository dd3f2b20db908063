// ── Form controller ──
//
// Owns the transient form state (inputs, lookup results, selection, the
// single visible error) and wires user events to the lookup flow and the
// address book. Errors stop here: they become the visible error message
// and a diagnostic, and are never returned to the caller.

use std::sync::Arc;

use strum::Display;

use crate::diagnostics::DiagnosticSink;
use crate::error::{messages, CoreError, ErrorKind};
use crate::lookup::{AddressLookup, LookupTicket};
use crate::model::Address;
use crate::store::AddressBook;

/// Where the form is in its flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum FormState {
    #[default]
    Idle,
    AddressesFound,
    AddressSelected,
    Error,
}

/// The error currently shown on the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&CoreError> for FormError {
    fn from(err: &CoreError) -> Self {
        Self {
            kind: err.kind(),
            message: err.user_message(),
        }
    }
}

/// Form state machine driving lookup, selection, and submission.
pub struct FormController {
    lookup: Arc<AddressLookup>,
    book: AddressBook,
    diagnostics: Arc<dyn DiagnosticSink>,

    post_code: String,
    house_number: String,
    first_name: String,
    last_name: String,
    selected_address_id: Option<String>,
    results: Vec<Address>,
    error: Option<FormError>,
    state: FormState,
}

impl FormController {
    pub fn new(
        lookup: Arc<AddressLookup>,
        book: AddressBook,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            lookup,
            book,
            diagnostics,
            post_code: String::new(),
            house_number: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            selected_address_id: None,
            results: Vec::new(),
            error: None,
            state: FormState::Idle,
        }
    }

    // ── Input changes ────────────────────────────────────────────────

    pub fn set_post_code(&mut self, value: impl Into<String>) {
        self.post_code = value.into();
    }

    pub fn set_house_number(&mut self, value: impl Into<String>) {
        self.house_number = value.into();
    }

    pub fn set_first_name(&mut self, value: impl Into<String>) {
        self.first_name = value.into();
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) {
        self.last_name = value.into();
    }

    // ── Address form ─────────────────────────────────────────────────

    /// Submit the address form and wait for the lookup.
    pub async fn submit_address(&mut self) -> FormState {
        let Some(ticket) = self.begin_address_lookup() else {
            return self.state;
        };
        let result = self.lookup.execute(&ticket).await;
        self.complete_address_lookup(&ticket, result);
        self.state
    }

    /// First half of an address submission: clear the previous error,
    /// results and selection, then validate. Returns the ticket to execute,
    /// or `None` when validation failed (the error is already shown).
    pub fn begin_address_lookup(&mut self) -> Option<LookupTicket> {
        self.error = None;
        self.results.clear();
        self.selected_address_id = None;
        self.state = FormState::Idle;

        match self.lookup.begin(&self.post_code, &self.house_number) {
            Ok(ticket) => Some(ticket),
            Err(e) => {
                self.fail("lookup", &e);
                None
            }
        }
    }

    /// Second half of an address submission. Results for a ticket that was
    /// superseded by a later submission are discarded; returns whether the
    /// result was applied.
    pub fn complete_address_lookup(
        &mut self,
        ticket: &LookupTicket,
        result: Result<Vec<Address>, CoreError>,
    ) -> bool {
        if !self.lookup.is_current(ticket) {
            self.diagnostics.warning(
                "lookup",
                &format!(
                    "discarding stale response for request #{}",
                    ticket.generation()
                ),
            );
            return false;
        }

        match result {
            Ok(addresses) => {
                self.diagnostics.info(
                    "lookup",
                    &format!(
                        "found {} addresses for {} {}",
                        addresses.len(),
                        ticket.post_code(),
                        ticket.house_number()
                    ),
                );
                self.results = addresses;
                self.error = None;
                self.state = FormState::AddressesFound;
            }
            Err(e) => self.fail("lookup", &e),
        }
        true
    }

    /// Pick one of the lookup results. Unknown ids leave the selection as
    /// it was.
    pub fn select_address(&mut self, id: &str) -> FormState {
        if self.results.iter().any(|a| a.id == id) {
            self.selected_address_id = Some(id.to_owned());
            self.error = None;
            self.state = FormState::AddressSelected;
        } else {
            self.fail(
                "select",
                &CoreError::not_found(messages::SELECTED_NOT_FOUND),
            );
        }
        self.state
    }

    // ── Person form ──────────────────────────────────────────────────

    /// Attach the names to the selected address and add it to the book.
    /// On success every transient field is cleared.
    pub fn submit_person(&mut self) -> FormState {
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();

        if first_name.is_empty() || last_name.is_empty() {
            self.fail("submit", &CoreError::validation(messages::NAMES_MANDATORY));
            return self.state;
        }

        let Some(selected) = self.selected_address_id.as_deref() else {
            self.fail(
                "submit",
                &CoreError::validation(messages::NO_ADDRESS_SELECTED),
            );
            return self.state;
        };

        let Some(address) = self.results.iter().find(|a| a.id == selected) else {
            self.fail(
                "submit",
                &CoreError::not_found(messages::SELECTED_NOT_FOUND),
            );
            return self.state;
        };

        let entry = address.clone().with_person(first_name, last_name);
        let name = entry.full_name();
        if self.book.add_address(entry) {
            self.diagnostics.info(
                "submit",
                &format!("added {name} at {}", address.summary()),
            );
        }

        self.clear_all();
        self.state
    }

    /// Reset every transient field and go back to `Idle`.
    pub fn clear_all(&mut self) {
        self.post_code.clear();
        self.house_number.clear();
        self.first_name.clear();
        self.last_name.clear();
        self.selected_address_id = None;
        self.results.clear();
        self.error = None;
        self.state = FormState::Idle;
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn post_code(&self) -> &str {
        &self.post_code
    }

    pub fn house_number(&self) -> &str {
        &self.house_number
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn selected_address_id(&self) -> Option<&str> {
        self.selected_address_id.as_deref()
    }

    pub fn results(&self) -> &[Address] {
        &self.results
    }

    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    pub fn book(&self) -> &AddressBook {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut AddressBook {
        &mut self.book
    }

    /// Hand the address book back, e.g. to flush it on shutdown.
    pub fn into_book(self) -> AddressBook {
        self.book
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn fail(&mut self, action: &'static str, err: &CoreError) {
        self.diagnostics
            .error(action, &format!("{}: {err}", err.kind()));
        self.error = Some(FormError::from(err));
        self.state = FormState::Error;
    }
}
