// Address lookup HTTP client
//
// Wraps `reqwest::Client` with URL construction for the getAddresses
// endpoint and maps status / body failures into `Error`.

use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{AddressesResponse, RawAddressRecord};
use crate::transport::TransportConfig;

const ADDRESSES_PATH: &str = "api/getAddresses";

/// HTTP client for the address lookup backend.
///
/// `base_url` is the backend root (e.g. `http://localhost:3000`); the
/// client appends `/api/getAddresses` itself.
#[derive(Debug, Clone)]
pub struct AddressClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AddressClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/api/getAddresses?postcode=..&streetnumber=..`.
    pub(crate) fn addresses_url(&self, postcode: &str, streetnumber: &str) -> Result<Url, Error> {
        let full = format!(
            "{}/{ADDRESSES_PATH}",
            self.base_url.as_str().trim_end_matches('/')
        );
        let mut url = Url::parse(&full)?;
        url.query_pairs_mut()
            .append_pair("postcode", postcode)
            .append_pair("streetnumber", streetnumber);
        Ok(url)
    }

    /// Look up all addresses for a postcode and house number.
    ///
    /// `GET /api/getAddresses?postcode={postcode}&streetnumber={streetnumber}`
    pub async fn get_addresses(
        &self,
        postcode: &str,
        streetnumber: &str,
    ) -> Result<Vec<RawAddressRecord>, Error> {
        let url = self.addresses_url(postcode, streetnumber)?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        let status = resp.status();

        if !status.is_success() {
            debug!(status = status.as_u16(), "address lookup rejected");
            // The body is informational; a truncated one still reports the status.
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        let parsed: AddressesResponse =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        debug!(count = parsed.details.len(), "address lookup succeeded");
        Ok(parsed.details)
    }
}
