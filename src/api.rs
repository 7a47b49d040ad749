/// Synchronous client for the **REST Countries API (v3.1)**.
///
/// This module covers the two country endpoints the crate consumes, both
/// restricted to the `name`, `flags`, and `population` fields:
///
/// - `GET {base}/v3.1/all?fields=name,flags,population`
/// - `GET {base}/v3.1/name/{query}?fields=name,flags,population`
///
/// ### Notes
/// - The search term is percent-encoded into the path as a single segment;
///   `-`, `_`, and `.` stay readable, everything else non-alphanumeric is
///   escaped.
/// - The API contract is a `200` with a (possibly empty) JSON array on
///   success, `404` when no name matches, and `500` on server error. Those
///   two statuses carry dedicated user messages; every other failure falls
///   into a default branch (see [`FetchError`]).
/// - One request per call: no retries, no pagination. Network timeouts use a
///   sane default (30s) and can be adjusted by editing the client builder.
///
/// Typical usage:
/// ```no_run
/// # use countries_rs::{Client, Query};
/// let client = Client::default();
/// let countries = client.fetch(&Query::Named("france".into()))?;
/// # Ok::<(), countries_rs::FetchError>(())
/// ```
use crate::models::Country;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::time::Duration;
use thiserror::Error;

pub use reqwest::StatusCode;

/// Fields requested from both endpoints.
const FIELDS: &str = "name,flags,population";

/// Which country lookup to perform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Query {
    /// The full country list.
    All,
    /// Search by (already trimmed, non-empty) name.
    Named(String),
}

impl Query {
    /// Map trimmed search-field text to a query: empty input means the full
    /// list, anything else is a name search.
    pub fn from_input(trimmed: &str) -> Self {
        if trimmed.is_empty() {
            Query::All
        } else {
            Query::Named(trimmed.to_string())
        }
    }
}

/// Why a fetch failed. The `Display` output of each variant is the exact
/// string shown to the user.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP 404: the search matched nothing.
    #[error("No countries found.")]
    NotFound,
    /// HTTP 500.
    #[error("Something went wrong, please try again later.")]
    ServerError,
    /// Any other non-success status.
    #[error("Request failed with HTTP {0}.")]
    Status(StatusCode),
    /// Transport or body-decoding failure.
    #[error("An error occurred while fetching countries.")]
    Request(#[from] reqwest::Error),
}

fn classify_status(status: StatusCode) -> FetchError {
    match status.as_u16() {
        404 => FetchError::NotFound,
        500 => FetchError::ServerError,
        _ => FetchError::Status(status),
    }
}

/// Anything that can resolve a [`Query`] into countries. [`Client`] is the
/// HTTP implementation; tests substitute scripted sources.
pub trait CountrySource: Send + Sync {
    fn fetch(&self, query: &Query) -> Result<Vec<Country>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("countries_rs/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .expect("reqwest client build");
        Self {
            base_url: "https://restcountries.com".into(),
            http,
        }
    }
}

// Allow -, _, . unescaped in names; everything else non-alphanumeric is
// escaped so the term stays a single path segment.
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc_segment(s: &str) -> String {
    utf8_percent_encode(s.trim(), SAFE).to_string()
}

impl Client {
    /// The request URL for a query against this client's `base_url`.
    pub fn url_for(&self, query: &Query) -> String {
        match query {
            Query::All => format!("{}/v3.1/all?fields={}", self.base_url, FIELDS),
            Query::Named(name) => format!(
                "{}/v3.1/name/{}?fields={}",
                self.base_url,
                enc_segment(name),
                FIELDS
            ),
        }
    }

    /// Fetch the countries matching `query`.
    ///
    /// ### Returns
    /// The decoded result list, in the API's order. An empty list is a valid
    /// success (the API may answer `200 []`).
    ///
    /// ### Errors
    /// - [`FetchError::NotFound`] / [`FetchError::ServerError`] for the two
    ///   classified statuses
    /// - [`FetchError::Status`] for any other non-success status
    /// - [`FetchError::Request`] for network and JSON-decoding failures
    ///
    /// ### Example
    /// ```no_run
    /// # use countries_rs::{Client, Query};
    /// let client = Client::default();
    /// let all = client.fetch(&Query::All)?;
    /// println!("{} countries", all.len());
    /// # Ok::<(), countries_rs::FetchError>(())
    /// ```
    pub fn fetch(&self, query: &Query) -> Result<Vec<Country>, FetchError> {
        let url = self.url_for(query);
        let resp = self.http.get(&url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(classify_status(status));
        }
        Ok(resp.json()?)
    }
}

impl CountrySource for Client {
    fn fetch(&self, query: &Query) -> Result<Vec<Country>, FetchError> {
        Client::fetch(self, query)
    }
}
