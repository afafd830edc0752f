// API client module: a small blocking HTTP client for the Veo app API.
// Every call is a single synchronous round-trip; listing may walk several
// pages one after another.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, CONTENT_TYPE, LINK};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::models::{ListRecordingsResult, Period, Recording, RecordingDetails};

pub const DEFAULT_BASE_URL: &str = "https://app.veo.co/api/app";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const TOTAL_COUNT_HEADER: &str = "x-veo-total-count";

/// Fields requested from the listing endpoint. The server returns only
/// these.
const LIST_FIELDS: &[&str] = &[
    "camera",
    "created",
    "start",
    "duration",
    "identifier",
    "slug",
    "title",
    "url",
    "thumbnail",
    "reel_url",
    "team",
    "privacy",
    "permissions",
    "is_accessible",
];

/// Client for the Veo API. Holds a reqwest blocking client, the base URL
/// and an optional bearer token. Immutable once built.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

/// Builder for [`ApiClient`]. Unset options fall back to the production
/// endpoint, no token and a 30 second timeout.
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    token: Option<String>,
    timeout: Option<Duration>,
    client: Option<Client>,
}

impl ApiClientBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a preconfigured transport. Overrides `timeout`.
    pub fn http_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
                .build()?,
        };
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(ApiClient {
            client,
            base_url,
            token: self.token.filter(|t| !t.is_empty()),
        })
    }
}

/// Options for [`ApiClient::list_recordings`].
#[derive(Debug, Clone, Copy)]
pub struct ListOptions {
    /// 1-indexed page to start from; 0 is treated as 1.
    pub page: u32,
    /// Keep following `rel="next"` links until the last page.
    pub fetch_all: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        ListOptions {
            page: 1,
            fetch_all: false,
        }
    }
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Send a request to `path` (relative to the base URL, query string
    /// included). The body, if any, is sent as JSON.
    fn do_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "sending request");

        let mut req = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            // Encoding errors surface from `send` as transport errors.
            req = req.json(body);
        }
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send()?;
        debug!(status = resp.status().as_u16(), %url, "received response");
        Ok(resp)
    }

    /// GET `path` and decode the JSON body into `T`.
    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.do_request::<()>(Method::GET, path, None)?;
        decode_response(resp)
    }

    /// List recordings owned by `club_slug`.
    ///
    /// With `fetch_all` set, pages are requested one after another for as
    /// long as the `Link` header advertises a next page. The total count is
    /// taken from the first response only. Any failure aborts the walk and
    /// drops what was collected so far.
    pub fn list_recordings(
        &self,
        club_slug: &str,
        opts: &ListOptions,
    ) -> Result<ListRecordingsResult> {
        let mut result = ListRecordingsResult::default();
        let mut page = opts.page.max(1);
        let mut first = true;

        loop {
            let path = format!("/clubs/{}/recordings/?{}", club_slug, list_query(page));
            let resp = self.do_request::<()>(Method::GET, &path, None)?;
            let headers = resp.headers().clone();
            let recordings: Vec<Recording> = decode_response(resp)?;

            if first {
                result.total_count = total_count(&headers);
                first = false;
            }
            debug!(page, count = recordings.len(), "fetched recordings page");
            result.recordings.extend(recordings);

            if !opts.fetch_all {
                break;
            }
            let link = headers
                .get(LINK)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            if !has_next_page(link) {
                break;
            }
            page += 1;
        }

        Ok(result)
    }

    /// Fetch the full record for one match.
    pub fn get_recording(&self, identifier: &str) -> Result<RecordingDetails> {
        self.get_json(&format!("/matches/{}/", identifier))
    }

    /// Fetch the periods (halves etc.) of a match. Callers generally treat
    /// a failure here as missing enrichment rather than a hard error.
    pub fn get_periods(&self, slug: &str) -> Result<Vec<Period>> {
        self.get_json(&format!("/matches/{}/periods/", slug))
    }
}

/// Check the status, read the whole body and decode it. Non-2xx responses
/// become `ApiError::Api` with the body text attached.
fn decode_response<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    let text = resp.text()?;
    if !status.is_success() {
        return Err(ApiError::Api {
            status: status.as_u16(),
            body: text,
        });
    }
    Ok(serde_json::from_str(&text)?)
}

/// Query string for one page of the listing. Page 1 carries no `page`
/// parameter so the server keeps its default ordering.
fn list_query(page: u32) -> String {
    let mut parts: Vec<String> = LIST_FIELDS
        .iter()
        .map(|field| format!("fields={}", field))
        .collect();
    parts.push("filter=own".to_string());
    if page > 1 {
        parts.push(format!("page={}", page));
    }
    parts.join("&")
}

fn total_count(headers: &HeaderMap) -> u64 {
    headers
        .get(TOTAL_COUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

/// Whether a `Link` header value advertises a next page. A plain substring
/// check for `rel="next"`.
pub fn has_next_page(link_header: &str) -> bool {
    link_header.contains(r#"rel="next""#)
}
