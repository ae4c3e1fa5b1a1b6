//! HTTP access for the collector

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::error::{Error, Result};

/// Boxed cause of a failed request
pub type FetchError = Box<dyn std::error::Error + Send + Sync>;

/// Body of a successful GET plus its declared media type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub body: Vec<u8>,
    /// Raw `Content-Type` header, e.g. `text/html; charset=iso-8859-1`
    pub content_type: Option<String>,
}

impl Fetched {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }
}

/// Something that can GET a URL and hand back the body
pub trait Fetcher {
    /// Fetch `url`, failing on network errors and non-success statuses
    fn fetch(&self, url: &Url) -> std::result::Result<Fetched, FetchError>;
}

/// Settings for the HTTP client
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// User-Agent header; reqwest sends none by default
    pub user_agent: Option<String>,
    /// Whole-request timeout; reqwest's default applies when unset
    pub timeout: Option<Duration>,
}

/// Blocking reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(options: &FetchOptions) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(agent) = &options.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::General(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> std::result::Result<Fetched, FetchError> {
        let response = self.client.get(url.clone()).send()?.error_for_status()?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        Ok(Fetched {
            body: response.bytes()?.to_vec(),
            content_type,
        })
    }
}

/// Serves canned bodies from memory and records every request
///
/// Unknown URLs fail like a 404 would. Handy for replaying a saved page
/// without network access.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    responses: HashMap<String, Fetched>,
    requests: RefCell<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the response served for `url`
    pub fn insert(&mut self, url: &str, response: Fetched) {
        self.responses.insert(url.to_string(), response);
    }

    /// Builder-style insert of a body without a media type
    pub fn with(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.insert(url, Fetched::new(body));
        self
    }

    /// Builder-style insert of a full response
    pub fn with_response(mut self, url: &str, response: Fetched) -> Self {
        self.insert(url, response);
        self
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Fetcher for MemoryFetcher {
    fn fetch(&self, url: &Url) -> std::result::Result<Fetched, FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        self.responses
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| format!("HTTP status 404 Not Found for url ({})", url).into())
    }
}
