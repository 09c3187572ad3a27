mod error;
mod fetcher;

pub use error::FetchError;
pub use fetcher::Fetcher;

use std::{collections::BTreeMap, time::Duration};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header, Client, StatusCode};
use url::Url;

/// A GET request as the fetcher wants it sent.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: Url,
    pub headers: BTreeMap<String, String>,
    pub cookies: BTreeMap<String, String>,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn get(url: Url, timeout: Duration) -> Self {
        Self {
            url,
            headers: BTreeMap::new(),
            cookies: BTreeMap::new(),
            timeout,
        }
    }

    /// All cookies folded into a single `Cookie` header value.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }

        let pairs = self
            .cookies
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>();

        Some(pairs.join("; "))
    }
}

#[derive(Debug)]
pub struct HttpResponse {
    pub status: StatusCode,
    /// `Set-Cookie` name/value pairs, in the order received.
    pub cookies: Vec<(String, String)>,
    /// Cookies are still usable when draining the body fails.
    pub body: Result<Bytes, FetchError>,
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, FetchError>;
}

#[derive(Clone)]
pub struct HttpService {
    client: Client,
}

impl HttpService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for HttpService {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        let mut builder = self.client.get(request.url.clone()).timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(cookie) = request.cookie_header() {
            builder = builder.header(header::COOKIE, cookie);
        }

        let response = builder.send().await.map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        let cookies = response
            .cookies()
            .map(|cookie| (cookie.name().to_string(), cookie.value().to_string()))
            .collect::<Vec<_>>();
        let body = response.bytes().await.map_err(|e| FetchError::Read(e.to_string()));

        Ok(HttpResponse { status, cookies, body })
    }
}
