use std::{sync::Arc, time::Duration};

use bytes::Bytes;
use reqwest::StatusCode;
use url::Url;

use crate::context::SessionContext;

use super::{FetchError, HttpClient, HttpRequest};

const SESSION_QUERY: [(&str, &str); 2] = [("__a", "1"), ("__d", "1")];

/// Performs the two kinds of requests the pipeline needs: session-decorated JSON
/// lookups and plain media downloads.
#[derive(Clone)]
pub struct Fetcher {
    client: Arc<dyn HttpClient>,
    session: Arc<SessionContext>,
    metadata_timeout: Duration,
    media_timeout: Duration,
}

impl Fetcher {
    pub fn new(
        client: Arc<dyn HttpClient>,
        session: Arc<SessionContext>,
        metadata_timeout: Duration,
        media_timeout: Duration,
    ) -> Self {
        Self {
            client,
            session,
            metadata_timeout,
            media_timeout,
        }
    }

    /// GET with every stored cookie and header attached and the abbreviated JSON
    /// query switched on. Response cookies are merged back into the session
    /// whatever the status; the status itself is not checked.
    pub async fn authenticated_get(&self, link: &str) -> Result<Bytes, FetchError> {
        let url = with_session_query(link)?;
        let snapshot = self.session.snapshot().await;

        let mut request = HttpRequest::get(url, self.metadata_timeout);
        request.cookies = snapshot.cookies;
        request.headers = snapshot.headers;

        debug!("Authenticated GET {}", request.url);
        let response = self.client.get(request).await?;

        let received = response
            .cookies
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()));
        let rotated = self.session.merge_cookies(received).await;
        if rotated > 0 {
            debug!("Rotated {} session cookies", rotated);
        }

        if !response.status.is_success() {
            debug!("Metadata request answered with status {}", response.status);
        }

        response.body
    }

    /// Plain GET of a media asset. Anything but `200 OK` is an error.
    pub async fn fetch_binary(&self, link: &str) -> Result<Bytes, FetchError> {
        let url = Url::parse(link).map_err(|_| FetchError::InvalidUrl(link.to_string()))?;

        debug!("Downloading media {}", url);
        let response = self.client.get(HttpRequest::get(url, self.media_timeout)).await?;

        if response.status != StatusCode::OK {
            return Err(FetchError::Status(response.status));
        }

        response.body
    }
}

/// Sets `__a=1` and `__d=1`, replacing any values already present.
pub(crate) fn with_session_query(link: &str) -> Result<Url, FetchError> {
    let mut url = Url::parse(link).map_err(|_| FetchError::InvalidUrl(link.to_string()))?;

    let kept = url
        .query_pairs()
        .filter(|(key, _)| !SESSION_QUERY.iter().any(|(name, _)| key == name))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect::<Vec<_>>();

    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, value) in &kept {
            pairs.append_pair(key, value);
        }
        for (key, value) in SESSION_QUERY {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::{
        service::http::HttpService,
        storage::{MemorySettingsStore, Settings},
    };

    fn fetcher(store: &MemorySettingsStore, settings: Settings) -> Fetcher {
        let session = Arc::new(SessionContext::new(settings, Arc::new(store.clone())));
        Fetcher::new(
            Arc::new(HttpService::new(reqwest::Client::new())),
            session,
            Duration::from_secs(5),
            Duration::from_secs(5),
        )
    }

    fn settings() -> Settings {
        Settings {
            cookies: BTreeMap::from([
                ("sessionid".to_string(), "S".to_string()),
                ("csrftoken".to_string(), "T".to_string()),
            ]),
            headers: BTreeMap::from([("User-Agent".to_string(), "Instagram 219.0".to_string())]),
            ..Default::default()
        }
    }

    #[test]
    fn test_session_query_is_set() {
        let url = with_session_query("https://www.instagram.com/p/ABC123/").unwrap();
        assert_eq!(url.as_str(), "https://www.instagram.com/p/ABC123/?__a=1&__d=1");
    }

    #[test]
    fn test_session_query_replaces_existing_values() {
        let url = with_session_query("https://www.instagram.com/reel/XYZ/?igsh=abc&__a=0&__d=dis").unwrap();
        let pairs = url.query_pairs().into_owned().collect::<Vec<_>>();
        assert_eq!(
            pairs,
            vec![
                ("igsh".to_string(), "abc".to_string()),
                ("__a".to_string(), "1".to_string()),
                ("__d".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_session_query_rejects_garbage() {
        assert!(matches!(with_session_query("not a url"), Err(FetchError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_authenticated_get_decorates_and_rotates() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/p/ABC123/"))
            .and(query_param("__a", "1"))
            .and(query_param("__d", "1"))
            .and(header("cookie", "csrftoken=T; sessionid=S"))
            .and(header("user-agent", "Instagram 219.0"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "csrftoken=T2; Path=/")
                    .set_body_string(r#"{"items": [{"media_type": 1}]}"#),
            )
            .mount(&server)
            .await;

        let store = MemorySettingsStore::default();
        let fetcher = fetcher(&store, settings());

        let body = fetcher
            .authenticated_get(&format!("{}/p/ABC123/", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, Bytes::from_static(br#"{"items": [{"media_type": 1}]}"#));

        let persisted = store.snapshot().await;
        assert_eq!(persisted.cookies.get("csrftoken").map(String::as_str), Some("T2"));
        assert_eq!(persisted.cookies.get("sessionid").map(String::as_str), Some("S"));
    }

    #[tokio::test]
    async fn test_authenticated_get_ignores_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"message": "login_required"}"#))
            .mount(&server)
            .await;

        let store = MemorySettingsStore::default();
        let fetcher = fetcher(&store, settings());

        let body = fetcher.authenticated_get(&format!("{}/someuser/", server.uri())).await;
        assert!(body.is_ok());
        assert_eq!(store.save_count().await, 0);
    }

    #[tokio::test]
    async fn test_fetch_binary_rejects_non_200() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/media/ok.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF]))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/media/gone.jpg"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let store = MemorySettingsStore::default();
        let fetcher = fetcher(&store, settings());

        let bytes = fetcher
            .fetch_binary(&format!("{}/media/ok.jpg", server.uri()))
            .await
            .unwrap();
        assert_eq!(bytes.as_ref(), &[0xFF, 0xD8, 0xFF]);

        let err = fetcher
            .fetch_binary(&format!("{}/media/gone.jpg", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status(status) if status == StatusCode::FORBIDDEN));
    }

    #[tokio::test]
    async fn test_fetch_binary_sends_no_session_cookies() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(header("cookie", "csrftoken=T; sessionid=S"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("plain"))
            .mount(&server)
            .await;

        let store = MemorySettingsStore::default();
        let fetcher = fetcher(&store, settings());

        let bytes = fetcher.fetch_binary(&format!("{}/cdn/v.mp4", server.uri())).await.unwrap();
        assert_eq!(bytes.as_ref(), b"plain");
    }
}
