use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Error making request: {0}")]
    Request(String),
    #[error("Error reading response: {0}")]
    Read(String),
    #[error("Received status '{0}'")]
    Status(StatusCode),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
