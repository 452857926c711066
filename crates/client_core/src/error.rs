use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {path} failed: {source}")]
    Request {
        path: &'static str,
        source: reqwest::Error,
    },
    #[error("server answered {path} with status {status}")]
    Status {
        path: &'static str,
        status: reqwest::StatusCode,
    },
    #[error("could not decode {path} response: {source}")]
    Body {
        path: &'static str,
        source: serde_json::Error,
    },
    #[error("invalid server url: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Debug, Error)]
pub enum PushError {
    #[error("push url must start with ws://, wss://, http:// or https://: {0}")]
    UnsupportedScheme(String),
    #[error("invalid push url: {0}")]
    Url(#[from] url::ParseError),
    #[error("failed to open push channel {url}: {source}")]
    Connect {
        url: String,
        source: tokio_tungstenite::tungstenite::Error,
    },
}
