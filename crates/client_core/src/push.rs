//! Server push channel over a WebSocket.
//!
//! Open once, never reconnect. Errors and closes are reported as events and
//! the owner decides what to do with them (today: nothing).

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info};
use url::Url;

use crate::error::PushError;

const PUSH_EVENT_BUFFER: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushEvent {
    Opened,
    Message(String),
    Error(String),
    Closed,
}

/// Builds the channel address for `token`, mapping http(s) bases onto ws(s).
pub fn push_url(base: &str, token: &str) -> Result<Url, PushError> {
    let ws_base = if base.starts_with("ws://") || base.starts_with("wss://") {
        base.to_string()
    } else if base.starts_with("https://") {
        base.replacen("https://", "wss://", 1)
    } else if base.starts_with("http://") {
        base.replacen("http://", "ws://", 1)
    } else {
        return Err(PushError::UnsupportedScheme(base.to_string()));
    };
    let mut url = Url::parse(&ws_base)?;
    url.query_pairs_mut().append_pair("token", token);
    Ok(url)
}

pub async fn connect_push_channel(
    base: &str,
    token: &str,
) -> Result<mpsc::Receiver<PushEvent>, PushError> {
    let url = push_url(base, token)?;
    let (ws_stream, _) = connect_async(url.as_str())
        .await
        .map_err(|source| PushError::Connect {
            url: url.to_string(),
            source,
        })?;
    info!(url = url.as_str(), "push channel connected");
    let (_, mut ws_reader) = ws_stream.split();

    let (tx, rx) = mpsc::channel(PUSH_EVENT_BUFFER);
    tokio::spawn(async move {
        if tx.send(PushEvent::Opened).await.is_err() {
            return;
        }
        while let Some(msg) = ws_reader.next().await {
            let event = match msg {
                Ok(Message::Text(text)) => PushEvent::Message(text),
                Ok(Message::Close(_)) => break,
                Ok(other) => {
                    debug!(?other, "ignoring non-text push frame");
                    continue;
                }
                Err(err) => {
                    let _ = tx.send(PushEvent::Error(err.to_string())).await;
                    return;
                }
            };
            if tx.send(event).await.is_err() {
                return;
            }
        }
        let _ = tx.send(PushEvent::Closed).await;
    });

    Ok(rx)
}
