use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use shared::protocol::{
    JoinGameRequest, JoinGameResponse, MoveRequest, ResignResponse, ServerUpdate, SessionRequest,
};
use tracing::debug;
use url::Url;

use crate::error::TransportError;

const RESIGN_PATH: &str = "/resign";
const START_GAME_PATH: &str = "/startgame";
const MOVE_PATH: &str = "/move";
const JOIN_GAME_PATH: &str = "/joingame";

/// Request/response calls the session makes against the game server.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn resign(&self, request: SessionRequest) -> Result<ResignResponse>;
    /// The server answers with nothing worth reading.
    async fn start_game(&self, request: SessionRequest) -> Result<()>;
    async fn submit_move(&self, request: MoveRequest) -> Result<ServerUpdate>;
    async fn join_lobby(&self, request: JoinGameRequest) -> Result<JoinGameResponse>;
}

/// Form-encoded POSTs against the game server, JSON responses.
pub struct HttpTransport {
    http: Client,
    server_url: Url,
}

impl HttpTransport {
    pub fn new(server_url: &str) -> Result<Self, TransportError> {
        let mut server_url = Url::parse(server_url)?;
        if !server_url.path().ends_with('/') {
            let path = format!("{}/", server_url.path());
            server_url.set_path(&path);
        }
        Ok(Self {
            http: Client::new(),
            server_url,
        })
    }

    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        Ok(self.server_url.join(path.trim_start_matches('/'))?)
    }

    pub(crate) async fn post_form<B: Serialize + ?Sized>(
        &self,
        path: &'static str,
        body: &B,
    ) -> Result<String, TransportError> {
        let url = self.endpoint(path)?;
        debug!(url = url.as_str(), "posting form");
        let res = self
            .http
            .post(url)
            .form(body)
            .send()
            .await
            .map_err(|source| TransportError::Request { path, source })?;
        let status = res.status();
        if !status.is_success() {
            return Err(TransportError::Status { path, status });
        }
        res.text()
            .await
            .map_err(|source| TransportError::Request { path, source })
    }

    pub(crate) async fn post_json<B, T>(
        &self,
        path: &'static str,
        body: &B,
    ) -> Result<T, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let raw = self.post_form(path, body).await?;
        serde_json::from_str(&raw).map_err(|source| TransportError::Body { path, source })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn resign(&self, request: SessionRequest) -> Result<ResignResponse> {
        Ok(self.post_json(RESIGN_PATH, &request).await?)
    }

    async fn start_game(&self, request: SessionRequest) -> Result<()> {
        self.post_form(START_GAME_PATH, &request).await?;
        Ok(())
    }

    async fn submit_move(&self, request: MoveRequest) -> Result<ServerUpdate> {
        Ok(self.post_json(MOVE_PATH, &request).await?)
    }

    async fn join_lobby(&self, request: JoinGameRequest) -> Result<JoinGameResponse> {
        Ok(self.post_json(JOIN_GAME_PATH, &request).await?)
    }
}
