use std::{
    collections::HashMap,
    future::Future,
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::{
    board::Board,
    protocol::{
        JoinGameRequest, JoinGameResponse, MoveRequest, ResignResponse, ServerUpdate,
        SessionRequest,
    },
};
use tokio::sync::Notify;

use crate::{
    render::{Field, Renderer},
    transport::Transport,
};

mod lobby_tests;

#[derive(Debug, Default)]
pub(crate) struct RenderLog {
    pub boards: Vec<Board>,
    pub texts: HashMap<Field, String>,
    pub text_writes: usize,
    pub alerts: Vec<String>,
    pub navigations: Vec<String>,
}

#[derive(Clone, Default)]
pub(crate) struct RecordingRenderer {
    log: Arc<Mutex<RenderLog>>,
}

impl RecordingRenderer {
    pub fn log(&self) -> std::sync::MutexGuard<'_, RenderLog> {
        self.log.lock().expect("render log")
    }

    pub fn text(&self, field: Field) -> Option<String> {
        self.log().texts.get(&field).cloned()
    }
}

impl Renderer for RecordingRenderer {
    fn draw_board(&mut self, board: &Board) {
        self.log().boards.push(board.clone());
    }

    fn set_text(&mut self, field: Field, text: &str) {
        let mut log = self.log();
        log.texts.insert(field, text.to_string());
        log.text_writes += 1;
    }

    fn alert(&mut self, message: &str) {
        self.log().alerts.push(message.to_string());
    }

    fn navigate(&mut self, location: &str) {
        self.log().navigations.push(location.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Resign(SessionRequest),
    StartGame(SessionRequest),
    Move(MoveRequest),
    Join(JoinGameRequest),
}

/// Transport double. Moves hang forever unless a response is configured.
#[derive(Default)]
pub(crate) struct FakeTransport {
    calls: Mutex<Vec<Call>>,
    pub called: Notify,
    pub move_response: Option<ServerUpdate>,
    pub resign_message: String,
    pub join_response: JoinGameResponse,
    pub fail_with: Option<String>,
}

impl FakeTransport {
    pub fn answering_moves(update: ServerUpdate) -> Self {
        Self {
            move_response: Some(update),
            ..Self::default()
        }
    }

    pub fn resigning_with(message: impl Into<String>) -> Self {
        Self {
            resign_message: message.into(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls").clone()
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.lock().expect("calls").push(call);
        self.called.notify_one();
        match &self.fail_with {
            Some(err) => Err(anyhow!(err.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn resign(&self, request: SessionRequest) -> Result<ResignResponse> {
        self.record(Call::Resign(request))?;
        Ok(ResignResponse {
            message: self.resign_message.clone(),
            error: false,
        })
    }

    async fn start_game(&self, request: SessionRequest) -> Result<()> {
        self.record(Call::StartGame(request))
    }

    async fn submit_move(&self, request: MoveRequest) -> Result<ServerUpdate> {
        self.record(Call::Move(request))?;
        match &self.move_response {
            Some(update) => Ok(update.clone()),
            None => futures::future::pending().await,
        }
    }

    async fn join_lobby(&self, request: JoinGameRequest) -> Result<JoinGameResponse> {
        self.record(Call::Join(request))?;
        Ok(self.join_response.clone())
    }
}

pub(crate) async fn within<F: Future>(future: F) -> F::Output {
    tokio::time::timeout(Duration::from_secs(2), future)
        .await
        .expect("timed out")
}

/// Polls `condition` until it holds or two seconds pass.
pub(crate) async fn eventually(mut condition: impl FnMut() -> bool) {
    within(async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
}
