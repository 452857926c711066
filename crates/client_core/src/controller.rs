//! Session controller: the one owner of session state.
//!
//! User input, push updates and request completions all end up here. Network
//! calls run as spawned tasks and report back through [`Completion`]s, which
//! the owner feeds into [`SessionController::apply_completion`]; a move
//! response therefore re-enters through the same `handle_update` path as a
//! pushed update.

use std::{future::Future, sync::Arc};

use shared::{
    board::Board,
    domain::{GameId, PlayerId, STARTING_SCORE},
    protocol::{ResignResponse, ServerUpdate, SessionRequest},
};
use tokio::{runtime::Handle, sync::mpsc};
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    render::{
        black_score_text, opponent_text, our_move_text, their_move_text, white_score_text, Field,
        Renderer,
    },
    session::Session,
    teardown::ResignOnTeardown,
    transport::Transport,
};

pub const GAME_STARTED_MESSAGE: &str = "Game Started!";
/// Query parameter marking the page of the player who joined a lobby.
pub const JOINED_GAME_PARAM: &str = "game";

/// Request kinds that report back through [`Completion`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move,
    Resign,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Move(ServerUpdate),
    Resigned(String),
    Failed { action: Action, error: String },
}

pub struct SessionController<R: Renderer> {
    transport: Arc<dyn Transport>,
    renderer: R,
    page_url: Url,
    session: Option<Session>,
    finished: bool,
    resign_on_teardown: ResignOnTeardown,
    completions: mpsc::UnboundedSender<Completion>,
}

impl<R: Renderer> SessionController<R> {
    pub fn new(
        transport: Arc<dyn Transport>,
        renderer: R,
        page_url: Url,
    ) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let (completions, completions_rx) = mpsc::unbounded_channel();
        let controller = Self {
            transport,
            renderer,
            page_url,
            session: None,
            finished: false,
            resign_on_teardown: ResignOnTeardown::default(),
            completions,
        };
        (controller, completions_rx)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_our_turn(&self) -> bool {
        self.session.as_ref().is_some_and(|session| session.our_turn)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Starts a session. Calling it again replaces the previous session and
    /// re-arms the teardown resignation for the new identifiers.
    pub fn initialize(&mut self, game_id: GameId, player_id: PlayerId) {
        info!(game_id = game_id.0, player_id = player_id.as_str(), "session initialized");
        let session = Session::new(game_id, player_id);
        self.resign_on_teardown.arm(session.request());
        self.session = Some(session);
        self.finished = false;
    }

    pub fn initialize_singleplayer(
        &mut self,
        game_id: GameId,
        player_id: PlayerId,
        initial_board: &Board,
    ) {
        self.initialize(game_id, player_id);
        self.renderer.draw_board(initial_board);
        self.renderer
            .set_text(Field::WhiteScore, &white_score_text(STARTING_SCORE));
        self.renderer
            .set_text(Field::BlackScore, &black_score_text(STARTING_SCORE));
        self.renderer.set_text(Field::Status, GAME_STARTED_MESSAGE);
    }

    /// The push channel is live. A page opened through a lobby link belongs
    /// to the second player, who tells the server to start and waits for the
    /// first update before moving.
    pub fn handle_open(&mut self) {
        let joined = self
            .page_url
            .query_pairs()
            .any(|(key, _)| key == JOINED_GAME_PARAM);
        if !joined {
            debug!("push channel open; game already started by its creator");
            return;
        }
        let Some(session) = self.session.as_mut() else {
            warn!("push channel opened before the session was initialized");
            return;
        };
        session.our_turn = false;
        let request = session.request();
        info!(game_id = request.game_id.0, "joined lobby game; asking server to start");
        let transport = Arc::clone(&self.transport);
        tokio::spawn(async move {
            if let Err(err) = transport.start_game(request).await {
                warn!(error = %err, "start game request failed");
            }
        });
    }

    pub fn handle_update(&mut self, update: ServerUpdate) {
        if !update.error {
            if let Some(board) = &update.board {
                self.renderer.draw_board(board);
            }
            if let Some(score) = update.whitescore {
                self.renderer
                    .set_text(Field::WhiteScore, &white_score_text(score));
            }
            if let Some(score) = update.blackscore {
                self.renderer
                    .set_text(Field::BlackScore, &black_score_text(score));
            }
            if let Some(description) = &update.ourmove {
                self.renderer
                    .set_text(Field::OurMove, &our_move_text(description));
            }
            if let Some(description) = &update.theirmove {
                self.renderer
                    .set_text(Field::TheirMove, &their_move_text(description));
            }
            if let Some(name) = &update.opponent {
                self.renderer.set_text(Field::Opponent, &opponent_text(name));
            }
            if update.done {
                info!(message = %update.message, "game over");
                self.finished = true;
            }
        } else {
            debug!(message = %update.message, "server reported an error");
        }

        match self.session.as_mut() {
            Some(session) => session.our_turn = update.our_turn,
            None => warn!("update arrived before the session was initialized"),
        }
        self.renderer.set_text(Field::Status, &update.message);
    }

    /// Returns whether a move request went out. Clicks outside our turn are
    /// dropped silently.
    pub fn request_move(&mut self, row: usize, column: usize) -> bool {
        let Some(session) = self.session.as_mut().filter(|session| session.our_turn) else {
            debug!(row, column, "ignoring move outside our turn");
            return false;
        };
        session.our_turn = false;
        let request = session.move_request(row, column);
        info!(game_id = request.game_id.0, row, column, "submitting move");

        let transport = Arc::clone(&self.transport);
        self.spawn_request(Action::Move, async move {
            transport.submit_move(request).await.map(Completion::Move)
        });
        true
    }

    pub fn resign(&mut self) {
        let Some(session) = self.session.as_ref() else {
            warn!("resign requested without a session");
            return;
        };
        self.spawn_resign(session.request());
    }

    /// Resigns once for the current session, however often the view is torn
    /// down. Returns whether a resignation went out.
    pub fn teardown(&mut self) -> bool {
        let Some(request) = self.resign_on_teardown.fire() else {
            return false;
        };
        info!(game_id = request.game_id.0, "view torn down; resigning");
        self.spawn_resign(request);
        true
    }

    pub fn apply_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Move(update) => self.handle_update(update),
            Completion::Resigned(message) => self.renderer.set_text(Field::Status, &message),
            Completion::Failed { action, error } => {
                warn!(?action, error = %error, "request failed");
            }
        }
    }

    fn spawn_resign(&self, request: SessionRequest) {
        let transport = Arc::clone(&self.transport);
        self.spawn_request(Action::Resign, async move {
            transport
                .resign(request)
                .await
                .map(|ResignResponse { message, .. }| Completion::Resigned(message))
        });
    }

    fn spawn_request<F>(&self, action: Action, request: F)
    where
        F: Future<Output = anyhow::Result<Completion>> + Send + 'static,
    {
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let completion = request.await.unwrap_or_else(|err| Completion::Failed {
                action,
                error: format!("{err:#}"),
            });
            let _ = completions.send(completion);
        });
    }
}

impl<R: Renderer> Drop for SessionController<R> {
    fn drop(&mut self) {
        let Some(request) = self.resign_on_teardown.fire() else {
            return;
        };
        let Ok(handle) = Handle::try_current() else {
            warn!(
                game_id = request.game_id.0,
                "no runtime left to resign on teardown"
            );
            return;
        };
        let transport = Arc::clone(&self.transport);
        handle.spawn(async move {
            if let Err(err) = transport.resign(request).await {
                warn!(error = %err, "resign on teardown failed");
            }
        });
    }
}
