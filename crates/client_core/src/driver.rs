//! Event loop owning the session controller.
//!
//! User commands, push events and request completions are merged here so
//! that every session mutation happens on one task.

use std::time::Duration;

use shared::protocol::ServerUpdate;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    controller::{Action, Completion, SessionController},
    push::PushEvent,
    render::Renderer,
};

const TEARDOWN_GRACE: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Move { row: usize, column: usize },
    Resign,
    Shutdown,
}

pub struct SessionDriver<R: Renderer> {
    controller: SessionController<R>,
    completions: mpsc::UnboundedReceiver<Completion>,
    commands: mpsc::Receiver<SessionCommand>,
    push: Option<mpsc::Receiver<PushEvent>>,
}

impl<R: Renderer> SessionDriver<R> {
    pub fn new(
        controller: SessionController<R>,
        completions: mpsc::UnboundedReceiver<Completion>,
        commands: mpsc::Receiver<SessionCommand>,
        push: Option<mpsc::Receiver<PushEvent>>,
    ) -> Self {
        Self {
            controller,
            completions,
            commands,
            push,
        }
    }

    /// Runs until a shutdown command arrives or the command queue closes,
    /// then tears the session down. Hands the controller back afterwards.
    pub async fn run(mut self) -> SessionController<R> {
        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(SessionCommand::Shutdown) | None => break,
                    Some(command) => self.handle_command(command),
                },
                Some(completion) = self.completions.recv() => {
                    self.controller.apply_completion(completion);
                }
                event = recv_push(&mut self.push), if self.push.is_some() => match event {
                    Some(event) => self.handle_push(event),
                    None => {
                        debug!("push channel receiver finished");
                        self.push = None;
                    }
                },
            }
        }
        info!("session driver stopping");
        finish_teardown(&mut self.controller, &mut self.completions).await;
        self.controller
    }

    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Move { row, column } => {
                self.controller.request_move(row, column);
            }
            SessionCommand::Resign => self.controller.resign(),
            SessionCommand::Shutdown => {}
        }
    }

    fn handle_push(&mut self, event: PushEvent) {
        match event {
            PushEvent::Opened => self.controller.handle_open(),
            PushEvent::Message(raw) => match serde_json::from_str::<ServerUpdate>(&raw) {
                Ok(update) => self.controller.handle_update(update),
                Err(err) => warn!(error = %err, "dropping malformed push update"),
            },
            PushEvent::Error(err) => warn!(error = %err, "push channel error"),
            PushEvent::Closed => info!("push channel closed"),
        }
    }
}

async fn recv_push(push: &mut Option<mpsc::Receiver<PushEvent>>) -> Option<PushEvent> {
    match push {
        Some(rx) => rx.recv().await,
        None => None,
    }
}

/// Tears the session down and waits, up to a short grace period, for the
/// resignation to be answered. Owners that exit right after teardown call
/// this so the runtime is not dropped with the request still in flight.
/// Returns whether the resignation was answered in time.
pub async fn finish_teardown<R: Renderer>(
    controller: &mut SessionController<R>,
    completions: &mut mpsc::UnboundedReceiver<Completion>,
) -> bool {
    if !controller.teardown() {
        return true;
    }
    let flushed = tokio::time::timeout(TEARDOWN_GRACE, async {
        while let Some(completion) = completions.recv().await {
            let resign_done = matches!(
                completion,
                Completion::Resigned(_)
                    | Completion::Failed {
                        action: Action::Resign,
                        ..
                    }
            );
            controller.apply_completion(completion);
            if resign_done {
                return true;
            }
        }
        false
    })
    .await;
    match flushed {
        Ok(answered) => answered,
        Err(_) => {
            warn!("teardown resignation still pending; leaving it behind");
            false
        }
    }
}
