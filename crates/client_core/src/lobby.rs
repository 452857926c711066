use anyhow::{Context, Result};
use shared::{domain::LobbyId, protocol::JoinGameRequest};
use tracing::info;

use crate::{controller::JOINED_GAME_PARAM, render::Renderer, transport::Transport};

pub const OWN_LOBBY_ALERT: &str = "You can't join your own lobby";
pub const GONE_LOBBY_ALERT: &str = "This lobby no longer exists";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    OwnLobby,
    Gone,
    Joined { location: String },
}

pub fn multigame_location(lobby: LobbyId) -> String {
    format!("/multigame?{JOINED_GAME_PARAM}={lobby}")
}

/// Asks to join `lobby`. Refusals are shown as alerts rather than on the
/// status line; acceptance navigates to the multiplayer game page.
pub async fn join_lobby<R: Renderer>(
    transport: &dyn Transport,
    renderer: &mut R,
    lobby: LobbyId,
) -> Result<JoinOutcome> {
    let response = transport
        .join_lobby(JoinGameRequest { lobby })
        .await
        .with_context(|| format!("failed to join lobby {lobby}"))?;

    let outcome = if response.owngame {
        renderer.alert(OWN_LOBBY_ALERT);
        JoinOutcome::OwnLobby
    } else if response.gone {
        renderer.alert(GONE_LOBBY_ALERT);
        JoinOutcome::Gone
    } else {
        let location = multigame_location(lobby);
        info!(lobby = lobby.0, location = location.as_str(), "joined lobby");
        renderer.navigate(&location);
        JoinOutcome::Joined { location }
    };
    Ok(outcome)
}
