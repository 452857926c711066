use shared::{domain::LobbyId, protocol::JoinGameResponse};

use super::{Call, FakeTransport, RecordingRenderer};
use crate::lobby::{join_lobby, JoinOutcome, GONE_LOBBY_ALERT, OWN_LOBBY_ALERT};

fn transport_answering(response: JoinGameResponse) -> FakeTransport {
    FakeTransport {
        join_response: response,
        ..FakeTransport::default()
    }
}

#[tokio::test]
async fn accepted_join_navigates_to_game_page() {
    let transport = FakeTransport::default();
    let mut renderer = RecordingRenderer::default();

    let outcome = join_lobby(&transport, &mut renderer, LobbyId(12))
        .await
        .expect("join");

    assert_eq!(
        outcome,
        JoinOutcome::Joined {
            location: "/multigame?game=12".to_string()
        }
    );
    assert_eq!(renderer.log().navigations, vec!["/multigame?game=12"]);
    assert!(renderer.log().alerts.is_empty());
    assert_eq!(
        transport.calls(),
        vec![Call::Join(shared::protocol::JoinGameRequest {
            lobby: LobbyId(12)
        })]
    );
}

#[tokio::test]
async fn own_lobby_is_reported_with_an_alert() {
    let transport = transport_answering(JoinGameResponse {
        owngame: true,
        gone: false,
    });
    let mut renderer = RecordingRenderer::default();

    let outcome = join_lobby(&transport, &mut renderer, LobbyId(3))
        .await
        .expect("join");

    assert_eq!(outcome, JoinOutcome::OwnLobby);
    assert_eq!(renderer.log().alerts, vec![OWN_LOBBY_ALERT]);
    assert!(renderer.log().navigations.is_empty());
    assert!(renderer.log().texts.is_empty(), "status line stays untouched");
}

#[tokio::test]
async fn stale_lobby_is_reported_with_an_alert() {
    let transport = transport_answering(JoinGameResponse {
        owngame: false,
        gone: true,
    });
    let mut renderer = RecordingRenderer::default();

    let outcome = join_lobby(&transport, &mut renderer, LobbyId(3))
        .await
        .expect("join");

    assert_eq!(outcome, JoinOutcome::Gone);
    assert_eq!(renderer.log().alerts, vec![GONE_LOBBY_ALERT]);
}

#[tokio::test]
async fn transport_failure_is_an_error() {
    let transport = FakeTransport {
        fail_with: Some("connection refused".to_string()),
        ..FakeTransport::default()
    };
    let mut renderer = RecordingRenderer::default();

    let err = join_lobby(&transport, &mut renderer, LobbyId(9))
        .await
        .expect_err("must fail");

    assert!(format!("{err:#}").contains("failed to join lobby 9"));
    assert!(renderer.log().alerts.is_empty());
}
