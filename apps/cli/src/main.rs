mod config;
mod input;
mod terminal;

use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    connect_push_channel, join_lobby, HttpTransport, JoinOutcome, SessionCommand,
    SessionController, SessionDriver,
};
use shared::{
    board::Board,
    domain::{GameId, LobbyId, PlayerId},
};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::{
    config::{load_settings, ClientSettings, DEFAULT_CONFIG_FILE},
    input::{forward_lines, HELP},
    terminal::TerminalRenderer,
};

const COMMAND_BUFFER: usize = 16;

#[derive(Parser, Debug)]
#[command(name = "reversi", about = "Terminal client for the reversi server")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    push_url: Option<String>,
    #[arg(long)]
    player_id: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a game the server created against its AI.
    Single {
        #[arg(long)]
        game_id: i64,
        /// Starting board as served by the game page; defaults to a fresh board.
        #[arg(long)]
        board: Option<String>,
        #[arg(long, default_value_t = 8)]
        size: usize,
    },
    /// Play a multiplayer game over the push channel.
    Multi {
        #[arg(long)]
        game_id: i64,
        #[arg(long)]
        token: String,
        /// Set when this player joined someone else's lobby.
        #[arg(long)]
        joined_lobby: Option<i64>,
    },
    /// Ask to join a waiting lobby.
    Join {
        #[arg(long)]
        lobby: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config);
    settings.override_with(args.server_url, args.push_url, args.player_id);

    let transport = Arc::new(
        HttpTransport::new(&settings.server_url)
            .with_context(|| format!("bad server url {}", settings.server_url))?,
    );

    match args.command {
        Command::Single {
            game_id,
            board,
            size,
        } => {
            let board = match board {
                Some(raw) => Board::from_json(&raw).context("invalid --board")?,
                None => Board::starting(size),
            };
            let player_id = player_id(&settings)?;
            let page_url = page_url(&settings, "single")?;
            let (mut controller, completions) =
                SessionController::new(transport, TerminalRenderer::stdout(), page_url);
            controller.initialize_singleplayer(GameId(game_id), player_id, &board);
            run_session(controller, completions, None).await;
        }
        Command::Multi {
            game_id,
            token,
            joined_lobby,
        } => {
            let player_id = player_id(&settings)?;
            let mut page_url = page_url(&settings, "multigame")?;
            if let Some(lobby) = joined_lobby {
                page_url
                    .query_pairs_mut()
                    .append_pair(client_core::controller::JOINED_GAME_PARAM, &lobby.to_string());
            }
            // Nothing may fail between initialize and the driver, which owns
            // the teardown resignation from then on.
            let push = connect_push_channel(&settings.push_base(), &token)
                .await
                .context("failed to open push channel")?;
            let (mut controller, completions) =
                SessionController::new(transport, TerminalRenderer::stdout(), page_url);
            controller.initialize(GameId(game_id), player_id);
            run_session(controller, completions, Some(push)).await;
        }
        Command::Join { lobby } => {
            let mut renderer = TerminalRenderer::stdout();
            let outcome = join_lobby(transport.as_ref(), &mut renderer, LobbyId(lobby)).await?;
            if let JoinOutcome::Joined { .. } = outcome {
                println!("start playing with: reversi multi --game-id <id> --token <token> --joined-lobby {lobby}");
            }
        }
    }

    Ok(())
}

fn player_id(settings: &ClientSettings) -> Result<PlayerId> {
    settings
        .player_id
        .clone()
        .map(PlayerId::new)
        .ok_or_else(|| anyhow!("missing player id; pass --player-id or set REVERSI_PLAYER_ID"))
}

fn page_url(settings: &ClientSettings, page: &str) -> Result<Url> {
    let mut base = Url::parse(&settings.server_url)
        .with_context(|| format!("bad server url {}", settings.server_url))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(page)?)
}

async fn run_session(
    controller: SessionController<TerminalRenderer>,
    completions: mpsc::UnboundedReceiver<client_core::Completion>,
    push: Option<mpsc::Receiver<client_core::PushEvent>>,
) {
    let (commands, commands_rx) = mpsc::channel(COMMAND_BUFFER);
    spawn_command_sources(commands);
    println!("{HELP}");

    let controller = SessionDriver::new(controller, completions, commands_rx, push)
        .run()
        .await;
    info!(finished = controller.is_finished(), "session ended");
}

/// Stdin is read on a plain thread: the process exits without waiting for
/// it, while a pending tokio stdin read would hold up runtime shutdown.
fn spawn_command_sources(commands: mpsc::Sender<SessionCommand>) {
    let stdin_commands = commands.clone();
    std::thread::spawn(move || forward_lines(std::io::stdin().lock(), &stdin_commands));
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = commands.send(SessionCommand::Shutdown).await;
        }
    });
}
