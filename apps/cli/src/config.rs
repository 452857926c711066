use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_CONFIG_FILE: &str = "reversi.toml";
const PUSH_PATH: &str = "/_push";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSettings {
    pub server_url: String,
    pub push_url: Option<String>,
    pub player_id: Option<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".into(),
            push_url: None,
            player_id: None,
        }
    }
}

impl ClientSettings {
    /// Explicit push url, or the server url with `http` swapped for `ws` by
    /// the push client and `/_push` appended.
    pub fn push_base(&self) -> String {
        match &self.push_url {
            Some(url) => url.clone(),
            None => format!("{}{PUSH_PATH}", self.server_url.trim_end_matches('/')),
        }
    }

    /// Command-line flags, applied last.
    pub fn override_with(
        &mut self,
        server_url: Option<String>,
        push_url: Option<String>,
        player_id: Option<String>,
    ) {
        if let Some(v) = server_url {
            self.server_url = v;
        }
        if let Some(v) = push_url {
            self.push_url = Some(v);
        }
        if let Some(v) = player_id {
            self.player_id = Some(v);
        }
    }
}

pub fn load_settings(path: &Path) -> ClientSettings {
    load_settings_with(path, |key| std::env::var(key).ok())
}

/// Defaults, then the TOML file, then environment variables.
pub fn load_settings_with(path: &Path, env: impl Fn(&str) -> Option<String>) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("server_url") {
                    settings.server_url = v.clone();
                }
                if let Some(v) = file_cfg.get("push_url") {
                    settings.push_url = Some(v.clone());
                }
                if let Some(v) = file_cfg.get("player_id") {
                    settings.player_id = Some(v.clone());
                }
            }
            Err(err) => warn!(path = %path.display(), error = %err, "ignoring unreadable config file"),
        }
    }

    if let Some(v) = env("REVERSI_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("REVERSI_PUSH_URL") {
        settings.push_url = Some(v);
    }
    if let Some(v) = env("APP__PUSH_URL") {
        settings.push_url = Some(v);
    }

    if let Some(v) = env("REVERSI_PLAYER_ID") {
        settings.player_id = Some(v);
    }

    settings
}
