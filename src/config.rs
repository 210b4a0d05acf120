// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::env;
use std::fs::read_to_string;
use std::path::PathBuf;

use serde::Deserialize;

use wordloop_core::ErrorReport;
use wordloop_core::Fallible;
use wordloop_core::fail;

pub const DEFAULT_CONFIG_PATH: &str = "wordloop.toml";

/// Environment variable that overrides the configured auth token.
pub const TOKEN_ENV_VAR: &str = "WORDLOOP_TOKEN";

const DEFAULT_SESSION_DB: &str = "wordloop-session.db";

/// Client configuration, loaded from a TOML file.
#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    /// Base URL of the vocabulary service.
    pub server_url: String,
    /// Bearer token for the vocabulary service.
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Path of the durable client store. Relative paths resolve against the
    /// working directory.
    #[serde(default)]
    pub session_db: Option<PathBuf>,
}

impl AppConfig {
    pub fn load(path: &str) -> Fallible<Self> {
        let text = read_to_string(path)
            .map_err(|e| ErrorReport::new(format!("failed to read config file '{path}': {e}")))?;
        let config: AppConfig = toml::from_str(&text)
            .map_err(|e| ErrorReport::new(format!("failed to parse config file '{path}': {e}")))?;
        Ok(config)
    }

    /// The auth token, with the environment variable taking precedence over
    /// the config file. Being unauthenticated is fatal for every command.
    pub fn token(&self) -> Fallible<String> {
        resolve_token(env::var(TOKEN_ENV_VAR).ok(), self.auth_token.as_deref())
    }

    pub fn session_db_path(&self) -> PathBuf {
        self.session_db
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_DB))
    }
}

fn resolve_token(env_token: Option<String>, config_token: Option<&str>) -> Fallible<String> {
    if let Some(token) = env_token {
        if !token.is_empty() {
            return Ok(token);
        }
    }
    match config_token {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => fail(format!(
            "not authenticated: set auth_token in the config file or {TOKEN_ENV_VAR}"
        )),
    }
}
