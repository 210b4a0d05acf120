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

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::select;
use tokio::signal;
use tokio::sync::Mutex;
use tokio::sync::oneshot::Receiver;
use tokio::sync::oneshot::channel;

use wordloop_core::Fallible;
use wordloop_core::ReviewSession;
use wordloop_core::SessionId;
use wordloop_core::Timestamp;
use wordloop_core::VocabularyItem;
use wordloop_core::fail;

use crate::cache::BankCache;
use crate::client_store::ClientStore;
use crate::cmd::review::get::get_handler;
use crate::cmd::review::post::post_handler;
use crate::cmd::review::state::MutableState;
use crate::cmd::review::state::ServerState;
use crate::store::VocabStore;
use crate::utils::CACHE_CONTROL_IMMUTABLE;

pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub server_url: String,
    pub token: String,
    pub session_db: PathBuf,
    pub session_started_at: Timestamp,
    pub item_limit: Option<usize>,
}

/// Mints a session with a fresh token.
pub fn new_session(now: Timestamp) -> ReviewSession {
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    ReviewSession::start(SessionId::mint(now, nonce))
}

/// The session queue: the cache's due items, oldest first, optionally
/// truncated.
pub fn session_queue(cache: &BankCache, item_limit: Option<usize>) -> Vec<VocabularyItem> {
    let mut queue: Vec<VocabularyItem> = cache
        .due_ids()
        .iter()
        .filter_map(|id| cache.item(id).cloned())
        .collect();
    if let Some(limit) = item_limit {
        queue.truncate(limit);
    }
    queue
}

pub async fn start_server(config: ServerConfig) -> Fallible<()> {
    let now = config.session_started_at;
    let store = VocabStore::new(&config.server_url, &config.token);
    let bank = store.fetch_bank().await?;
    log::info!(
        "fetched {} items from {}",
        bank.items.len(),
        config.server_url
    );

    let cache = BankCache::new(bank.items, now);
    let queue = session_queue(&cache, config.item_limit);

    let client = ClientStore::open(&config.session_db)?;
    let session = match client.load_session()? {
        Some(session) => {
            // A resumed session whose index is at or past the fresh queue is
            // complete; the completion page offers a reset.
            log::info!("resuming session {}", session.session_id);
            session
        }
        None => {
            let session = new_session(now);
            client.save_session(&session)?;
            session
        }
    };

    if queue.is_empty() && session.current_index == 0 {
        println!("No items due for review.");
        return Ok(());
    }

    // Create shutdown channel
    let (shutdown_tx, shutdown_rx) = channel();

    let state = ServerState {
        mutable: Arc::new(Mutex::new(MutableState {
            store,
            client,
            cache,
            queue,
            session,
            notice: None,
            ended: false,
        })),
        shutdown_tx: Arc::new(StdMutex::new(Some(shutdown_tx))),
    };
    let app = Router::new();
    let app = app.route("/", get(get_handler));
    let app = app.route("/", post(post_handler));
    let app = app.route("/style.css", get(style_handler));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state.clone());
    let bind = format!("{}:{}", config.host, config.port);

    // Start the server with graceful shutdown on Ctrl+C or the End button.
    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_rx))
        .await?;

    // Check how the session stood when the server shut down.
    let mutable = state.mutable.lock().await;
    if mutable.ended || mutable.session.is_complete(mutable.queue.len()) {
        Ok(())
    } else {
        fail("Session interrupted before completion")
    }
}

async fn style_handler() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, CACHE_CONTROL_IMMUTABLE),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}

async fn shutdown_signal(shutdown_rx: Receiver<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let shutdown = async {
        shutdown_rx.await.ok();
    };

    select! {
        _ = ctrl_c => {
            log::debug!("Received Ctrl+C, shutting down gracefully");
        },
        _ = shutdown => {
            log::debug!("Received shutdown signal, shutting down gracefully");
        },
    }
}
