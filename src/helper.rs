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

//! Test helpers: sample items and an in-process mock of the vocabulary
//! service, driven over real HTTP so the store client is exercised
//! end-to-end.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use axum::Router;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::response::IntoResponse;
use axum::response::Json;
use axum::response::Response;
use axum::routing::get;
use axum::routing::patch;
use portpicker::pick_unused_port;
use tokio::net::TcpListener;
use tokio::spawn;

use wordloop_core::DEFAULT_EASINESS;
use wordloop_core::Fallible;
use wordloop_core::ItemId;
use wordloop_core::LearningStatus;
use wordloop_core::Mastery;
use wordloop_core::Timestamp;
use wordloop_core::VocabularyItem;
use wordloop_core::compute_stats;
use wordloop_core::fail;
use wordloop_core::rate_item;
use wordloop_core::select_due;

use crate::store::BankResponse;
use crate::store::ReviewPatch;
use crate::utils::wait_for_server;

/// A vocabulary item with plausible content and default scheduling.
pub fn sample_item(id: &str, mastery: Mastery, next_review: Timestamp) -> VocabularyItem {
    VocabularyItem {
        id: ItemId::new(id),
        word: format!("word-{id}"),
        definition: format!("definition of word-{id}"),
        context: Some(format!("a sentence using word-{id}")),
        examples: vec![format!("example for word-{id}")],
        tags: vec!["sample".to_string()],
        mastery,
        last_reviewed: None,
        next_review,
        easiness_factor: DEFAULT_EASINESS,
        repetitions: 0,
        interval_days: 0,
        review_history: vec![],
        learning_status: LearningStatus::New,
    }
}

/// How the mock answers the next review PATCH.
#[derive(Clone, Copy, PartialEq)]
pub enum MockMode {
    Normal,
    /// Answer the next PATCH with a 500, then return to normal.
    FailNext,
    /// Answer the next PATCH with garbage, then return to normal.
    MalformedNext,
}

struct MockInner {
    items: Vec<VocabularyItem>,
    token: String,
    mode: MockMode,
}

#[derive(Clone)]
struct MockState {
    inner: Arc<Mutex<MockInner>>,
}

/// Handle to a running mock service.
pub struct MockService {
    port: u16,
    state: MockState,
}

impl MockService {
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn set_mode(&self, mode: MockMode) {
        self.state.inner.lock().unwrap().mode = mode;
    }

    /// The service's current copy of an item.
    pub fn item(&self, id: &str) -> Option<VocabularyItem> {
        let inner = self.state.inner.lock().unwrap();
        let id = ItemId::new(id);
        inner.items.iter().find(|item| item.id == id).cloned()
    }
}

/// Spawns the mock service on an unused port and waits for it to come up.
pub async fn spawn_mock_service(
    items: Vec<VocabularyItem>,
    token: &str,
) -> Fallible<MockService> {
    let port = match pick_unused_port() {
        Some(port) => port,
        None => return fail("no free port for the mock service"),
    };
    let state = MockState {
        inner: Arc::new(Mutex::new(MockInner {
            items,
            token: token.to_string(),
            mode: MockMode::Normal,
        })),
    };
    let app = Router::new()
        .route("/api/vocabulary", get(bank_handler))
        .route("/api/vocabulary/due", get(due_handler))
        .route("/api/vocabulary/{id}/review", patch(review_handler))
        .with_state(state.clone());
    let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await?;
    spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    wait_for_server("127.0.0.1", port).await?;
    Ok(MockService { port, state })
}

fn authorized(headers: &HeaderMap, token: &str) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value == format!("Bearer {token}"))
        .unwrap_or(false)
}

async fn bank_handler(State(state): State<MockState>, headers: HeaderMap) -> Response {
    let inner = state.inner.lock().unwrap();
    if !authorized(&headers, &inner.token) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let now = Timestamp::now();
    let response = BankResponse {
        items: inner.items.clone(),
        stats: compute_stats(&inner.items, now),
    };
    Json(response).into_response()
}

async fn due_handler(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let inner = state.inner.lock().unwrap();
    if !authorized(&headers, &inner.token) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let now = match params.get("now").cloned().map(Timestamp::try_from) {
        Some(Ok(now)) => now,
        _ => return StatusCode::BAD_REQUEST.into_response(),
    };
    Json(select_due(&inner.items, now)).into_response()
}

async fn review_handler(
    State(state): State<MockState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(patch): Json<ReviewPatch>,
) -> Response {
    let mut inner = state.inner.lock().unwrap();
    if !authorized(&headers, &inner.token) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match inner.mode {
        MockMode::FailNext => {
            inner.mode = MockMode::Normal;
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
        MockMode::MalformedNext => {
            inner.mode = MockMode::Normal;
            return (StatusCode::OK, "this is not json").into_response();
        }
        MockMode::Normal => {}
    }
    let id = ItemId::new(id);
    let Some(slot) = inner.items.iter_mut().find(|item| item.id == id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let updated = rate_item(slot, patch.performance, patch.reviewed_at);
    *slot = updated.clone();
    Json(updated).into_response()
}
