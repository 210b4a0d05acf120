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

use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use tokio::sync::Mutex;
use tokio::sync::oneshot::Sender;

use wordloop_core::ReviewSession;
use wordloop_core::VocabularyItem;

use crate::cache::BankCache;
use crate::client_store::ClientStore;
use crate::store::VocabStore;

#[derive(Clone)]
pub struct ServerState {
    pub mutable: Arc<Mutex<MutableState>>,
    pub shutdown_tx: Arc<StdMutex<Option<Sender<()>>>>,
}

pub struct MutableState {
    pub store: VocabStore,
    pub client: ClientStore,
    pub cache: BankCache,
    /// The session queue: a fixed snapshot of the due list taken when the
    /// session started. The cache's live due list shrinks as ratings settle;
    /// this one does not.
    pub queue: Vec<VocabularyItem>,
    pub session: ReviewSession,
    /// The most recent submission failure, shown until the next action.
    pub notice: Option<String>,
    /// Set when the learner ends the session explicitly.
    pub ended: bool,
}
