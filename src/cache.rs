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

use wordloop_core::BankStats;
use wordloop_core::ItemId;
use wordloop_core::Timestamp;
use wordloop_core::VocabularyItem;
use wordloop_core::compute_stats;
use wordloop_core::select_due;

/// The locally cached copy of the vocabulary bank: items, aggregate stats,
/// and the ids currently due. Mutations go through `apply`; `snapshot` and
/// `restore` make rollback a plain assignment.
#[derive(Clone, PartialEq, Debug)]
pub struct BankCache {
    items: Vec<VocabularyItem>,
    stats: BankStats,
    due: Vec<ItemId>,
}

impl BankCache {
    pub fn new(items: Vec<VocabularyItem>, now: Timestamp) -> Self {
        let stats = compute_stats(&items, now);
        let due = select_due(&items, now)
            .into_iter()
            .map(|item| item.id)
            .collect();
        BankCache { items, stats, due }
    }

    pub fn item(&self, id: &ItemId) -> Option<&VocabularyItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn stats(&self) -> BankStats {
        self.stats
    }

    /// The ids currently held as due, in due order.
    pub fn due_ids(&self) -> &[ItemId] {
        &self.due
    }

    /// An immutable copy for later rollback.
    pub fn snapshot(&self) -> BankCache {
        self.clone()
    }

    pub fn restore(&mut self, snapshot: BankCache) {
        *self = snapshot;
    }

    /// Replaces an item with its updated state, drops it from the due list,
    /// and recomputes the aggregate stats from scratch.
    pub fn apply(&mut self, updated: VocabularyItem, now: Timestamp) {
        self.due.retain(|id| id != &updated.id);
        match self.items.iter_mut().find(|item| item.id == updated.id) {
            Some(slot) => *slot = updated,
            None => self.items.push(updated),
        }
        self.stats = compute_stats(&self.items, now);
    }
}
