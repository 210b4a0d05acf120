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

use crate::types::item::VocabularyItem;
use crate::types::timestamp::Timestamp;

/// The items due for review at `now`, oldest due date first. Ties are broken
/// by id so that the ordering is deterministic for a given snapshot.
pub fn select_due(items: &[VocabularyItem], now: Timestamp) -> Vec<VocabularyItem> {
    let mut due: Vec<VocabularyItem> = items
        .iter()
        .filter(|item| item.is_due(now))
        .cloned()
        .collect();
    due.sort_by(|a, b| {
        a.next_review
            .cmp(&b.next_review)
            .then_with(|| a.id.cmp(&b.id))
    });
    due
}
