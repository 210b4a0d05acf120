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

use serde::Deserialize;
use serde::Serialize;

use crate::mastery::MASTERY_THRESHOLD;
use crate::types::item::VocabularyItem;
use crate::types::timestamp::Timestamp;

/// Aggregate statistics over a vocabulary bank.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankStats {
    pub total_words: usize,
    pub mastered_words: usize,
    pub learning_words: usize,
    pub needs_review_words: usize,
    /// Mean mastery across the bank, rounded. Zero for an empty bank.
    pub average_mastery: u32,
}

/// Recomputes the aggregate statistics from scratch. Deterministic for a
/// given snapshot and `now`.
pub fn compute_stats(items: &[VocabularyItem], now: Timestamp) -> BankStats {
    let total_words = items.len();
    let mastered_words = items
        .iter()
        .filter(|item| item.mastery >= MASTERY_THRESHOLD)
        .count();
    let needs_review_words = items.iter().filter(|item| item.is_due(now)).count();
    let average_mastery = if total_words == 0 {
        0
    } else {
        let sum: u32 = items.iter().map(|item| item.mastery as u32).sum();
        (sum as f64 / total_words as f64).round() as u32
    };
    BankStats {
        total_words,
        mastered_words,
        learning_words: total_words - mastered_words,
        needs_review_words,
        average_mastery,
    }
}
