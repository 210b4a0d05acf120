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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::mastery::MASTERY_THRESHOLD;
use crate::mastery::Mastery;
use crate::mastery::update_mastery;
use crate::scheduler::Schedule;
use crate::scheduler::reschedule;
use crate::types::rating::Rating;
use crate::types::timestamp::Timestamp;

/// Opaque stable identifier assigned by the vocabulary service.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an item sits in its learning lifecycle. Derived from the scoring
/// fields, informational only; scheduling never reads it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStatus {
    New,
    Learning,
    Reviewing,
    Mastered,
}

/// The context string recorded for entries produced by the review pipeline.
pub const REVIEW_CONTEXT: &str = "review";

/// One entry in an item's review history. The history is append-only: never
/// truncated, never reordered.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub date: Timestamp,
    pub performance: Rating,
    pub context: String,
}

/// A vocabulary item as held by the vocabulary service. The content fields
/// (word, definition, context, examples, tags) are opaque to scheduling.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    pub id: ItemId,
    pub word: String,
    pub definition: String,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub mastery: Mastery,
    #[serde(default)]
    pub last_reviewed: Option<Timestamp>,
    pub next_review: Timestamp,
    pub easiness_factor: f64,
    pub repetitions: u32,
    #[serde(rename = "interval")]
    pub interval_days: u32,
    #[serde(default)]
    pub review_history: Vec<ReviewRecord>,
    pub learning_status: LearningStatus,
}

impl VocabularyItem {
    /// The scheduling parameters of this item.
    pub fn schedule(&self) -> Schedule {
        Schedule {
            easiness_factor: self.easiness_factor,
            repetitions: self.repetitions,
            interval_days: self.interval_days,
        }
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_review <= now
    }
}

/// Derives the informational learning status from the scoring fields.
pub fn derive_status(mastery: Mastery, repetitions: u32, review_count: usize) -> LearningStatus {
    if review_count == 0 {
        LearningStatus::New
    } else if mastery >= MASTERY_THRESHOLD {
        LearningStatus::Mastered
    } else if repetitions >= 2 {
        LearningStatus::Reviewing
    } else {
        LearningStatus::Learning
    }
}

/// Applies a rating to an item: updates mastery and scheduling, stamps the
/// review time, and appends a history entry.
pub fn rate_item(item: &VocabularyItem, rating: Rating, now: Timestamp) -> VocabularyItem {
    let mastery = update_mastery(rating, item.mastery);
    let (next_review, schedule) = reschedule(rating, now, item.schedule());
    let mut review_history = item.review_history.clone();
    review_history.push(ReviewRecord {
        date: now,
        performance: rating,
        context: REVIEW_CONTEXT.to_string(),
    });
    let learning_status = derive_status(mastery, schedule.repetitions, review_history.len());
    VocabularyItem {
        mastery,
        last_reviewed: Some(now),
        next_review,
        easiness_factor: schedule.easiness_factor,
        repetitions: schedule.repetitions,
        interval_days: schedule.interval_days,
        review_history,
        learning_status,
        ..item.clone()
    }
}
