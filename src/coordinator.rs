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

//! Optimistic review submission.
//!
//! A rating is applied to the cached bank before the service confirms it, so
//! the UI never waits on the network to show progress. The transaction shape
//! is: snapshot, tentative apply, remote call, commit-or-revert. On success
//! the cached item is replaced with the service's authoritative copy, so the
//! optimistic history entry is never duplicated. On failure the snapshot is
//! restored verbatim and the error is returned for the caller to surface.

use wordloop_core::ItemId;
use wordloop_core::Mastery;
use wordloop_core::REVIEW_CONTEXT;
use wordloop_core::Rating;
use wordloop_core::ReviewRecord;
use wordloop_core::Timestamp;
use wordloop_core::VocabularyItem;
use wordloop_core::rate_item;

use crate::cache::BankCache;
use crate::error::StoreError;
use crate::store::ReviewPatch;
use crate::store::VocabStore;

/// Outcome of a settled submission. Carries the item's prior mastery so the
/// session tallies can be computed without re-reading the cache.
pub struct SubmitReceipt {
    pub prior_mastery: Mastery,
    pub item: VocabularyItem,
}

pub async fn submit_review(
    cache: &mut BankCache,
    store: &VocabStore,
    item_id: &ItemId,
    rating: Rating,
    now: Timestamp,
) -> Result<SubmitReceipt, StoreError> {
    let prior = cache
        .item(item_id)
        .cloned()
        .ok_or_else(|| StoreError::Malformed(format!("unknown item id: {item_id}")))?;
    let snapshot = cache.snapshot();

    let optimistic = rate_item(&prior, rating, now);
    let patch = ReviewPatch {
        performance: rating,
        reviewed_at: now,
        history_entry: ReviewRecord {
            date: now,
            performance: rating,
            context: REVIEW_CONTEXT.to_string(),
        },
    };
    cache.apply(optimistic, now);

    match store.apply_review(item_id, &patch).await {
        Ok(authoritative) => {
            cache.apply(authoritative.clone(), now);
            Ok(SubmitReceipt {
                prior_mastery: prior.mastery,
                item: authoritative,
            })
        }
        Err(e) => {
            log::warn!("review submission for {item_id} failed, rolling back: {e}");
            cache.restore(snapshot);
            Err(e)
        }
    }
}
