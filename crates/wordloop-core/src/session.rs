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

//! The review session aggregate.
//!
//! A session is one bounded walk through a fixed queue of due items. The
//! aggregate tracks the position and the summary tallies; it is mutated only
//! through the transition methods below, and it is what gets persisted to
//! the durable client store between page loads.

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::mastery::MASTERY_THRESHOLD;
use crate::mastery::Mastery;
use crate::types::item::ItemId;
use crate::types::rating::Rating;
use crate::types::timestamp::Timestamp;

/// Opaque session token, regenerated on every new or reset session. Lets a
/// persisted session be told apart from one minted by a later reset.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Mints a token from the session start time and a caller-supplied
    /// nonce. Distinct nonces yield distinct tokens.
    pub fn mint(started_at: Timestamp, nonce: u64) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(started_at.to_string().as_bytes());
        hasher.update(&nonce.to_le_bytes());
        SessionId(hasher.finalize().to_hex().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the session presents for a given queue length.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionPhase {
    /// The current item is shown with its answer hidden.
    ItemShown,
    /// The current item is shown with its answer revealed.
    AnswerRevealed,
    /// The queue is exhausted; only a reset leaves this phase.
    Complete,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSession {
    pub session_id: SessionId,
    /// Position in the session queue. Always equals the number of reviewed
    /// items.
    pub current_index: usize,
    /// Ids rated this session, in rating order.
    pub reviewed_item_ids: Vec<ItemId>,
    /// Items rated better than Forgot this session.
    pub improved_count: u32,
    /// Items newly pushed over the mastery threshold this session.
    pub mastered_count: u32,
    /// Display state only; a reloaded session always starts hidden.
    #[serde(skip)]
    revealed: bool,
}

impl ReviewSession {
    /// A fresh session at the start of the queue.
    pub fn start(session_id: SessionId) -> Self {
        ReviewSession {
            session_id,
            current_index: 0,
            reviewed_item_ids: Vec::new(),
            improved_count: 0,
            mastered_count: 0,
            revealed: false,
        }
    }

    pub fn phase(&self, queue_len: usize) -> SessionPhase {
        if self.current_index >= queue_len {
            SessionPhase::Complete
        } else if self.revealed {
            SessionPhase::AnswerRevealed
        } else {
            SessionPhase::ItemShown
        }
    }

    pub fn is_complete(&self, queue_len: usize) -> bool {
        self.current_index >= queue_len
    }

    /// Reveals the current item's answer. Display-only: no counter or
    /// position changes. Idempotent.
    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Records a settled rating and advances to the next item. The tallies
    /// are computed from the rating and the item's state *before* the
    /// rating was applied.
    pub fn record(&mut self, item_id: ItemId, rating: Rating, prior_mastery: Mastery) {
        if rating > Rating::Forgot {
            self.improved_count += 1;
        }
        if rating >= Rating::Easy && prior_mastery < MASTERY_THRESHOLD {
            self.mastered_count += 1;
        }
        self.reviewed_item_ids.push(item_id);
        self.current_index += 1;
        self.revealed = false;
    }

    /// Checks the aggregate invariant. Persisted sessions are validated on
    /// load; a blob that fails here is discarded rather than resumed.
    pub fn validate(&self) -> Fallible<()> {
        if self.current_index != self.reviewed_item_ids.len() {
            return fail(format!(
                "corrupt session: index {} does not match {} reviewed items",
                self.current_index,
                self.reviewed_item_ids.len()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::try_from(s.to_string()).unwrap()
    }

    fn fresh() -> ReviewSession {
        ReviewSession::start(SessionId::mint(ts("2024-03-01T12:00:00.000"), 0))
    }

    #[test]
    fn test_mint_distinct_ids() {
        let t = ts("2024-03-01T12:00:00.000");
        assert_ne!(SessionId::mint(t, 1), SessionId::mint(t, 2));
        assert_ne!(
            SessionId::mint(t, 1),
            SessionId::mint(ts("2024-03-01T12:00:00.001"), 1)
        );
        // Same inputs, same token.
        assert_eq!(SessionId::mint(t, 7), SessionId::mint(t, 7));
    }

    /// Walk a two-item queue from start to completion.
    #[test]
    fn test_full_walk() {
        let queue_len = 2;
        let mut session = fresh();
        assert_eq!(session.phase(queue_len), SessionPhase::ItemShown);

        session.reveal();
        assert_eq!(session.phase(queue_len), SessionPhase::AnswerRevealed);

        session.record(ItemId::new("a"), Rating::Easy, 50);
        assert_eq!(session.phase(queue_len), SessionPhase::ItemShown);
        assert!(!session.is_revealed());

        session.reveal();
        session.record(ItemId::new("b"), Rating::Forgot, 50);
        assert_eq!(session.phase(queue_len), SessionPhase::Complete);
        assert!(session.is_complete(queue_len));

        assert_eq!(session.current_index, 2);
        assert_eq!(
            session.reviewed_item_ids,
            vec![ItemId::new("a"), ItemId::new("b")]
        );
    }

    /// The invariant holds after every transition.
    #[test]
    fn test_invariant_holds_throughout() {
        let mut session = fresh();
        session.validate().unwrap();
        for i in 0..5 {
            session.reveal();
            session.record(ItemId::new(format!("item-{i}")), Rating::Hesitant, 10);
            session.validate().unwrap();
            assert_eq!(session.current_index, session.reviewed_item_ids.len());
        }
    }

    #[test]
    fn test_validate_rejects_corrupt_session() {
        let mut session = fresh();
        session.current_index = 3;
        assert!(session.validate().is_err());
    }

    #[test]
    fn test_reveal_is_display_only_and_idempotent() {
        let mut session = fresh();
        session.reveal();
        session.reveal();
        assert_eq!(session.current_index, 0);
        assert_eq!(session.improved_count, 0);
        assert_eq!(session.mastered_count, 0);
        assert!(session.reviewed_item_ids.is_empty());
    }

    #[test]
    fn test_forgot_does_not_count_as_improved() {
        let mut session = fresh();
        session.record(ItemId::new("a"), Rating::Forgot, 85);
        assert_eq!(session.improved_count, 0);
        assert_eq!(session.mastered_count, 0);
    }

    #[test]
    fn test_difficult_counts_as_improved() {
        let mut session = fresh();
        session.record(ItemId::new("a"), Rating::Difficult, 85);
        assert_eq!(session.improved_count, 1);
        assert_eq!(session.mastered_count, 0);
    }

    /// An easy rating on an item below the threshold is a newly mastered
    /// item.
    #[test]
    fn test_newly_mastered_is_counted() {
        let mut session = fresh();
        session.record(ItemId::new("a"), Rating::Easy, 85);
        assert_eq!(session.mastered_count, 1);
        assert_eq!(session.improved_count, 1);
    }

    /// An already-mastered item re-reviewed does not count again.
    #[test]
    fn test_already_mastered_is_not_recounted() {
        let mut session = fresh();
        session.record(ItemId::new("a"), Rating::Perfect, 95);
        assert_eq!(session.mastered_count, 0);
        assert_eq!(session.improved_count, 1);
    }

    /// Completion is reached exactly once, at the end of the queue.
    #[test]
    fn test_complete_entered_exactly_once() {
        let queue_len = 3;
        let mut session = fresh();
        let mut completions = 0;
        for i in 0..queue_len {
            assert!(!session.is_complete(queue_len));
            session.record(ItemId::new(format!("item-{i}")), Rating::Easy, 0);
            if session.is_complete(queue_len) {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
    }

    /// A reset mints a new id and zeroes the counters.
    #[test]
    fn test_reset_starts_clean() {
        let mut session = fresh();
        session.reveal();
        session.record(ItemId::new("a"), Rating::Easy, 50);
        let old_id = session.session_id.clone();

        let reset = ReviewSession::start(SessionId::mint(ts("2024-03-02T08:00:00.000"), 1));
        assert_ne!(reset.session_id, old_id);
        assert_eq!(reset.current_index, 0);
        assert_eq!(reset.improved_count, 0);
        assert_eq!(reset.mastered_count, 0);
        assert!(reset.reviewed_item_ids.is_empty());
        assert!(!reset.is_revealed());
    }

    /// The reveal flag is not persisted; a roundtripped session starts
    /// hidden.
    #[test]
    fn test_reveal_flag_not_persisted() {
        let mut session = fresh();
        session.reveal();
        let json = serde_json::to_string(&session).unwrap();
        let back: ReviewSession = serde_json::from_str(&json).unwrap();
        assert!(!back.is_revealed());
        assert_eq!(back.session_id, session.session_id);
    }

    /// A persisted session whose index is at or past the queue end is
    /// complete, not resumable into an invalid position.
    #[test]
    fn test_stale_session_reads_as_complete() {
        let mut session = fresh();
        for i in 0..4 {
            session.record(ItemId::new(format!("item-{i}")), Rating::Easy, 0);
        }
        // The freshly-pulled queue is shorter than the recorded progress.
        assert!(session.is_complete(3));
        assert_eq!(session.phase(3), SessionPhase::Complete);
    }
}
