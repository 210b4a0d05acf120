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

//! wordloop-core: Core library for the wordloop vocabulary review system.
//!
//! This library provides the pure review engine:
//! - Performance ratings and mastery scoring
//! - SM-2 interval scheduling
//! - Due-item selection
//! - The review session state machine
//! - Aggregate bank statistics

pub mod error;
pub mod mastery;
pub mod queue;
pub mod scheduler;
pub mod session;
pub mod stats;
pub mod types;

// Re-exports for convenience
pub use error::{ErrorReport, Fallible, fail};
pub use mastery::{MASTERY_THRESHOLD, Mastery, update_mastery};
pub use queue::select_due;
pub use scheduler::{DEFAULT_EASINESS, Schedule, next_schedule, reschedule};
pub use session::{ReviewSession, SessionId, SessionPhase};
pub use stats::{BankStats, compute_stats};
pub use types::item::{
    ItemId, LearningStatus, REVIEW_CONTEXT, ReviewRecord, VocabularyItem, derive_status, rate_item,
};
pub use types::rating::Rating;
pub use types::timestamp::Timestamp;
