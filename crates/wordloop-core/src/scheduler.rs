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

//! SM-2 interval scheduling.
//!
//! Every item carries an easiness factor, a count of consecutive successful
//! recalls, and the current interval in days. A failed recall resets the
//! repetition streak and schedules the item for tomorrow; a successful one
//! grows the interval multiplicatively by the easiness factor.

use serde::Deserialize;
use serde::Serialize;

use crate::types::rating::Rating;
use crate::types::timestamp::Timestamp;

pub type Easiness = f64;

/// Easiness factor assigned to newly created items.
pub const DEFAULT_EASINESS: Easiness = 2.5;

/// The easiness factor never drops below this.
pub const MIN_EASINESS: Easiness = 1.3;

/// The minimum review interval in days.
pub const MIN_INTERVAL_DAYS: u32 = 1;

/// The maximum review interval in days.
pub const MAX_INTERVAL_DAYS: u32 = 365;

/// Fixed interval after the first successful recall.
const FIRST_INTERVAL_DAYS: u32 = 1;

/// Fixed interval after the second consecutive successful recall.
const SECOND_INTERVAL_DAYS: u32 = 6;

/// The scheduling parameters carried by every vocabulary item.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Schedule {
    pub easiness_factor: Easiness,
    pub repetitions: u32,
    pub interval_days: u32,
}

impl Default for Schedule {
    fn default() -> Self {
        Schedule {
            easiness_factor: DEFAULT_EASINESS,
            repetitions: 0,
            interval_days: 0,
        }
    }
}

fn easiness_delta(q: f64) -> f64 {
    0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02)
}

fn next_easiness(prior: Easiness, rating: Rating) -> Easiness {
    f64::max(MIN_EASINESS, prior + easiness_delta(rating.quality() as f64))
}

/// The new scheduling parameters after a review.
pub fn next_schedule(rating: Rating, prior: Schedule) -> Schedule {
    let easiness_factor = next_easiness(prior.easiness_factor, rating);
    if rating.is_pass() {
        let repetitions = prior.repetitions + 1;
        let interval_days = match repetitions {
            1 => FIRST_INTERVAL_DAYS,
            2 => SECOND_INTERVAL_DAYS,
            _ => ((prior.interval_days as f64 * easiness_factor).ceil() as u32)
                .clamp(MIN_INTERVAL_DAYS, MAX_INTERVAL_DAYS),
        };
        Schedule {
            easiness_factor,
            repetitions,
            interval_days,
        }
    } else {
        Schedule {
            easiness_factor,
            repetitions: 0,
            interval_days: MIN_INTERVAL_DAYS,
        }
    }
}

/// Reschedules an item: the new parameters and the next due timestamp.
pub fn reschedule(
    rating: Rating,
    last_reviewed: Timestamp,
    prior: Schedule,
) -> (Timestamp, Schedule) {
    let schedule = next_schedule(rating, prior);
    (last_reviewed.add_days(schedule.interval_days), schedule)
}
