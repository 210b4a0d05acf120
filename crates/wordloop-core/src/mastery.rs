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

use crate::types::rating::Rating;

/// A retention score in [0,100].
pub type Mastery = u8;

/// Mastery at or above which an item counts as mastered.
pub const MASTERY_THRESHOLD: Mastery = 90;

/// Signed mastery deltas indexed by rating, worst to best.
const MASTERY_DELTA: [i16; 5] = [-15, -8, 4, 10, 15];

/// The new mastery score after a review. Clamped to [0,100].
pub fn update_mastery(rating: Rating, prior: Mastery) -> Mastery {
    let delta = MASTERY_DELTA[rating as usize];
    (prior as i16 + delta).clamp(0, 100) as Mastery
}
