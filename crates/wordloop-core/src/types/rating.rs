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

use crate::error::ErrorReport;
use crate::error::fail;

/// How well the learner recalled an item, worst to best. The derived `Ord`
/// follows declaration order, so comparisons between ratings are meaningful.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Forgot,
    Difficult,
    Hesitant,
    Easy,
    Perfect,
}

/// Quality at or above which a review counts as a pass.
const PASS_QUALITY: u32 = 3;

impl Rating {
    /// All ratings, worst to best.
    pub const ALL: [Rating; 5] = [
        Rating::Forgot,
        Rating::Difficult,
        Rating::Hesitant,
        Rating::Easy,
        Rating::Perfect,
    ];

    /// The quality value used by the scheduling formula, in [1,5].
    pub fn quality(self) -> u32 {
        match self {
            Rating::Forgot => 1,
            Rating::Difficult => 2,
            Rating::Hesitant => 3,
            Rating::Easy => 4,
            Rating::Perfect => 5,
        }
    }

    /// Whether this rating counts as a successful recall.
    pub fn is_pass(self) -> bool {
        self.quality() >= PASS_QUALITY
    }

    pub fn as_str(&self) -> &str {
        match self {
            Rating::Forgot => "forgot",
            Rating::Difficult => "difficult",
            Rating::Hesitant => "hesitant",
            Rating::Easy => "easy",
            Rating::Perfect => "perfect",
        }
    }

    /// Capitalized label for display.
    pub fn label(&self) -> &str {
        match self {
            Rating::Forgot => "Forgot",
            Rating::Difficult => "Difficult",
            Rating::Hesitant => "Hesitant",
            Rating::Easy => "Easy",
            Rating::Perfect => "Perfect",
        }
    }
}

impl TryFrom<String> for Rating {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "forgot" => Ok(Rating::Forgot),
            "difficult" => Ok(Rating::Difficult),
            "hesitant" => Ok(Rating::Hesitant),
            "easy" => Ok(Rating::Easy),
            "perfect" => Ok(Rating::Perfect),
            _ => fail(format!("invalid rating string: {value}")),
        }
    }
}
