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

//! Client for the remote vocabulary service.
//!
//! The service is the single authority on vocabulary records: this client
//! reads the bank and requests per-item review mutations. It never invents
//! item state; reconciliation after a PATCH replaces the local copy with the
//! service's response wholesale.

use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;
use reqwest::Client;
use reqwest::Response;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;

use wordloop_core::BankStats;
use wordloop_core::ItemId;
use wordloop_core::Rating;
use wordloop_core::ReviewRecord;
use wordloop_core::Timestamp;
use wordloop_core::VocabularyItem;

use crate::error::StoreError;

/// Payload of a review mutation.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPatch {
    pub performance: Rating,
    pub reviewed_at: Timestamp,
    pub history_entry: ReviewRecord,
}

/// The full bank: every item plus the service's aggregate statistics.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BankResponse {
    pub items: Vec<VocabularyItem>,
    pub stats: BankStats,
}

#[derive(Clone)]
pub struct VocabStore {
    client: Client,
    base_url: String,
    token: String,
}

impl VocabStore {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        VocabStore {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Fetches the full vocabulary collection and its aggregate stats.
    pub async fn fetch_bank(&self) -> Result<BankResponse, StoreError> {
        let url = format!("{}/api/vocabulary", self.base_url);
        log::debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        decode(response).await
    }

    /// Fetches the subset of items due at `now`.
    pub async fn fetch_due(&self, now: Timestamp) -> Result<Vec<VocabularyItem>, StoreError> {
        let now_string = now.to_string();
        let encoded = utf8_percent_encode(&now_string, NON_ALPHANUMERIC);
        let url = format!("{}/api/vocabulary/due?now={}", self.base_url, encoded);
        log::debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        decode(response).await
    }

    /// Persists a rating and returns the authoritative updated item.
    pub async fn apply_review(
        &self,
        id: &ItemId,
        patch: &ReviewPatch,
    ) -> Result<VocabularyItem, StoreError> {
        let encoded = utf8_percent_encode(id.as_str(), NON_ALPHANUMERIC);
        let url = format!("{}/api/vocabulary/{}/review", self.base_url, encoded);
        log::debug!("PATCH {url}");
        let response = self
            .client
            .patch(&url)
            .bearer_auth(&self.token)
            .json(patch)
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let status = response.status();
    match status {
        s if s.is_success() => {
            let text = response.text().await?;
            serde_json::from_str(&text).map_err(|e| {
                log::error!("unexpected response shape from the vocabulary service: {e}");
                StoreError::Malformed(e.to_string())
            })
        }
        StatusCode::UNAUTHORIZED => Err(StoreError::Unauthorized("not authenticated".to_string())),
        StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => Err(StoreError::Unauthorized(
            "item does not belong to this account".to_string(),
        )),
        s => Err(StoreError::Transient(format!(
            "service responded with {s}"
        ))),
    }
}
