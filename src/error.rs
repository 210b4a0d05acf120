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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use wordloop_core::ErrorReport;

/// Failures at the vocabulary service boundary, classified by how the
/// caller should react.
#[derive(Debug)]
pub enum StoreError {
    /// Network or server failure. Retrying is reasonable; local state was
    /// left untouched or rolled back.
    Transient(String),
    /// Not authenticated, or the item does not belong to this account.
    /// Fatal for the operation; the user must re-authenticate.
    Unauthorized(String),
    /// The service answered with a shape we refuse to coerce. Fatal for the
    /// operation.
    Malformed(String),
}

impl StoreError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StoreError::Transient(_))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Transient(msg) => write!(f, "network error: {msg}"),
            StoreError::Unauthorized(msg) => write!(f, "authorization error: {msg}"),
            StoreError::Malformed(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl Error for StoreError {}

impl From<reqwest::Error> for StoreError {
    fn from(value: reqwest::Error) -> Self {
        StoreError::Transient(value.to_string())
    }
}

impl From<StoreError> for ErrorReport {
    fn from(value: StoreError) -> Self {
        ErrorReport::new(value.to_string())
    }
}
