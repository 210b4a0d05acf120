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

use wordloop_core::Fallible;
use wordloop_core::Timestamp;

use crate::config::AppConfig;
use crate::store::VocabStore;

/// Lists the items currently due, oldest first.
pub async fn list_due(config_path: &str) -> Fallible<()> {
    let config = AppConfig::load(config_path)?;
    let store = VocabStore::new(&config.server_url, config.token()?);
    let due = store.fetch_due(Timestamp::now()).await?;
    if due.is_empty() {
        println!("No items due for review.");
        return Ok(());
    }
    println!("{:<24} {:>7}  WORD", "DUE SINCE", "MASTERY");
    for item in due {
        println!(
            "{:<24} {:>7}  {}",
            item.next_review.to_string(),
            item.mastery,
            item.word
        );
    }
    Ok(())
}
