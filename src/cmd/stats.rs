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

use clap::ValueEnum;

use wordloop_core::Fallible;

use crate::config::AppConfig;
use crate::store::VocabStore;

#[derive(ValueEnum, Clone, Copy, PartialEq)]
pub enum StatsFormat {
    /// Plain text, one figure per line.
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

pub async fn print_stats(config_path: &str, format: StatsFormat) -> Fallible<()> {
    let config = AppConfig::load(config_path)?;
    let store = VocabStore::new(&config.server_url, config.token()?);
    let bank = store.fetch_bank().await?;
    let stats = bank.stats;
    match format {
        StatsFormat::Text => {
            println!("Total words:     {}", stats.total_words);
            println!("Mastered:        {}", stats.mastered_words);
            println!("Learning:        {}", stats.learning_words);
            println!("Due for review:  {}", stats.needs_review_words);
            println!("Average mastery: {}", stats.average_mastery);
        }
        StatsFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
