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

use axum::extract::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use wordloop_core::Rating;
use wordloop_core::Timestamp;

use crate::cache::BankCache;
use crate::cmd::review::server::new_session;
use crate::cmd::review::server::session_queue;
use crate::cmd::review::state::MutableState;
use crate::cmd::review::state::ServerState;
use crate::coordinator::submit_review;
use crate::error::StoreError;

#[derive(Deserialize)]
pub struct ActionForm {
    action: String,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<ActionForm>,
) -> Redirect {
    {
        let mut mutable = state.mutable.lock().await;
        match form.action.as_str() {
            "Reveal" => {
                mutable.session.reveal();
            }
            "NewSession" => {
                reset(&mut mutable).await;
            }
            "End" => {
                mutable.ended = true;
                if let Some(tx) = state.shutdown_tx.lock().unwrap().take() {
                    let _ = tx.send(());
                }
            }
            action => match Rating::try_from(action.to_string()) {
                Ok(rating) => rate(&mut mutable, rating).await,
                Err(_) => log::warn!("ignoring unknown action: {action}"),
            },
        }
    }
    Redirect::to("/")
}

async fn rate(m: &mut MutableState, rating: Rating) {
    if m.session.is_complete(m.queue.len()) {
        // No current item to rate; nothing to do.
        return;
    }
    let now = Timestamp::now();
    let item_id = m.queue[m.session.current_index].id.clone();
    match submit_review(&mut m.cache, &m.store, &item_id, rating, now).await {
        Ok(receipt) => {
            log::debug!(
                "recorded {} for {}: mastery {} -> {}",
                rating.as_str(),
                item_id,
                receipt.prior_mastery,
                receipt.item.mastery
            );
            m.session.record(item_id, rating, receipt.prior_mastery);
            m.notice = None;
            if let Err(e) = m.client.save_session(&m.session) {
                log::warn!("failed to persist session: {e}");
            }
        }
        Err(e) => {
            // Hold position: the item stays current and unrated, so nothing
            // is skipped.
            m.notice = Some(notice_for(&e));
        }
    }
}

fn notice_for(e: &StoreError) -> String {
    if e.is_recoverable() {
        format!("Could not save this review: {e}. The rating was not recorded; try again.")
    } else {
        format!("Could not save this review: {e}.")
    }
}

/// Starts over: refetches the bank, re-pulls the due queue, and mints a
/// fresh session.
async fn reset(m: &mut MutableState) {
    let now = Timestamp::now();
    match m.store.fetch_bank().await {
        Ok(bank) => {
            m.cache = BankCache::new(bank.items, now);
            m.queue = session_queue(&m.cache, None);
            m.session = new_session(now);
            m.notice = None;
            if let Err(e) = m.client.save_session(&m.session) {
                log::warn!("failed to persist session: {e}");
            }
        }
        Err(e) => {
            m.notice = Some(format!("Could not start a new session: {e}."));
        }
    }
}
