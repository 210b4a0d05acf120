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

use axum::extract::State;
use axum::response::Html;
use maud::Markup;
use maud::PreEscaped;
use maud::html;

use wordloop_core::Rating;
use wordloop_core::SessionPhase;
use wordloop_core::VocabularyItem;

use crate::cmd::review::state::MutableState;
use crate::cmd::review::state::ServerState;
use crate::cmd::review::template::page_template;
use crate::markdown::markdown_to_html;
use crate::markdown::markdown_to_html_inline;

pub async fn get_handler(State(state): State<ServerState>) -> Html<String> {
    let mutable = state.mutable.lock().await;
    let body = render(&mutable);
    Html(page_template(body).into_string())
}

fn render(m: &MutableState) -> Markup {
    if m.ended {
        return render_completion(m);
    }
    match m.session.phase(m.queue.len()) {
        SessionPhase::Complete => render_completion(m),
        SessionPhase::ItemShown => render_item(m, false),
        SessionPhase::AnswerRevealed => render_item(m, true),
    }
}

fn render_notice(m: &MutableState) -> Markup {
    html! {
        @if let Some(notice) = &m.notice {
            div.notice { (notice) }
        }
    }
}

fn render_item(m: &MutableState, revealed: bool) -> Markup {
    let item: &VocabularyItem = &m.queue[m.session.current_index];
    html! {
        main.review {
            (render_notice(m))
            div.progress {
                (format!("{} / {}", m.session.current_index + 1, m.queue.len()))
            }
            div.prompt {
                h1.word { (item.word) }
                @if let Some(context) = &item.context {
                    p.context { (context) }
                }
            }
            @if revealed {
                div.answer {
                    div.definition { (PreEscaped(markdown_to_html(&item.definition))) }
                    @if !item.examples.is_empty() {
                        ul.examples {
                            @for example in &item.examples {
                                li { (PreEscaped(markdown_to_html_inline(example))) }
                            }
                        }
                    }
                    @if !item.tags.is_empty() {
                        p.tags { (item.tags.join(", ")) }
                    }
                }
                form.controls method="post" action="/" {
                    @for rating in Rating::ALL {
                        button name="action" value=(rating.as_str()) { (rating.label()) }
                    }
                }
            } @else {
                form.controls method="post" action="/" {
                    button name="action" value="Reveal" { "Reveal" }
                }
            }
            form.secondary method="post" action="/" {
                button name="action" value="End" { "End session" }
            }
        }
    }
}

fn render_completion(m: &MutableState) -> Markup {
    let stats = m.cache.stats();
    html! {
        main.completion {
            (render_notice(m))
            h1 { "Session complete" }
            ul.summary {
                li { (format!("Items reviewed: {}", m.session.current_index)) }
                li { (format!("Improved: {}", m.session.improved_count)) }
                li { (format!("Newly mastered: {}", m.session.mastered_count)) }
                li { (format!("Average mastery: {}", stats.average_mastery)) }
                li { (format!("Still due: {}", stats.needs_review_words)) }
            }
            form.controls method="post" action="/" {
                button name="action" value="NewSession" { "Start new review" }
            }
            form.secondary method="post" action="/" {
                button name="action" value="End" { "Close" }
            }
        }
    }
}
