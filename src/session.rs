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

//! The review-session state machine.
//!
//! A session assembles one bounded run of due and new items, then steps
//! through it one item at a time, feeding each rating into the scheduler.
//! Sessions are ephemeral: discarding one mid-way loses nothing, since every
//! submitted answer has already updated the scheduler.

use serde::Serialize;

use crate::error::Error;
use crate::error::Fallible;
use crate::scheduler::Scheduler;
use crate::types::item::ReviewItem;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;
use crate::vocabulary::VocabEntry;

/// NotStarted → InProgress → Complete. A session with an empty queue is
/// Complete the moment it starts.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionState {
    NotStarted,
    InProgress,
    Complete,
}

pub struct ReviewSession<'a> {
    scheduler: &'a mut Scheduler,
    vocabulary: &'a [VocabEntry],
    queue: Vec<String>,
    cursor: usize,
    state: SessionState,
    correct: usize,
    incorrect: usize,
}

/// Display fields for the item currently under review, resolved from the
/// vocabulary when present, falling back to the strings carried on the item.
#[derive(Clone, Copy, Debug)]
pub struct ItemDisplay<'a> {
    pub native_form: &'a str,
    pub gloss: &'a str,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerResult {
    Correct,
    Incorrect,
}

/// What happened to the item just answered.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct AnswerOutcome {
    pub result: AnswerResult,
    pub new_interval: u32,
    pub new_ease: f64,
    pub next_review: Timestamp,
    pub completed: usize,
    pub total: usize,
}

impl AnswerOutcome {
    /// Progress through the session as a fraction, e.g. `"3/8"`.
    pub fn progress(&self) -> String {
        format!("{}/{}", self.completed, self.total)
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize)]
pub struct SessionSummary {
    pub completed: usize,
    pub remaining: usize,
    pub correct: usize,
    pub incorrect: usize,
    /// Percentage of answered items that were correct.
    pub accuracy: f64,
}

impl<'a> ReviewSession<'a> {
    pub fn new(scheduler: &'a mut Scheduler, vocabulary: &'a [VocabEntry]) -> Self {
        Self {
            scheduler,
            vocabulary,
            queue: Vec::new(),
            cursor: 0,
            state: SessionState::NotStarted,
            correct: 0,
            incorrect: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Build the session queue: up to `review_items_cap` due items, then up
    /// to `new_items_cap` vocabulary entries not yet tracked. New entries are
    /// registered with the scheduler here. Returns whether the queue is
    /// non-empty.
    ///
    /// Calling this on a session already under way discards the previous
    /// queue and stats and rebuilds from scratch.
    pub fn start_session(&mut self, new_items_cap: usize, review_items_cap: usize) -> bool {
        let mut queue: Vec<String> = self
            .scheduler
            .get_due_items(Some(review_items_cap))
            .iter()
            .map(|item| item.item_id.clone())
            .collect();
        let due_count = queue.len();
        let new_entries = self.scheduler.get_new_items(self.vocabulary, new_items_cap);
        for entry in new_entries {
            self.scheduler
                .add_item(&entry.id, &entry.native_form, &entry.gloss);
            queue.push(entry.id.clone());
        }
        log::debug!(
            "Session started: {} due, {} new",
            due_count,
            queue.len() - due_count
        );
        self.cursor = 0;
        self.correct = 0;
        self.incorrect = 0;
        self.state = if queue.is_empty() {
            SessionState::Complete
        } else {
            SessionState::InProgress
        };
        self.queue = queue;
        !self.queue.is_empty()
    }

    /// The item under the cursor, without advancing. `None` once the session
    /// is complete (or before it starts).
    pub fn get_current_item(&self) -> Option<(&ReviewItem, ItemDisplay<'_>)> {
        if self.state != SessionState::InProgress {
            return None;
        }
        let item_id = &self.queue[self.cursor];
        let item = self.scheduler.get_item(item_id)?;
        let display = match self.vocabulary.iter().find(|entry| &entry.id == item_id) {
            Some(entry) => ItemDisplay {
                native_form: &entry.native_form,
                gloss: &entry.gloss,
            },
            None => ItemDisplay {
                native_form: &item.native_form,
                gloss: &item.gloss,
            },
        };
        Some((item, display))
    }

    /// Grade the current item, record the outcome, and advance the cursor.
    pub fn submit_answer(&mut self, quality: Quality) -> Fallible<AnswerOutcome> {
        match self.state {
            SessionState::NotStarted => return Err(Error::SessionNotStarted),
            SessionState::Complete => return Err(Error::SessionComplete),
            SessionState::InProgress => {}
        }
        let item_id = self.queue[self.cursor].clone();
        let update = self.scheduler.review(&item_id, quality)?;
        let result = if quality.is_success() {
            self.correct += 1;
            AnswerResult::Correct
        } else {
            self.incorrect += 1;
            AnswerResult::Incorrect
        };
        self.cursor += 1;
        if self.cursor >= self.queue.len() {
            log::debug!("Session completed");
            self.state = SessionState::Complete;
        }
        Ok(AnswerOutcome {
            result,
            new_interval: update.interval,
            new_ease: update.ease_factor,
            next_review: update.next_review,
            completed: self.cursor,
            total: self.queue.len(),
        })
    }

    /// Safe to call at any point, not only at completion.
    pub fn get_session_summary(&self) -> SessionSummary {
        let accuracy = if self.cursor == 0 {
            0.0
        } else {
            round1(self.correct as f64 / self.cursor as f64 * 100.0)
        };
        SessionSummary {
            completed: self.cursor,
            remaining: self.queue.len() - self.cursor,
            correct: self.correct,
            incorrect: self.incorrect,
            accuracy,
        }
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
