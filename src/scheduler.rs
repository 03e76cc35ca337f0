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

use std::collections::HashMap;

use serde::Serialize;

use crate::error::Error;
use crate::error::Fallible;
use crate::sm2;
use crate::store::Store;
use crate::types::item::ItemStatus;
use crate::types::item::ReviewItem;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;
use crate::vocabulary::VocabEntry;

/// Owns one [`ReviewItem`] per vocabulary id and applies the SM-2 transition
/// function to them. Knows nothing about sessions.
pub struct Scheduler {
    items: HashMap<String, ReviewItem>,
    store: Option<Box<dyn Store>>,
}

/// The scheduling parameters of an item after a review.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ReviewUpdate {
    pub interval: u32,
    pub ease_factor: f64,
    pub next_review: Timestamp,
}

/// An aggregate snapshot of the scheduler's state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Statistics {
    /// Count of tracked items.
    pub total_words: usize,
    /// Items with an interval of 21 days or more.
    pub mastered: usize,
    /// Items reviewed at least once and not yet mastered.
    pub learning: usize,
    /// Tracked items with no reviews yet.
    pub new: usize,
    pub due_today: usize,
    pub average_ease: f64,
    /// Percentage of all reviews that were correct.
    pub retention_rate: f64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            store: None,
        }
    }

    /// Build a scheduler from a persistence sink, loading whatever state it
    /// holds. Corrupt records are logged and skipped. Every subsequent
    /// review saves the full item map back to the store.
    pub fn with_store(store: Box<dyn Store>) -> Fallible<Self> {
        let report = store.load()?;
        for rejected in &report.rejected {
            log::warn!(
                "Skipping corrupt item {:?}: {}",
                rejected.item_id,
                rejected.reason
            );
        }
        Ok(Self {
            items: report.items,
            store: Some(store),
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_item(&self, item_id: &str) -> Option<&ReviewItem> {
        self.items.get(item_id)
    }

    /// Start tracking an item. If the id is already tracked, the existing
    /// item is returned untouched.
    pub fn add_item(&mut self, item_id: &str, native_form: &str, gloss: &str) -> &ReviewItem {
        self.items.entry(item_id.to_string()).or_insert_with(|| {
            log::debug!("Tracking new item {item_id:?}");
            ReviewItem::new(
                item_id.to_string(),
                native_form.to_string(),
                gloss.to_string(),
                Timestamp::now(),
            )
        })
    }

    /// Apply one review to a tracked item and reschedule it.
    ///
    /// Fails with [`Error::UnknownItem`] for ids never passed to
    /// [`Scheduler::add_item`]: silently creating a default item here would
    /// hide callers that forgot to register new items.
    pub fn review(&mut self, item_id: &str, quality: Quality) -> Fallible<ReviewUpdate> {
        let now = Timestamp::now();
        let item = self
            .items
            .get_mut(item_id)
            .ok_or_else(|| Error::UnknownItem(item_id.to_string()))?;
        let next_review = sm2::apply_review(item, quality, now);
        log::debug!(
            "{item_id} q={} interval={}d ease={:.2} reps={}",
            quality.value(),
            item.interval,
            item.ease_factor,
            item.repetitions
        );
        let update = ReviewUpdate {
            interval: item.interval,
            ease_factor: item.ease_factor,
            next_review,
        };
        if self.store.is_some() {
            self.save()?;
        }
        Ok(update)
    }

    /// Items due for review, most urgent first. Ordering is stable: items
    /// with no scheduled review sort as due now, and ties break on item id.
    pub fn get_due_items(&self, limit: Option<usize>) -> Vec<&ReviewItem> {
        let now = Timestamp::now();
        let mut due: Vec<&ReviewItem> = self.items.values().filter(|i| i.is_due(now)).collect();
        due.sort_by(|a, b| {
            let a_key = (a.next_review.unwrap_or(now), &a.item_id);
            let b_key = (b.next_review.unwrap_or(now), &b.item_id);
            a_key.cmp(&b_key)
        });
        if let Some(limit) = limit {
            due.truncate(limit);
        }
        due
    }

    /// Vocabulary entries not yet tracked, in the vocabulary's own order.
    /// Pure query: nothing is added to the scheduler.
    pub fn get_new_items<'a>(
        &self,
        vocabulary: &'a [VocabEntry],
        limit: usize,
    ) -> Vec<&'a VocabEntry> {
        vocabulary
            .iter()
            .filter(|entry| !self.items.contains_key(&entry.id))
            .take(limit)
            .collect()
    }

    pub fn get_statistics(&self) -> Statistics {
        let now = Timestamp::now();
        let mut mastered = 0;
        let mut learning = 0;
        let mut new = 0;
        let mut due_today = 0;
        let mut ease_sum = 0.0;
        let mut total_correct: u64 = 0;
        let mut total_reviews: u64 = 0;
        for item in self.items.values() {
            ease_sum += item.ease_factor;
            total_correct += u64::from(item.correct_count);
            total_reviews += u64::from(item.total_reviews);
            if item.total_reviews == 0 {
                new += 1;
            } else if item.interval >= sm2::MASTERED_INTERVAL {
                mastered += 1;
            } else {
                learning += 1;
            }
            if item.is_due(now) {
                due_today += 1;
            }
        }
        let average_ease = if self.items.is_empty() {
            0.0
        } else {
            round2(ease_sum / self.items.len() as f64)
        };
        let retention_rate = if total_reviews == 0 {
            0.0
        } else {
            round1(total_correct as f64 / total_reviews as f64 * 100.0)
        };
        Statistics {
            total_words: self.items.len(),
            mastered,
            learning,
            new,
            due_today,
            average_ease,
            retention_rate,
        }
    }

    pub fn get_item_status(&self, item_id: &str) -> ItemStatus {
        match self.items.get(item_id) {
            None => ItemStatus::Unseen,
            Some(item) => item.status(),
        }
    }

    /// Persist the full item map to the configured store, if any.
    pub fn save(&self) -> Fallible<()> {
        if let Some(store) = &self.store {
            store.save(&self.items)?;
        }
        Ok(())
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
