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

use crate::sm2::INITIAL_EASE_FACTOR;
use crate::sm2::MASTERED_INTERVAL;
use crate::sm2::MIN_EASE_FACTOR;
use crate::sm2::REVIEWING_INTERVAL;
use crate::types::timestamp::Timestamp;

/// One vocabulary entry's scheduling state.
///
/// Mutated only by the scheduler's review operation; everything else treats
/// it as a read-only record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReviewItem {
    pub item_id: String,
    /// Display string, carried for convenience. Not used by the algorithm.
    pub native_form: String,
    /// Display string, carried for convenience. Not used by the algorithm.
    pub gloss: String,
    /// Governs how fast intervals grow. Never below 1.3.
    pub ease_factor: f64,
    /// Days until the next due date. Zero means never successfully reviewed.
    pub interval: u32,
    /// Consecutive successful reviews. Reset to zero on failure.
    pub repetitions: u32,
    /// `None` means due now (brand-new item).
    pub next_review: Option<Timestamp>,
    pub last_review: Option<Timestamp>,
    pub total_reviews: u32,
    pub correct_count: u32,
    pub incorrect_count: u32,
}

/// The learning status of an item, derived from its interval and review
/// count. The 7 and 21 day cutoffs are fixed policy constants.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Unseen,
    New,
    Learning,
    Reviewing,
    Mastered,
}

impl ReviewItem {
    pub fn new(item_id: String, native_form: String, gloss: String, now: Timestamp) -> Self {
        Self {
            item_id,
            native_form,
            gloss,
            ease_factor: INITIAL_EASE_FACTOR,
            interval: 0,
            repetitions: 0,
            next_review: Some(now),
            last_review: None,
            total_reviews: 0,
            correct_count: 0,
            incorrect_count: 0,
        }
    }

    /// Whether this item is due for review. An item with no scheduled review
    /// is due immediately.
    pub fn is_due(&self, now: Timestamp) -> bool {
        match self.next_review {
            None => true,
            Some(next_review) => next_review <= now,
        }
    }

    /// The status of a tracked item. `Unseen` is only reachable through the
    /// scheduler, for ids it does not track.
    pub fn status(&self) -> ItemStatus {
        if self.total_reviews == 0 {
            ItemStatus::New
        } else if self.interval >= MASTERED_INTERVAL {
            ItemStatus::Mastered
        } else if self.interval >= REVIEWING_INTERVAL {
            ItemStatus::Reviewing
        } else {
            ItemStatus::Learning
        }
    }

    /// Check the scheduling invariants. Used by the stores to reject corrupt
    /// persisted records instead of loading them.
    pub fn validate(&self) -> Result<(), String> {
        if !self.ease_factor.is_finite() {
            return Err(format!("ease factor {} is not finite", self.ease_factor));
        }
        if self.ease_factor < MIN_EASE_FACTOR {
            return Err(format!(
                "ease factor {} is below the {MIN_EASE_FACTOR} floor",
                self.ease_factor
            ));
        }
        if self.total_reviews != self.correct_count + self.incorrect_count {
            return Err(format!(
                "review counters are inconsistent: {} != {} + {}",
                self.total_reviews, self.correct_count, self.incorrect_count
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh(now: Timestamp) -> ReviewItem {
        ReviewItem::new(
            "word_001".to_string(),
            "бал".to_string(),
            "honey".to_string(),
            now,
        )
    }

    #[test]
    fn test_new_item_defaults() {
        let now = Timestamp::now();
        let item = fresh(now);
        assert_eq!(item.ease_factor, 2.5);
        assert_eq!(item.interval, 0);
        assert_eq!(item.repetitions, 0);
        assert_eq!(item.next_review, Some(now));
        assert!(item.last_review.is_none());
        assert_eq!(item.status(), ItemStatus::New);
    }

    #[test]
    fn test_new_item_is_due() {
        let now = Timestamp::now();
        assert!(fresh(now).is_due(now));
    }

    #[test]
    fn test_unscheduled_item_is_due() {
        let now = Timestamp::now();
        let mut item = fresh(now);
        item.next_review = None;
        assert!(item.is_due(now));
    }

    #[test]
    fn test_future_item_is_not_due() {
        let now = Timestamp::now();
        let mut item = fresh(now);
        item.next_review = Some(now.plus_days(3));
        assert!(!item.is_due(now));
    }

    #[test]
    fn test_status_cutoffs() {
        let now = Timestamp::now();
        let mut item = fresh(now);
        item.total_reviews = 1;
        item.correct_count = 1;
        item.interval = 1;
        assert_eq!(item.status(), ItemStatus::Learning);
        item.interval = 7;
        assert_eq!(item.status(), ItemStatus::Reviewing);
        item.interval = 20;
        assert_eq!(item.status(), ItemStatus::Reviewing);
        item.interval = 21;
        assert_eq!(item.status(), ItemStatus::Mastered);
    }

    #[test]
    fn test_validate_rejects_low_ease() {
        let now = Timestamp::now();
        let mut item = fresh(now);
        item.ease_factor = 1.0;
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inconsistent_counters() {
        let now = Timestamp::now();
        let mut item = fresh(now);
        item.total_reviews = 3;
        item.correct_count = 1;
        item.incorrect_count = 1;
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_fresh_item() {
        let now = Timestamp::now();
        assert!(fresh(now).validate().is_ok());
    }
}
