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

//! The SM-2 transition function.
//!
//! Given a recall quality rating, this updates one item's interval, ease
//! factor, repetition count, and due date. Pure state transition: no clock
//! reads, no I/O, no knowledge of sessions.

use crate::types::item::ReviewItem;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;

/// The ease factor assigned to a brand-new item.
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// The hard floor below which the ease factor never falls.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Interval after the first successful review, in days.
const FIRST_INTERVAL: u32 = 1;

/// Interval after the second consecutive successful review, in days.
const SECOND_INTERVAL: u32 = 6;

/// Items with intervals of this many days or more count as mastered.
pub const MASTERED_INTERVAL: u32 = 21;

/// Items with intervals of this many days or more (but below the mastered
/// cutoff) count as reviewing.
pub const REVIEWING_INTERVAL: u32 = 7;

/// Apply one review to an item, mutating its scheduling state in place.
/// Returns the item's new due timestamp.
pub fn apply_review(item: &mut ReviewItem, quality: Quality, now: Timestamp) -> Timestamp {
    item.total_reviews += 1;
    item.last_review = Some(now);

    if quality.is_success() {
        item.correct_count += 1;
        item.interval = match item.repetitions {
            0 => FIRST_INTERVAL,
            1 => SECOND_INTERVAL,
            _ => (item.interval as f64 * item.ease_factor).round() as u32,
        };
        item.repetitions += 1;
    } else {
        item.incorrect_count += 1;
        item.repetitions = 0;
        item.interval = FIRST_INTERVAL;
    }

    // The interval multiply above reads the ease factor from before this
    // adjustment. Reordering these two steps changes the review cadence for
    // every existing item.
    let q = f64::from(quality.value());
    item.ease_factor =
        (item.ease_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02))).max(MIN_EASE_FACTOR);

    let next_review = now.plus_days(item.interval);
    item.next_review = Some(next_review);
    next_review
}
