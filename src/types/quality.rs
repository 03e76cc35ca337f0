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

use serde::Serialize;

/// The minimum quality rating that counts as a successful recall.
const SUCCESS_THRESHOLD: u8 = 3;

/// A self-reported recall quality rating, from 0 (total blackout) to 5
/// (instant perfect recall).
///
/// Out-of-range input is clamped on construction rather than rejected, so
/// callers with an off-by-one rating scale degrade gracefully.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(transparent)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: i32) -> Self {
        Self(value.clamp(0, 5) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether this rating counts as a successful recall for scheduling.
    pub fn is_success(self) -> bool {
        self.0 >= SUCCESS_THRESHOLD
    }
}

impl From<i32> for Quality {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}
