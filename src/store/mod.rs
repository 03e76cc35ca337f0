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

pub mod json;
pub mod sqlite;

use std::collections::HashMap;

use crate::error::Fallible;
use crate::types::item::ReviewItem;

/// A persistence sink for scheduler state.
///
/// `save` persists the whole item map; `load` reads it back. Corrupt
/// persisted records are rejected individually: the well-formed remainder
/// loads, and the rejects are reported in the [`LoadReport`].
pub trait Store {
    fn save(&self, items: &HashMap<String, ReviewItem>) -> Fallible<()>;
    fn load(&self) -> Fallible<LoadReport>;
}

pub struct LoadReport {
    pub items: HashMap<String, ReviewItem>,
    pub rejected: Vec<RejectedItem>,
}

/// A persisted record that failed validation on load.
pub struct RejectedItem {
    pub item_id: String,
    pub reason: String,
}
