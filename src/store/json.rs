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

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use crate::error::Fallible;
use crate::store::LoadReport;
use crate::store::RejectedItem;
use crate::store::Store;
use crate::types::item::ReviewItem;

/// A store that keeps the whole item map in one JSON file, one object per
/// item id, so operators can inspect and edit the state by hand.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Store for JsonStore {
    fn save(&self, items: &HashMap<String, ReviewItem>) -> Fallible<()> {
        // Sort by item id so the file diffs cleanly between saves.
        let sorted: BTreeMap<&String, &ReviewItem> = items.iter().collect();
        let contents = serde_json::to_string_pretty(&sorted)?;
        // Write whole-then-rename: readers never observe a partial write.
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, &self.path)?;
        log::debug!("Saved {} items to {:?}", items.len(), self.path);
        Ok(())
    }

    fn load(&self) -> Fallible<LoadReport> {
        if !self.path.exists() {
            return Ok(LoadReport {
                items: HashMap::new(),
                rejected: Vec::new(),
            });
        }
        let contents = fs::read_to_string(&self.path)?;
        let raw: BTreeMap<String, Value> = serde_json::from_str(&contents)?;
        let mut items = HashMap::new();
        let mut rejected = Vec::new();
        for (item_id, value) in raw {
            match parse_item(&item_id, value) {
                Ok(item) => {
                    items.insert(item_id, item);
                }
                Err(reason) => {
                    log::warn!("Rejecting persisted item {item_id:?}: {reason}");
                    rejected.push(RejectedItem { item_id, reason });
                }
            }
        }
        Ok(LoadReport { items, rejected })
    }
}

fn parse_item(item_id: &str, value: Value) -> Result<ReviewItem, String> {
    let item: ReviewItem = serde_json::from_value(value).map_err(|e| e.to_string())?;
    if item.item_id != item_id {
        return Err(format!(
            "record id {:?} does not match its key",
            item.item_id
        ));
    }
    item.validate()?;
    Ok(item)
}
