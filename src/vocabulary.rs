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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;

/// One entry from the external vocabulary. The scheduler never mutates
/// these; it only filters them against its tracked ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub id: String,
    pub native_form: String,
    pub gloss: String,
}

/// Load a vocabulary from a JSON array file.
pub fn load_vocabulary(path: &Path) -> Fallible<Vec<VocabEntry>> {
    let contents = read_to_string(path)?;
    let entries: Vec<VocabEntry> = serde_json::from_str(&contents)?;
    Ok(entries)
}
