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
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Fallible;

/// Default number of new items introduced per session.
const DEFAULT_NEW_ITEMS_CAP: usize = 5;

/// Default number of due items pulled per session.
const DEFAULT_REVIEW_ITEMS_CAP: usize = 20;

/// Session defaults, read from a `wordcards.toml` sidecar file. Every field
/// is optional; a missing file means all defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub new_items_cap: usize,
    pub review_items_cap: usize,
    /// Where to persist scheduling state. `None` keeps state in memory only.
    pub data_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            new_items_cap: DEFAULT_NEW_ITEMS_CAP,
            review_items_cap: DEFAULT_REVIEW_ITEMS_CAP,
            data_file: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Fallible<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load(Path::new("./derpherp.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.new_items_cap, 5);
        assert_eq!(config.review_items_cap, 20);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wordcards.toml");
        fs::write(&path, "new_items_cap = 10\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.new_items_cap, 10);
        assert_eq!(config.review_items_cap, 20);
        assert!(config.data_file.is_none());
    }

    #[test]
    fn test_full_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wordcards.toml");
        fs::write(
            &path,
            "new_items_cap = 3\nreview_items_cap = 50\ndata_file = \"reviews.json\"\n",
        )
        .unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.review_items_cap, 50);
        assert_eq!(config.data_file, Some(PathBuf::from("reviews.json")));
    }

    #[test]
    fn test_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wordcards.toml");
        fs::write(&path, "new_items_cap = \"lots\"\n").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
