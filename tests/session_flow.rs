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

//! End-to-end walkthrough: config + vocabulary + a persistent scheduler,
//! run through a full session and reloaded from disk.

use std::fs;

use wordcards::config::Config;
use wordcards::error::Fallible;
use wordcards::scheduler::Scheduler;
use wordcards::session::ReviewSession;
use wordcards::session::SessionState;
use wordcards::store::json::JsonStore;
use wordcards::types::item::ItemStatus;
use wordcards::types::quality::Quality;
use wordcards::vocabulary::load_vocabulary;

#[test]
fn test_full_walkthrough() -> Fallible<()> {
    let dir = tempfile::tempdir()?;

    let vocabulary_path = dir.path().join("vocabulary.json");
    fs::write(
        &vocabulary_path,
        r#"[
            {"id": "word_001", "native_form": "бал", "gloss": "honey"},
            {"id": "word_002", "native_form": "тау", "gloss": "mountain"},
            {"id": "word_003", "native_form": "ат", "gloss": "horse"},
            {"id": "word_004", "native_form": "һыу", "gloss": "water"},
            {"id": "word_005", "native_form": "ҡояш", "gloss": "sun"},
            {"id": "word_006", "native_form": "йондоҙ", "gloss": "star"}
        ]"#,
    )?;

    let config_path = dir.path().join("wordcards.toml");
    fs::write(
        &config_path,
        "new_items_cap = 3\ndata_file = \"reviews.json\"\n",
    )?;
    let config = Config::load(&config_path)?;
    assert_eq!(config.new_items_cap, 3);
    assert_eq!(config.review_items_cap, 20);

    let data_path = dir.path().join(config.data_file.as_ref().unwrap());
    let vocabulary = load_vocabulary(&vocabulary_path)?;

    // First session: nothing tracked yet, so the queue is all new items.
    let mut scheduler = Scheduler::with_store(Box::new(JsonStore::new(data_path.clone())))?;
    assert!(scheduler.is_empty());
    {
        let mut session = ReviewSession::new(&mut scheduler, &vocabulary);
        assert!(session.start_session(config.new_items_cap, config.review_items_cap));
        assert_eq!(session.state(), SessionState::InProgress);

        for quality in [4, 5, 2] {
            let (item, display) = session.get_current_item().unwrap();
            assert_eq!(item.native_form, display.native_form);
            session.submit_answer(Quality::new(quality))?;
        }

        assert_eq!(session.state(), SessionState::Complete);
        let summary = session.get_session_summary();
        assert_eq!(summary.completed, 3);
        assert_eq!(summary.correct, 2);
        assert_eq!(summary.incorrect, 1);
        assert_eq!(summary.accuracy, 66.7);
    }

    let stats = scheduler.get_statistics();
    assert_eq!(stats.total_words, 3);
    assert_eq!(stats.learning, 3);
    assert_eq!(stats.retention_rate, 66.7);

    // Every answer autosaved, so a fresh scheduler sees the same state.
    let reloaded = Scheduler::with_store(Box::new(JsonStore::new(data_path)))?;
    assert_eq!(reloaded.len(), 3);
    assert_eq!(reloaded.get_statistics(), stats);
    assert_eq!(reloaded.get_item_status("word_001"), ItemStatus::Learning);
    assert_eq!(reloaded.get_item_status("word_004"), ItemStatus::Unseen);

    // Everything reviewed today is scheduled at least a day out, so the
    // second session draws only from the untracked remainder.
    let mut scheduler = reloaded;
    assert!(scheduler.get_due_items(None).is_empty());
    let mut session = ReviewSession::new(&mut scheduler, &vocabulary);
    assert!(session.start_session(config.new_items_cap, config.review_items_cap));
    let summary = session.get_session_summary();
    assert_eq!(summary.remaining, 3);
    let (item, _) = session.get_current_item().unwrap();
    assert_eq!(item.item_id, "word_004");
    Ok(())
}
