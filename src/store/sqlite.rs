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
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use rusqlite::Connection;
use rusqlite::Row;
use rusqlite::Transaction;
use rusqlite::params;

use crate::error::Fallible;
use crate::store::LoadReport;
use crate::store::RejectedItem;
use crate::store::Store;
use crate::types::item::ReviewItem;
use crate::types::timestamp::Timestamp;

/// A store backed by a single-table SQLite database.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        let conn = Arc::new(Mutex::new(conn));
        Ok(Self { conn })
    }

    fn acquire(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }
}

impl Store for SqliteStore {
    fn save(&self, items: &HashMap<String, ReviewItem>) -> Fallible<()> {
        let mut conn = self.acquire();
        let tx = conn.transaction()?;
        // The saved map is a full snapshot, so replace the table contents.
        tx.execute("delete from items;", [])?;
        {
            let sql = "insert into items (item_id, native_form, gloss, ease_factor, interval, repetitions, next_review, last_review, total_reviews, correct_count, incorrect_count) values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?);";
            let mut stmt = tx.prepare(sql)?;
            for item in items.values() {
                stmt.execute(params![
                    item.item_id,
                    item.native_form,
                    item.gloss,
                    item.ease_factor,
                    item.interval,
                    item.repetitions,
                    item.next_review,
                    item.last_review,
                    item.total_reviews,
                    item.correct_count,
                    item.incorrect_count,
                ])?;
            }
        }
        tx.commit()?;
        log::debug!("Saved {} items to the database", items.len());
        Ok(())
    }

    fn load(&self) -> Fallible<LoadReport> {
        let conn = self.acquire();
        let sql = "select item_id, native_form, gloss, ease_factor, interval, repetitions, next_review, last_review, total_reviews, correct_count, incorrect_count from items;";
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut items = HashMap::new();
        let mut rejected = Vec::new();
        while let Some(row) = rows.next()? {
            let item_id: String = row.get(0)?;
            match read_item(row, &item_id) {
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

fn read_item(row: &Row, item_id: &str) -> Result<ReviewItem, String> {
    let item = row_to_item(row, item_id).map_err(|e| e.to_string())?;
    item.validate()?;
    Ok(item)
}

fn row_to_item(row: &Row, item_id: &str) -> rusqlite::Result<ReviewItem> {
    let native_form: String = row.get(1)?;
    let gloss: String = row.get(2)?;
    let ease_factor: f64 = row.get(3)?;
    let interval: u32 = row.get(4)?;
    let repetitions: u32 = row.get(5)?;
    let next_review: Option<Timestamp> = row.get(6)?;
    let last_review: Option<Timestamp> = row.get(7)?;
    let total_reviews: u32 = row.get(8)?;
    let correct_count: u32 = row.get(9)?;
    let incorrect_count: u32 = row.get(10)?;
    Ok(ReviewItem {
        item_id: item_id.to_string(),
        native_form,
        gloss,
        ease_factor,
        interval,
        repetitions,
        next_review,
        last_review,
        total_reviews,
        correct_count,
        incorrect_count,
    })
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let mut stmt =
        tx.prepare("select count(*) from sqlite_master where type = 'table' and name = 'items';")?;
    let count: i64 = stmt.query_row([], |row| row.get(0))?;
    Ok(count > 0)
}
