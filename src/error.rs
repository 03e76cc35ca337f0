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

use thiserror::Error;

pub type Fallible<T> = Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A review was submitted for an item that was never added to the
    /// scheduler. Callers must register items before reviewing them.
    #[error("item {0:?} is not tracked by the scheduler")]
    UnknownItem(String),
    /// An answer was submitted (or the current item requested) before the
    /// session was started.
    #[error("session has not been started")]
    SessionNotStarted,
    /// An answer was submitted after the last queued item.
    #[error("no more items in this session")]
    SessionComplete,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}
