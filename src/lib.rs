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

//! An SM-2 spaced repetition scheduler for vocabulary learning.
//!
//! The [`scheduler::Scheduler`] owns the per-item scheduling state and the
//! quality-to-interval transition function. The [`session::ReviewSession`]
//! assembles a bounded run of due and new items and steps through it one
//! item at a time. Persistence is an optional collaborator behind the
//! [`store::Store`] trait.

pub mod config;
pub mod error;
pub mod scheduler;
pub mod session;
pub mod sm2;
pub mod store;
pub mod types;
pub mod vocabulary;
