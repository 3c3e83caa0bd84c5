// Pagegraph - key/value change feed to graph synchronisation
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Shared change-op fixtures for pagegraph tests.
//!
//! Fixtures are produced in wire form: a JSON array of
//! `{"key", "type", "value"}` entries whose `value` is itself JSON text,
//! exactly as a change-log reader hands them over.
//!
//! # Quick Start
//!
//! ```rust
//! use pagegraph_test::fixtures;
//! use pagegraph_test::fixtures::builders::BatchBuilder;
//! use serde_json::json;
//!
//! let batch = fixtures::page_with_components();
//!
//! let custom = BatchBuilder::new()
//!     .put("/components/a", json!({"title": "A"}))
//!     .del("/components/b")
//!     .build();
//!
//! assert_eq!(pagegraph_test::count_writes(&custom), 1);
//! ```

pub mod counts;
pub mod fixtures;

pub use counts::{count_expected_merges, count_expected_relationships, count_writes};

/// Type alias for a list of fixture functions (name, generator).
pub type FixtureList = Vec<(&'static str, fn() -> String)>;
