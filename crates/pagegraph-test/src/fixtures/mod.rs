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

//! Canonical change-op batches.
//!
//! - **batches**: well-formed batches covering pages, components, lists,
//!   deletes and every reference shape
//! - **errors**: batches that must fail
//! - **builders**: builder for custom batches

mod batches;
pub mod builders;
pub mod errors;

pub use batches::*;

use crate::FixtureList;

/// Returns all well-formed fixture functions for iteration.
pub fn all() -> FixtureList {
    vec![
        ("component_with_child", component_with_child),
        ("page_with_components", page_with_components),
        ("array_of_refs", array_of_refs),
        ("scalars_only", scalars_only),
        ("list_write", list_write),
        ("deletes_only", deletes_only),
        ("special_strings", special_strings),
        ("repeated_parent", repeated_parent),
        ("mixed_batch", mixed_batch),
    ]
}
