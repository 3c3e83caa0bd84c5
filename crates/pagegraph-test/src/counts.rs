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

//! Fixture counting utilities.
//!
//! Independent tallies over wire-form batches, used to check assembler
//! output sizes without depending on the assembler itself.

use serde_json::Value;

fn ops(batch: &str) -> Vec<Value> {
    match serde_json::from_str::<Value>(batch) {
        Ok(Value::Array(ops)) => ops,
        _ => Vec::new(),
    }
}

fn is_write(op: &Value) -> bool {
    matches!(op["type"].as_str(), Some("put") | Some("write"))
}

fn key(op: &Value) -> &str {
    op["key"].as_str().unwrap_or_default()
}

fn payload(op: &Value) -> Value {
    op["value"]
        .as_str()
        .and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or(Value::Null)
}

fn is_child_ref(value: &Value) -> bool {
    match value {
        Value::String(s) => s.contains("/components/"),
        Value::Object(map) => matches!(map.get("_ref"), Some(Value::String(r)) if !r.is_empty()),
        _ => false,
    }
}

/// Count write ops in a batch.
pub fn count_writes(batch: &str) -> usize {
    ops(batch).iter().filter(|op| is_write(op)).count()
}

/// Count upserts a batch should produce: writes whose key is not a list
/// (page keys win over list keys).
pub fn count_expected_merges(batch: &str) -> usize {
    ops(batch)
        .iter()
        .filter(|op| is_write(op))
        .filter(|op| key(op).contains("/pages/") || !key(op).contains("/lists/"))
        .count()
}

/// Count relationship statements a batch should produce.
pub fn count_expected_relationships(batch: &str) -> usize {
    ops(batch)
        .iter()
        .filter(|op| is_write(op))
        .filter(|op| key(op).contains("/pages/") || !key(op).contains("/lists/"))
        .map(|op| match payload(op) {
            Value::Object(fields) => fields
                .values()
                .map(|value| match value {
                    Value::Array(entries) => entries.iter().filter(|e| is_child_ref(e)).count(),
                    other => usize::from(is_child_ref(other)),
                })
                .sum(),
            _ => 0,
        })
        .sum()
}
