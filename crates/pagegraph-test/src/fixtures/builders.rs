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

//! Builder pattern for wire-form change-op batches.

use serde_json::{json, Value};

/// One wire-form op with an encoded payload.
pub fn op(key: &str, op_type: &str, payload: &Value) -> Value {
    json!({"key": key, "type": op_type, "value": payload.to_string()})
}

/// One wire-form op with a raw (possibly malformed) payload.
pub fn raw_op(key: &str, op_type: &str, raw: &str) -> Value {
    json!({"key": key, "type": op_type, "value": raw})
}

/// Fluent builder for a batch.
///
/// ```
/// use pagegraph_test::fixtures::builders::BatchBuilder;
/// use serde_json::json;
///
/// let batch = BatchBuilder::new()
///     .put("/pages/p", json!({"main": ["/components/a"]}))
///     .build();
/// assert!(batch.starts_with('['));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchBuilder {
    ops: Vec<Value>,
}

impl BatchBuilder {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `put` op.
    pub fn put(mut self, key: &str, payload: Value) -> Self {
        self.ops.push(op(key, "put", &payload));
        self
    }

    /// Append a `write` op (alternate spelling of `put`).
    pub fn write(mut self, key: &str, payload: Value) -> Self {
        self.ops.push(op(key, "write", &payload));
        self
    }

    /// Append a `del` op.
    pub fn del(mut self, key: &str) -> Self {
        self.ops.push(json!({"key": key, "type": "del"}));
        self
    }

    /// Append an op with a raw payload string.
    pub fn raw(mut self, key: &str, op_type: &str, raw: &str) -> Self {
        self.ops.push(raw_op(key, op_type, raw));
        self
    }

    /// Number of ops so far.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True if no ops were added.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The batch as a JSON array string.
    pub fn build(self) -> String {
        Value::Array(self.ops).to_string()
    }
}
