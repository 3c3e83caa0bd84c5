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

//! Change ops as they arrive from the key/value store's change log.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::classify::kind_name;
use crate::error::{Result, SyncError};

/// Kind of change-log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpType {
    /// A write. Also accepted as `"write"`.
    #[serde(alias = "write")]
    Put,
    /// A delete.
    Del,
    /// Any other kind.
    #[serde(other)]
    Other,
}

/// One entry of an input batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeOp {
    /// Ref of the entity being written.
    pub key: String,
    /// Entry kind; only writes are translated.
    #[serde(rename = "type")]
    pub op_type: OpType,
    /// JSON-encoded payload.
    #[serde(default)]
    pub value: String,
}

/// A decoded write: the op's ref plus its payload fields in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedOp {
    /// Ref of the entity, taken from the op key.
    pub reference: String,
    /// Payload fields.
    pub properties: Map<String, Value>,
}

impl ChangeOp {
    /// Create an op of any kind.
    pub fn new(key: impl Into<String>, op_type: OpType, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            op_type,
            value: value.into(),
        }
    }

    /// Create a write op from an already-encoded payload.
    pub fn put(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, OpType::Put, value)
    }

    /// Create a write op by encoding `value`.
    pub fn put_json(key: impl Into<String>, value: &Value) -> Result<Self> {
        Ok(Self::put(key, serde_json::to_string(value)?))
    }

    /// Create a delete op.
    pub fn del(key: impl Into<String>) -> Self {
        Self::new(key, OpType::Del, String::new())
    }

    /// Whether this op is a write.
    pub fn is_write(&self) -> bool {
        self.op_type == OpType::Put
    }

    /// Decode the payload of a write into a JSON value of any shape.
    ///
    /// Returns `Ok(None)` for anything that is not a write; such payloads are
    /// never decoded.
    ///
    /// # Errors
    ///
    /// `SyncError::InvalidPayload` if the payload is not valid JSON.
    pub fn decode(&self) -> Result<Option<Value>> {
        if !self.is_write() {
            return Ok(None);
        }

        serde_json::from_str(&self.value)
            .map(Some)
            .map_err(|source| SyncError::InvalidPayload {
                key: self.key.clone(),
                source,
            })
    }

    /// Decode the payload of a write into its fields.
    ///
    /// Returns `Ok(None)` for anything that is not a write. A `null` payload
    /// decodes to an empty property set.
    ///
    /// # Errors
    ///
    /// `SyncError::InvalidPayload` if the payload is not valid JSON,
    /// `SyncError::PayloadNotObject` if it is JSON but not an object.
    pub fn parse(&self) -> Result<Option<ParsedOp>> {
        let Some(decoded) = self.decode()? else {
            return Ok(None);
        };

        let properties = match decoded {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(SyncError::PayloadNotObject {
                    key: self.key.clone(),
                    found: kind_name(&other),
                })
            }
        };

        Ok(Some(ParsedOp {
            reference: self.key.clone(),
            properties,
        }))
    }
}

/// Decode a JSON array of `{key, type, value}` entries.
///
/// ```
/// # use pagegraph_neo4j::{parse_ops, OpType};
/// let ops = parse_ops(r#"[{"key": "/components/a", "type": "put", "value": "{}"}]"#).unwrap();
/// assert_eq!(ops[0].op_type, OpType::Put);
/// ```
pub fn parse_ops(json: &str) -> Result<Vec<ChangeOp>> {
    Ok(serde_json::from_str(json)?)
}
