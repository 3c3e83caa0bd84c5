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

//! Error types for change-op to Cypher translation.

use thiserror::Error;

/// Error type for batch assembly.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A write op carried a payload that is not well-formed JSON.
    #[error("invalid payload for '{key}': {source}")]
    InvalidPayload {
        /// Key of the offending op.
        key: String,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// A write op decoded to something other than an object or null.
    #[error("payload for '{key}' must be an object, got {found}")]
    PayloadNotObject {
        /// Key of the offending op.
        key: String,
        /// JSON kind that was found instead.
        found: &'static str,
    },

    /// A list ref was written while lists are configured to be rejected.
    #[error("list entities are not supported: {0}")]
    UnsupportedList(String),

    /// A payload field name that cannot be written as a property key.
    #[error("invalid Cypher identifier: '{0}'")]
    InvalidIdentifier(String),

    /// String length limit exceeded.
    #[error("String length {length} exceeds maximum allowed length {max_length} for property '{property}'")]
    StringLengthExceeded {
        /// Actual length of the string.
        length: usize,
        /// Maximum allowed length.
        max_length: usize,
        /// Property name where the violation occurred.
        property: String,
    },

    /// Batch size limit exceeded.
    #[error("batch of {count} ops exceeds maximum allowed count {max_count}")]
    OpCountExceeded {
        /// Number of ops in the batch.
        count: usize,
        /// Maximum allowed ops.
        max_count: usize,
    },

    /// Serialization error from serde_json.
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
