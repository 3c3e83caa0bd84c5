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

//! Batches that must fail to assemble.

use super::builders::BatchBuilder;

/// A write whose payload is truncated JSON, after a valid write.
pub fn malformed_payload() -> String {
    BatchBuilder::new()
        .raw("/components/ok", "put", "{}")
        .raw("/components/broken", "put", "{\"title\": ")
        .build()
}

/// A write whose payload is valid JSON but not an object.
pub fn non_object_payload() -> String {
    BatchBuilder::new()
        .raw("/components/array", "put", "[1, 2, 3]")
        .build()
}

/// All failing batches as (name, batch) pairs.
pub fn invalid_batches() -> Vec<(&'static str, String)> {
    vec![
        ("malformed_payload", malformed_payload()),
        ("non_object_payload", non_object_payload()),
        (
            "bare_string_payload",
            BatchBuilder::new()
                .raw("/components/s", "write", "\"just text\"")
                .build(),
        ),
    ]
}
