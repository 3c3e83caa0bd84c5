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

//! Canonical batches.

use serde_json::json;

use super::builders::BatchBuilder;

/// A component with one embedded child component.
pub fn component_with_child() -> String {
    BatchBuilder::new()
        .write(
            "/components/x",
            json!({"title": "hi", "child": {"_ref": "/components/y"}}),
        )
        .build()
}

/// A page holding several components through an array and an embedded object.
pub fn page_with_components() -> String {
    BatchBuilder::new()
        .put(
            "site.com/pages/home",
            json!({
                "url": "http://site.com/",
                "main": [
                    "site.com/components/hero",
                    "site.com/components/article/instances/a",
                    "site.com/components/footer"
                ],
                "head": {"_ref": "site.com/components/meta", "title": "Home"}
            }),
        )
        .build()
}

/// Array mixing a ref string, an embedded ref and a plain number.
pub fn array_of_refs() -> String {
    BatchBuilder::new()
        .put(
            "/components/x",
            json!({"items": ["/components/a", {"_ref": "/components/b"}, 42]}),
        )
        .build()
}

/// Fields with no references at all.
pub fn scalars_only() -> String {
    BatchBuilder::new()
        .put(
            "/components/plain",
            json!({
                "text": "hello",
                "count": 3,
                "ratio": 1.5,
                "flag": false,
                "missing": null,
                "meta": {"author": "a"},
                "words": ["one", "two"],
                "link": "/pages/elsewhere"
            }),
        )
        .build()
}

/// A single write to a list.
pub fn list_write() -> String {
    BatchBuilder::new()
        .put("/lists/tags", json!(["news", "sport"]))
        .build()
}

/// Deletes only.
pub fn deletes_only() -> String {
    BatchBuilder::new()
        .del("/components/a")
        .del("/pages/b")
        .build()
}

/// Values that break naive string interpolation.
pub fn special_strings() -> String {
    BatchBuilder::new()
        .put(
            "/components/it's",
            json!({
                "title": "it's \"quoted\"",
                "body": "line one\nline two\ttabbed \\ backslash",
                "og:title": "colon key",
                "match": "keyword key"
            }),
        )
        .build()
}

/// The same parent written twice in one batch.
pub fn repeated_parent() -> String {
    BatchBuilder::new()
        .put("/components/x", json!({"a": "/components/a"}))
        .put("/components/x", json!({"b": {"_ref": "/components/b"}}))
        .build()
}

/// Pages, components, a list, a delete, and both write spellings.
pub fn mixed_batch() -> String {
    BatchBuilder::new()
        .put(
            "/pages/home",
            json!({
                "title": "Home",
                "main": ["/components/hero", "/components/article/instances/a", 42]
            }),
        )
        .put(
            "/components/hero",
            json!({"title": "Welcome", "cta": {"_ref": "/components/button"}}),
        )
        .del("/components/old")
        .write(
            "/components/article/instances/a",
            json!({"body": "text", "views": 3, "tags": null, "sidebar": "/components/ad"}),
        )
        .put("/lists/tags", json!(["/components/x"]))
        .put("/components/button", json!({"label": "Go", "published": true}))
        .build()
}
