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

//! Classification of refs and payload values.
//!
//! Refs are classified by substring containment, not by parsing the path:
//! any key containing `/pages/` anywhere is a page, even by accident.

use serde_json::Value;

/// Path segment marking a page ref.
pub const PAGE_MARKER: &str = "/pages/";
/// Path segment marking a list ref.
pub const LIST_MARKER: &str = "/lists/";
/// Path segment marking a component ref string.
pub const COMPONENT_MARKER: &str = "/components/";
/// Field holding the ref of an embedded component.
pub const REF_FIELD: &str = "_ref";

/// The kind of entity a ref names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Stored as a `Page` node keyed by `uri`.
    Page,
    /// Not supported; no node is written.
    List,
    /// Stored as a `Component` node keyed by `_ref`. Everything that is not
    /// a page or a list.
    Component,
}

impl EntityKind {
    /// Classify a ref. Pages are checked before lists.
    ///
    /// ```
    /// # use pagegraph_neo4j::EntityKind;
    /// assert_eq!(EntityKind::of("site/pages/home"), EntityKind::Page);
    /// assert_eq!(EntityKind::of("site/lists/tags"), EntityKind::List);
    /// assert_eq!(EntityKind::of("site/components/a"), EntityKind::Component);
    /// assert_eq!(EntityKind::of("anything"), EntityKind::Component);
    /// ```
    pub fn of(reference: &str) -> Self {
        if is_page(reference) {
            EntityKind::Page
        } else if is_list(reference) {
            EntityKind::List
        } else {
            EntityKind::Component
        }
    }

    /// Node label for this kind, if it is stored as a node.
    pub fn label(self) -> Option<&'static str> {
        match self {
            EntityKind::Page => Some("Page"),
            EntityKind::Component => Some("Component"),
            EntityKind::List => None,
        }
    }

    /// Key property for this kind, if it is stored as a node.
    pub fn key_property(self) -> Option<&'static str> {
        match self {
            EntityKind::Page => Some("uri"),
            EntityKind::Component => Some(REF_FIELD),
            EntityKind::List => None,
        }
    }
}

/// True iff `reference` contains `/pages/`.
pub fn is_page(reference: &str) -> bool {
    reference.contains(PAGE_MARKER)
}

/// True iff `reference` contains `/lists/`.
pub fn is_list(reference: &str) -> bool {
    reference.contains(LIST_MARKER)
}

/// True iff `value` is an object with a non-empty string `_ref` field.
pub fn is_embedded_component(value: &Value) -> bool {
    embedded_ref(value).is_some()
}

/// True iff `value` is a string containing `/components/`.
pub fn is_component_ref(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.contains(COMPONENT_MARKER))
}

fn embedded_ref(value: &Value) -> Option<&str> {
    match value {
        Value::Object(map) => match map.get(REF_FIELD) {
            Some(Value::String(r)) if !r.is_empty() => Some(r.as_str()),
            _ => None,
        },
        _ => None,
    }
}

/// The child ref `value` points at, if it is a reference at all.
///
/// Embedded components yield their `_ref` field, component-ref strings
/// yield themselves; everything else yields `None`.
pub fn reference_of(value: &Value) -> Option<&str> {
    match value {
        Value::Object(_) => embedded_ref(value),
        Value::String(s) if s.contains(COMPONENT_MARKER) => Some(s.as_str()),
        _ => None,
    }
}

/// Short JSON kind name, for error messages.
pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
