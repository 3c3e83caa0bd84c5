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

//! Property-based tests for escaping and batch assembly.
//!
//! These tests verify invariants that should hold for all inputs.

use pagegraph_neo4j::{
    assemble_with_config,
    cypher::{escape_identifier, escape_string, is_valid_identifier, quote_string},
    ChangeOp, OpType, RelationshipBuilder, SyncConfig,
};
use pagegraph_test::count_expected_relationships;
use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::HashSet;

/// True if every `'` in an escaped string is preceded by an escaping `\`.
fn quotes_are_escaped(escaped: &str) -> bool {
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '\'' => return false,
            _ => {}
        }
    }
    true
}

fn entry() -> impl Strategy<Value = Value> {
    prop_oneof![
        "/components/[a-z]{1,6}".prop_map(Value::String),
        "/components/[a-z]{1,6}".prop_map(|r| json!({ "_ref": r })),
        "[a-z ]{0,10}".prop_map(Value::String),
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::Bool),
        Just(Value::Null),
        Just(json!({"_ref": ""})),
    ]
}

fn field_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        entry(),
        prop::collection::vec(entry(), 0..6).prop_map(Value::Array),
    ]
}

fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        "/pages/[a-z]{1,8}",
        "/components/[a-z]{1,8}",
        "/lists/[a-z]{1,8}",
        "[a-z]{1,8}",
    ]
}

fn op() -> impl Strategy<Value = ChangeOp> {
    (
        key(),
        prop_oneof![Just(OpType::Put), Just(OpType::Del), Just(OpType::Other)],
        prop::collection::btree_map("[a-z]{1,6}", field_value(), 0..5),
    )
        .prop_map(|(key, op_type, fields)| {
            let payload: serde_json::Map<String, Value> = fields.into_iter().collect();
            ChangeOp::new(key, op_type, Value::Object(payload).to_string())
        })
}

fn wire(ops: &[ChangeOp]) -> String {
    serde_json::to_string(ops).unwrap()
}

// ============================================================================
// String Escaping Properties
// ============================================================================

proptest! {
    /// Escaped strings never contain a bare single quote
    #[test]
    fn prop_escape_string_no_raw_quotes(s in ".*") {
        prop_assert!(quotes_are_escaped(&escape_string(&s)));
    }

    /// Quoted strings are single-quote delimited
    #[test]
    fn prop_quote_string_format(s in ".*") {
        let quoted = quote_string(&s);
        prop_assert!(quoted.starts_with('\''));
        prop_assert!(quoted.ends_with('\''));
        prop_assert!(quotes_are_escaped(&quoted[1..quoted.len() - 1]));
    }

    /// Clean strings pass through unchanged
    #[test]
    fn prop_escape_safe_string_unchanged(s in "[a-zA-Z0-9 /_.-]*") {
        let escaped = escape_string(&s);
        prop_assert_eq!(escaped.as_ref(), s.as_str());
    }

    /// Escaped identifiers are valid or backtick-quoted
    #[test]
    fn prop_escape_identifier_usable(s in ".+") {
        let escaped = escape_identifier(&s);
        prop_assert!(
            is_valid_identifier(&escaped)
                || (escaped.starts_with('`') && escaped.ends_with('`'))
        );
    }
}

// ============================================================================
// Relationship Properties
// ============================================================================

proptest! {
    /// Scalars without references never yield relationships
    #[test]
    fn prop_plain_strings_no_relationships(s in "[a-z ./]{0,20}") {
        prop_assume!(!s.contains("/components/"));
        let mut builder = RelationshipBuilder::new(&SyncConfig::default());
        prop_assert!(builder.build_relationships("/components/x", &Value::String(s)).is_empty());
    }

    /// Numbers and booleans never yield relationships
    #[test]
    fn prop_numbers_no_relationships(n in any::<f64>().prop_filter("finite", |f| f.is_finite()), b in any::<bool>()) {
        let mut builder = RelationshipBuilder::new(&SyncConfig::default());
        prop_assert!(builder.build_relationships("/pages/p", &json!(n)).is_empty());
        prop_assert!(builder.build_relationships("/pages/p", &json!(b)).is_empty());
    }

    /// One relationship per reference entry in an array
    #[test]
    fn prop_array_counts_reference_entries(entries in prop::collection::vec(entry(), 0..12)) {
        let expected = entries
            .iter()
            .filter(|e| match e {
                Value::String(s) => s.contains("/components/"),
                Value::Object(m) => m.get("_ref").and_then(Value::as_str).map_or(false, |r| !r.is_empty()),
                _ => false,
            })
            .count();
        let mut builder = RelationshipBuilder::new(&SyncConfig::default());
        let rels = builder.build_relationships("/components/x", &Value::Array(entries));
        prop_assert_eq!(rels.len(), expected);
    }
}

// ============================================================================
// Batch Properties
// ============================================================================

proptest! {
    /// Output sizes match an independent tally of the batch
    #[test]
    fn prop_batch_counts(ops in prop::collection::vec(op(), 0..8)) {
        let result = assemble_with_config(&ops, &SyncConfig::default()).unwrap();
        let expected_merges = ops
            .iter()
            .filter(|op| op.op_type == OpType::Put)
            .filter(|op| op.key.contains("/pages/") || !op.key.contains("/lists/"))
            .count();
        prop_assert_eq!(result.merged, expected_merges);
        prop_assert_eq!(result.merge.matches("MERGE (").count(), expected_merges);
        prop_assert_eq!(result.relationships.len(), count_expected_relationships(&wire(&ops)));
    }

    /// Variables are unique within a batch
    #[test]
    fn prop_variables_unique(ops in prop::collection::vec(op(), 0..8)) {
        let result = assemble_with_config(&ops, &SyncConfig::default()).unwrap();
        let mut parents = std::collections::HashMap::new();
        let mut children = HashSet::new();
        for rel in &result.relationships {
            let var = parents.entry(rel.parent_ref.clone()).or_insert_with(|| rel.parent_var.clone());
            prop_assert_eq!(var.as_str(), rel.parent_var.as_str());
            prop_assert!(children.insert(rel.child_var.clone()));
        }
        let parent_vars: HashSet<&String> = parents.values().collect();
        prop_assert_eq!(parent_vars.len(), parents.len());
        prop_assert!(parent_vars.iter().all(|v| !children.contains(*v)));
    }

    /// Non-write ops contribute nothing
    #[test]
    fn prop_non_writes_empty(ops in prop::collection::vec(op(), 0..8)) {
        let non_writes: Vec<ChangeOp> = ops
            .into_iter()
            .filter(|op| op.op_type != OpType::Put)
            .collect();
        let result = assemble_with_config(&non_writes, &SyncConfig::default()).unwrap();
        prop_assert!(result.is_empty());
    }

    /// Merge text does not depend on variable naming
    #[test]
    fn prop_merge_text_stable(ops in prop::collection::vec(op(), 0..8)) {
        let random = assemble_with_config(&ops, &SyncConfig::default()).unwrap();
        let sequential = assemble_with_config(&ops, &SyncConfig::new().with_sequential_variables()).unwrap();
        prop_assert_eq!(random.merge, sequential.merge);
        prop_assert_eq!(random.relationships.len(), sequential.relationships.len());
    }
}
