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

//! Relationship inference between a parent entity and the values it holds.
//!
//! A [`RelationshipBuilder`] lives for exactly one batch. It remembers the
//! match variable and clause of every parent it has seen so a parent with
//! many children is matched with the same text each time, and it hands out
//! variable names that are unique within the batch.

use std::collections::{HashMap, HashSet};
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::trace;

use crate::classify::{reference_of, EntityKind, REF_FIELD};
use crate::config::{StringEscaping, SyncConfig, VariableNaming};
use crate::cypher::{escape_label, escape_relationship_type, is_cypher_keyword, string_literal};

/// Length of randomly generated variable names.
pub const VARIABLE_LENGTH: usize = 12;

/// Relationship type of every generated edge.
pub const RELATIONSHIP_TYPE: &str = "COMPONENT";

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Memoized match of a parent node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentMatch {
    /// Variable bound to the parent node.
    pub var: String,
    /// `MATCH` clause binding `var`.
    pub clause: String,
}

/// One parent-to-child `COMPONENT` edge creation.
///
/// Serializes as its query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipStatement {
    /// Ref of the parent entity.
    pub parent_ref: String,
    /// Variable bound to the parent node.
    pub parent_var: String,
    /// `MATCH` clause for the parent, shared by all its children in a batch.
    pub parent_match: String,
    /// Ref of the child component.
    pub child_ref: String,
    /// Variable bound to the child node.
    pub child_var: String,
    /// `MATCH` clause for the child.
    pub child_match: String,
}

impl RelationshipStatement {
    /// Full statement text.
    pub fn query(&self) -> String {
        format!(
            "{} {} WITH {}, {} CREATE ({})-[{}]->({})",
            self.parent_match,
            self.child_match,
            self.parent_var,
            self.child_var,
            self.parent_var,
            escape_relationship_type(RELATIONSHIP_TYPE),
            self.child_var
        )
    }
}

impl fmt::Display for RelationshipStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query())
    }
}

impl Serialize for RelationshipStatement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.query())
    }
}

enum VariableSource {
    Random(StdRng),
    Sequential(usize),
}

impl VariableSource {
    fn next(&mut self) -> String {
        match self {
            VariableSource::Random(rng) => (0..VARIABLE_LENGTH)
                .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
                .collect(),
            VariableSource::Sequential(counter) => {
                let name = format!("rel{}", counter);
                *counter += 1;
                name
            }
        }
    }
}

/// Per-batch relationship context.
pub struct RelationshipBuilder {
    escaping: StringEscaping,
    variables: VariableSource,
    issued: HashSet<String>,
    parents: HashMap<String, ParentMatch>,
}

impl RelationshipBuilder {
    /// Create an empty context for one batch.
    pub fn new(config: &SyncConfig) -> Self {
        let variables = match config.variable_naming {
            VariableNaming::Random => VariableSource::Random(match config.variable_seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            }),
            VariableNaming::Sequential => VariableSource::Sequential(0),
        };

        Self {
            escaping: config.escaping,
            variables,
            issued: HashSet::new(),
            parents: HashMap::new(),
        }
    }

    /// The memoized match for `parent_ref`, if one was built in this batch.
    pub fn parent_match(&self, parent_ref: &str) -> Option<&ParentMatch> {
        self.parents.get(parent_ref)
    }

    /// Number of distinct parents matched so far.
    pub fn matched_parents(&self) -> usize {
        self.parents.len()
    }

    /// Relationship statements implied by `value` held under `parent_ref`.
    ///
    /// - an array yields one statement per entry that is an embedded
    ///   component or a component-ref string; other entries are dropped
    /// - an embedded component or component-ref string yields one statement
    /// - anything else yields nothing
    ///
    /// Only the top level of `value` is inspected.
    pub fn build_relationships(
        &mut self,
        parent_ref: &str,
        value: &Value,
    ) -> Vec<RelationshipStatement> {
        let children: Vec<&str> = match value {
            Value::Array(entries) => entries.iter().filter_map(reference_of).collect(),
            other => reference_of(other).into_iter().collect(),
        };

        if children.is_empty() {
            return Vec::new();
        }

        let parent = self.parent(parent_ref);
        children
            .into_iter()
            .map(|child_ref| self.relationship(parent_ref, &parent, child_ref))
            .collect()
    }

    fn parent(&mut self, parent_ref: &str) -> ParentMatch {
        if let Some(existing) = self.parents.get(parent_ref) {
            return existing.clone();
        }

        let (label, key) = match EntityKind::of(parent_ref) {
            EntityKind::Page => ("Page", "uri"),
            EntityKind::Component | EntityKind::List => ("Component", REF_FIELD),
        };
        let var = self.fresh_variable();
        let clause = format!(
            "MATCH ({}{} {{{}: {}}})",
            var,
            escape_label(label),
            key,
            string_literal(parent_ref, self.escaping)
        );
        trace!(parent = parent_ref, var = %var, "matched relationship parent");

        let parent = ParentMatch { var, clause };
        self.parents.insert(parent_ref.to_string(), parent.clone());
        parent
    }

    fn relationship(
        &mut self,
        parent_ref: &str,
        parent: &ParentMatch,
        child_ref: &str,
    ) -> RelationshipStatement {
        let child_var = self.fresh_variable();
        let child_match = format!(
            "MATCH ({}{} {{{}: {}}})",
            child_var,
            escape_label("Component"),
            REF_FIELD,
            string_literal(child_ref, self.escaping)
        );

        RelationshipStatement {
            parent_ref: parent_ref.to_string(),
            parent_var: parent.var.clone(),
            parent_match: parent.clause.clone(),
            child_ref: child_ref.to_string(),
            child_var,
            child_match,
        }
    }

    fn fresh_variable(&mut self) -> String {
        loop {
            let candidate = self.variables.next();
            if !is_cypher_keyword(&candidate) && self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}
