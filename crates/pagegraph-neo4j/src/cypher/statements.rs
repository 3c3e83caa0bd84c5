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

//! Executable units of a translated batch.
//!
//! A batch runs as one upsert statement followed by one statement per
//! `COMPONENT` edge, in that order: every edge matches nodes the upsert may
//! have just created.

use serde::{Deserialize, Serialize};

use super::escape::escape_string;
use crate::relationships::RelationshipStatement;

/// What a [`CypherStatement`] does to the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatementType {
    /// Page and component upserts of the whole batch.
    MergeNodes,
    /// One parent-to-child `COMPONENT` edge.
    CreateRelationship,
}

/// A statement ready to hand to an executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CypherStatement {
    /// Query text, without trailing padding.
    pub query: String,
    /// What the statement does.
    pub statement_type: StatementType,
    /// Human-readable summary, printed by [`format`](Self::format).
    pub comment: Option<String>,
}

impl CypherStatement {
    /// The batch's upserts as one statement, or `None` if nothing was merged.
    ///
    /// `merge` is the padded upsert text and `count` the number of nodes in it.
    ///
    /// ```
    /// # use pagegraph_neo4j::CypherStatement;
    /// let stmt = CypherStatement::upserts("MERGE (c0:Component {_ref: 'a'})    ", 1).unwrap();
    /// assert_eq!(stmt.format(true), "// Upsert 1 node(s)\nMERGE (c0:Component {_ref: 'a'});");
    /// assert!(CypherStatement::upserts("", 0).is_none());
    /// ```
    pub fn upserts(merge: &str, count: usize) -> Option<Self> {
        let query = merge.trim_end();
        if query.is_empty() {
            return None;
        }
        Some(Self {
            query: query.to_string(),
            statement_type: StatementType::MergeNodes,
            comment: Some(format!("Upsert {} node(s)", count)),
        })
    }

    /// Text terminated with `;`, optionally preceded by a `//` comment line.
    pub fn format(&self, include_comment: bool) -> String {
        match (&self.comment, include_comment) {
            (Some(comment), true) => format!("// {}\n{};", comment, self.query),
            _ => format!("{};", self.query),
        }
    }
}

impl From<&RelationshipStatement> for CypherStatement {
    fn from(rel: &RelationshipStatement) -> Self {
        Self {
            query: rel.query(),
            statement_type: StatementType::CreateRelationship,
            comment: Some(format!(
                "{} -> {}",
                escape_string(&rel.parent_ref),
                escape_string(&rel.child_ref)
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(parent: &str, child: &str) -> RelationshipStatement {
        RelationshipStatement {
            parent_ref: parent.to_string(),
            parent_var: "rel0".to_string(),
            parent_match: format!("MATCH (rel0:Page {{uri: '{}'}})", parent),
            child_ref: child.to_string(),
            child_var: "rel1".to_string(),
            child_match: format!("MATCH (rel1:Component {{_ref: '{}'}})", child),
        }
    }

    #[test]
    fn test_upserts_trims_padding() {
        let stmt = CypherStatement::upserts(
            "MERGE (c0:Component {_ref: 'a'}) ON MATCH SET c0 += {} ON CREATE SET c0 += {}    ",
            1,
        )
        .unwrap();
        assert_eq!(stmt.statement_type, StatementType::MergeNodes);
        assert!(!stmt.query.ends_with(' '));
        assert_eq!(stmt.format(false), format!("{};", stmt.query));
    }

    #[test]
    fn test_upserts_empty_batch() {
        assert!(CypherStatement::upserts("    ", 0).is_none());
    }

    #[test]
    fn test_relationship_statement_comment() {
        let stmt = CypherStatement::from(&edge("/pages/home", "/components/hero"));
        assert_eq!(stmt.statement_type, StatementType::CreateRelationship);
        assert_eq!(
            stmt.format(true),
            "// /pages/home -> /components/hero\n\
             MATCH (rel0:Page {uri: '/pages/home'}) MATCH (rel1:Component {_ref: '/components/hero'}) \
             WITH rel0, rel1 CREATE (rel0)-[:COMPONENT]->(rel1);"
        );
    }

    #[test]
    fn test_relationship_comment_stays_on_one_line() {
        let stmt = CypherStatement::from(&edge("/pages/a\nb", "/components/c"));
        let comment = stmt.comment.unwrap();
        assert!(!comment.contains('\n'));
        assert_eq!(comment, "/pages/a\\nb -> /components/c");
    }
}
