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

//! Translate key/value change-log batches into Neo4j graph statements.
//!
//! A document store keeps "pages" and "components" under string keys. This
//! crate turns one batch of change ops from that store's write-ahead log into
//! the Cypher needed to mirror the entities, and the containment edges
//! between them, in a property graph.
//!
//! # Mapping Strategy
//!
//! | Store concept | Neo4j Representation |
//! |---------------|---------------------|
//! | Key containing `/pages/` | `Page` node keyed by `uri` |
//! | Key containing `/lists/` | unsupported, nothing emitted |
//! | Any other key | `Component` node keyed by `_ref` |
//! | Payload field | String property (non-strings JSON-encoded) |
//! | Field holding `{"_ref": ...}` or a `/components/` string | `COMPONENT` edge to that component |
//! | Field holding an array of the above | one `COMPONENT` edge per reference entry |
//!
//! # Example
//!
//! ```rust
//! use pagegraph_neo4j::{assemble_with_config, ChangeOp, SyncConfig};
//!
//! fn example() -> Result<(), pagegraph_neo4j::SyncError> {
//!     let ops = vec![
//!         ChangeOp::put("/pages/home", r#"{"main":["/components/hero"]}"#),
//!         ChangeOp::put("/components/hero", r#"{"title":"Welcome"}"#),
//!         ChangeOp::del("/components/stale"),
//!     ];
//!
//!     let config = SyncConfig::new().with_sequential_variables();
//!     let batch = assemble_with_config(&ops, &config)?;
//!
//!     // One statement with both upserts...
//!     assert!(batch.merge.contains("MERGE (p0:Page {uri: '/pages/home'})"));
//!     assert!(batch.merge.contains("MERGE (c1:Component {_ref: '/components/hero'})"));
//!     // ...and one statement per edge.
//!     assert_eq!(batch.relationships.len(), 1);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Generated Cypher Format
//!
//! ```cypher
//! MERGE (c0:Component {_ref: '/components/x'}) ON MATCH SET c0 += {title: 'hi'} ON CREATE SET c0 += {title: 'hi'}
//!
//! MATCH (qXhTbWmZaLcE:Component {_ref: '/components/x'}) MATCH (RkVbnoPqsUte:Component {_ref: '/components/y'})
//! WITH qXhTbWmZaLcE, RkVbnoPqsUte CREATE (qXhTbWmZaLcE)-[:COMPONENT]->(RkVbnoPqsUte)
//! ```
//!
//! Upserts should run before relationships: a relationship statement only
//! matches nodes that already exist.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod assembler;
pub mod classify;
pub mod config;
pub mod cypher;
pub mod error;
pub mod op;
pub mod properties;
pub mod relationships;

// Re-export main types at crate root for convenience
pub use assembler::{assemble, assemble_with_config, merge_statement, BatchResult, STATEMENT_PADDING};
pub use classify::{is_component_ref, is_embedded_component, is_list, is_page, EntityKind};
pub use config::{
    ListPolicy, StringEscaping, SyncConfig, SyncConfigBuilder, VariableNaming,
    DEFAULT_MAX_STRING_LENGTH,
};
pub use cypher::{CypherStatement, StatementType};
pub use error::{Result, SyncError};
pub use op::{parse_ops, ChangeOp, OpType, ParsedOp};
pub use relationships::{ParentMatch, RelationshipBuilder, RelationshipStatement};
