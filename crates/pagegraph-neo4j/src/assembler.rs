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

//! Turn a batch of change ops into node upserts and relationship statements.
//!
//! For every write in the batch, in input order:
//!
//! 1. list writes are set aside by key; any other payload is decoded and
//!    flattened into a property map
//! 2. every payload field is checked for child references
//! 3. a `MERGE` upsert is emitted for the op's own ref (`Page` by `uri` or
//!    `Component` by `_ref`)
//!
//! Upserts are concatenated into one statement; relationships are returned
//! one statement each. Nothing here executes Cypher.
//!
//! Node variables are `p<index>` / `c<index>` where `index` is the op's
//! position in the input, so skipped ops leave gaps instead of renumbering
//! later ones.

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::classify::EntityKind;
use crate::config::{ListPolicy, StringEscaping, SyncConfig};
use crate::cypher::{escape_label, string_literal, CypherStatement};
use crate::error::{Result, SyncError};
use crate::op::{ChangeOp, ParsedOp};
use crate::properties::property_block;
use crate::relationships::{RelationshipBuilder, RelationshipStatement};

/// Padding appended after each upsert in [`BatchResult::merge`].
pub const STATEMENT_PADDING: &str = "    ";

/// Everything generated for one batch.
///
/// Serializes as `{"merge": "...", "relationships": ["...", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchResult {
    /// All node upserts, each followed by [`STATEMENT_PADDING`].
    pub merge: String,
    /// Relationship statements in op order, then field order.
    pub relationships: Vec<RelationshipStatement>,
    /// List refs that were written but not translated.
    #[serde(skip)]
    pub unsupported: Vec<String>,
    /// Number of upserts in `merge`.
    #[serde(skip)]
    pub merged: usize,
}

impl BatchResult {
    /// Query text of every relationship statement.
    pub fn relationship_queries(&self) -> Vec<String> {
        self.relationships.iter().map(RelationshipStatement::query).collect()
    }

    /// The batch as typed statements: the upserts first, then one
    /// statement per relationship.
    pub fn statements(&self) -> Vec<CypherStatement> {
        CypherStatement::upserts(&self.merge, self.merged)
            .into_iter()
            .chain(self.relationships.iter().map(CypherStatement::from))
            .collect()
    }

    /// True if nothing needs to be executed.
    pub fn is_empty(&self) -> bool {
        self.merge.is_empty() && self.relationships.is_empty()
    }
}

/// Translate a batch using default configuration.
///
/// ```
/// use pagegraph_neo4j::{assemble, ChangeOp};
///
/// let ops = vec![ChangeOp::put(
///     "/components/x",
///     r#"{"title":"hi","child":{"_ref":"/components/y"}}"#,
/// )];
/// let result = assemble(&ops).unwrap();
/// assert!(result.merge.starts_with("MERGE (c0:Component {_ref: '/components/x'})"));
/// assert_eq!(result.relationships.len(), 1);
/// ```
pub fn assemble(ops: &[ChangeOp]) -> Result<BatchResult> {
    assemble_with_config(ops, &SyncConfig::default())
}

/// Translate a batch.
///
/// # Errors
///
/// The batch is all-or-nothing: any error aborts it and no partial result
/// is returned.
///
/// - `SyncError::OpCountExceeded` if the batch is larger than `max_ops`
/// - `SyncError::InvalidPayload` for a write whose payload is not JSON
/// - `SyncError::PayloadNotObject` for a page or component write whose
///   payload is not an object or `null`
/// - `SyncError::UnsupportedList` for a list write under `ListPolicy::Reject`
/// - `SyncError::StringLengthExceeded` for an oversized property value
/// - `SyncError::InvalidIdentifier` for an empty payload field name
pub fn assemble_with_config(ops: &[ChangeOp], config: &SyncConfig) -> Result<BatchResult> {
    if let Some(max_count) = config.max_ops {
        if ops.len() > max_count {
            return Err(SyncError::OpCountExceeded {
                count: ops.len(),
                max_count,
            });
        }
    }

    debug!(ops = ops.len(), "assembling change batch");

    let prepared = ops
        .iter()
        .map(|op| prepare(op, config.list_policy))
        .collect::<Result<Vec<_>>>()?;

    let mut builder = RelationshipBuilder::new(config);
    let mut result = BatchResult::default();

    for (index, (op, prepared)) in ops.iter().zip(&prepared).enumerate() {
        let parsed = match prepared {
            Prepared::Ignored => {
                trace!(index, key = %op.key, op_type = ?op.op_type, "ignoring non-write op");
                continue;
            }
            Prepared::List => {
                warn!(index, key = %op.key, "list entities are not supported, skipping");
                result.unsupported.push(op.key.clone());
                continue;
            }
            Prepared::Write(parsed) => parsed,
        };

        let kind = EntityKind::of(&parsed.reference);
        let properties = property_block(&parsed.properties, config)?;
        if let Some(merge) = merge_statement(index, kind, &parsed.reference, &properties, config.escaping) {
            result.merge.push_str(&merge);
            result.merge.push_str(STATEMENT_PADDING);
            result.merged += 1;
        }
        result
            .relationships
            .extend(op_relationships(parsed, &mut builder));
    }

    debug!(
        merged = result.merged,
        relationships = result.relationships.len(),
        parents = builder.matched_parents(),
        unsupported = result.unsupported.len(),
        "assembled change batch"
    );

    Ok(result)
}

enum Prepared {
    Ignored,
    List,
    Write(ParsedOp),
}

// Lists are classified by key before their payload shape is looked at: a
// skipped list only has to be well-formed JSON.
fn prepare(op: &ChangeOp, list_policy: ListPolicy) -> Result<Prepared> {
    if !op.is_write() {
        return Ok(Prepared::Ignored);
    }

    if EntityKind::of(&op.key) == EntityKind::List {
        op.decode()?;
        return match list_policy {
            ListPolicy::Skip => Ok(Prepared::List),
            ListPolicy::Reject => Err(SyncError::UnsupportedList(op.key.clone())),
        };
    }

    Ok(op.parse()?.map_or(Prepared::Ignored, Prepared::Write))
}

fn op_relationships(
    parsed: &ParsedOp,
    builder: &mut RelationshipBuilder,
) -> Vec<RelationshipStatement> {
    parsed
        .properties
        .values()
        .flat_map(|value| builder.build_relationships(&parsed.reference, value))
        .collect()
}

/// Upsert for one entity, or `None` for a list.
///
/// `properties` is the rendered map body (see
/// [`property_block`](crate::properties::property_block)); it is applied on
/// both the match and the create branch.
///
/// ```
/// # use pagegraph_neo4j::{merge_statement, EntityKind, StringEscaping};
/// assert_eq!(
///     merge_statement(3, EntityKind::Page, "/pages/home", "title: 'Home'", StringEscaping::Escaped).unwrap(),
///     "MERGE (p3:Page {uri: '/pages/home'}) ON MATCH SET p3 += {title: 'Home'} ON CREATE SET p3 += {title: 'Home'}"
/// );
/// assert!(merge_statement(0, EntityKind::List, "/lists/tags", "", StringEscaping::Escaped).is_none());
/// ```
pub fn merge_statement(
    index: usize,
    kind: EntityKind,
    reference: &str,
    properties: &str,
    escaping: StringEscaping,
) -> Option<String> {
    let (prefix, label, key) = match kind {
        EntityKind::Page => ('p', "Page", "uri"),
        EntityKind::Component => ('c', "Component", "_ref"),
        EntityKind::List => return None,
    };
    let var = format!("{}{}", prefix, index);

    Some(format!(
        "MERGE ({var}{label} {{{key}: {reference}}}) ON MATCH SET {var} += {{{properties}}} ON CREATE SET {var} += {{{properties}}}",
        var = var,
        label = escape_label(label),
        key = key,
        reference = string_literal(reference, escaping),
        properties = properties,
    ))
}
