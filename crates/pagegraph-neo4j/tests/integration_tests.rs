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

//! Integration tests for pagegraph-neo4j against a real Neo4j instance.
//!
//! These tests require a running Neo4j instance at localhost:7687.
//! Run with: cargo test -p pagegraph-neo4j --features integration-tests --test integration_tests

#![cfg(feature = "integration-tests")]

use neo4rs::{ConfigBuilder, Graph, Query};
use pagegraph_neo4j::{assemble, parse_ops, BatchResult};
use pagegraph_test::fixtures;
use serial_test::serial;
use std::sync::Arc;

/// Helper to create a Neo4j connection.
async fn connect() -> Arc<Graph> {
    let uri = std::env::var("NEO4J_URI").unwrap_or_else(|_| "bolt://localhost:7687".to_string());
    let user = std::env::var("NEO4J_USER").unwrap_or_else(|_| "neo4j".to_string());
    let password = std::env::var("NEO4J_PASSWORD").unwrap_or_else(|_| "".to_string());

    let config = ConfigBuilder::default()
        .uri(&uri)
        .user(&user)
        .password(&password)
        .build()
        .expect("Failed to build config");

    Arc::new(Graph::connect(config).expect("Failed to connect to Neo4j"))
}

/// Helper to clean up test data.
async fn cleanup(graph: &Graph) {
    graph
        .run(Query::new("MATCH (n) DETACH DELETE n".to_string()))
        .await
        .expect("Failed to cleanup");
}

/// Execute a batch the way a change-feed consumer would: upserts first.
async fn execute(graph: &Graph, batch: &BatchResult) {
    for stmt in batch.statements() {
        graph
            .run(Query::new(stmt.query.clone()))
            .await
            .unwrap_or_else(|_| panic!("Failed to execute: {}", stmt.query));
    }
}

async fn count(graph: &Graph, query: &str) -> i64 {
    let mut result = graph
        .execute(Query::new(query.to_string()))
        .await
        .expect("Failed to query");
    let row = result
        .next()
        .await
        .expect("Failed to get row")
        .expect("No row");
    row.get("count").expect("No count")
}

#[tokio::test]
#[serial]
async fn test_mixed_batch_creates_graph() {
    let graph = connect().await;
    cleanup(&graph).await;

    let ops = parse_ops(&fixtures::mixed_batch()).unwrap();
    let batch = assemble(&ops).unwrap();
    execute(&graph, &batch).await;

    assert_eq!(count(&graph, "MATCH (p:Page) RETURN count(p) as count").await, 1);
    assert_eq!(
        count(&graph, "MATCH (c:Component) RETURN count(c) as count").await,
        3
    );
    // Only edges whose child was upserted in the batch can be created.
    assert_eq!(
        count(
            &graph,
            "MATCH (:Page)-[r:COMPONENT]->(:Component) RETURN count(r) as count"
        )
        .await,
        2
    );
}

#[tokio::test]
#[serial]
async fn test_upsert_is_idempotent() {
    let graph = connect().await;
    cleanup(&graph).await;

    let ops = parse_ops(&fixtures::component_with_child()).unwrap();
    execute(&graph, &assemble(&ops).unwrap()).await;
    execute(&graph, &assemble(&ops).unwrap()).await;

    assert_eq!(
        count(
            &graph,
            "MATCH (c:Component {_ref: '/components/x'}) RETURN count(c) as count"
        )
        .await,
        1
    );
}

#[tokio::test]
#[serial]
async fn test_special_strings_execute() {
    let graph = connect().await;
    cleanup(&graph).await;

    let ops = parse_ops(&fixtures::special_strings()).unwrap();
    execute(&graph, &assemble(&ops).unwrap()).await;

    let mut result = graph
        .execute(Query::new(
            "MATCH (c:Component) RETURN c.title AS title".to_string(),
        ))
        .await
        .expect("Failed to query");
    let row = result.next().await.unwrap().unwrap();
    let title: String = row.get("title").unwrap();
    assert_eq!(title, "it's \"quoted\"");
}
