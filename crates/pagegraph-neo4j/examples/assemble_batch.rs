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

//! Translate a change batch and print the resulting Cypher.
//!
//! Reads a JSON array of `{"key", "type", "value"}` ops from the file given
//! as the first argument, or uses a small built-in batch.
//!
//! ```text
//! RUST_LOG=pagegraph_neo4j=debug cargo run -p pagegraph-neo4j --example assemble_batch -- ops.json
//! ```

use pagegraph_neo4j::{assemble_with_config, parse_ops, SyncConfig};
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = r#"[
    {"key": "/pages/home", "type": "put", "value": "{\"title\":\"Home\",\"main\":[\"/components/hero\",\"/components/feed\"]}"},
    {"key": "/components/hero", "type": "put", "value": "{\"headline\":\"Hello\",\"cta\":{\"_ref\":\"/components/button\"}}"},
    {"key": "/lists/tags", "type": "put", "value": "[\"news\",\"sport\"]"},
    {"key": "/components/stale", "type": "del"}
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE.to_string(),
    };

    let ops = parse_ops(&input)?;
    let batch = assemble_with_config(&ops, &SyncConfig::new().with_sequential_variables())?;

    for statement in batch.statements() {
        println!("{}\n", statement.format(true));
    }

    if !batch.unsupported.is_empty() {
        println!("// Skipped {} list ref(s): {}", batch.unsupported.len(), batch.unsupported.join(", "));
    }

    Ok(())
}
