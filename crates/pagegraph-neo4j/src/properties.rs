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

//! Flattening of payload fields into a Cypher property map.
//!
//! Every field becomes one `name: '<text>'` entry: strings are used as-is,
//! all other values are JSON-encoded. Nested objects and arrays are stored
//! as JSON text, not as nested properties.

use serde_json::{Map, Value};

use crate::config::SyncConfig;
use crate::cypher::{property_key, string_literal, validate_string_length};
use crate::error::Result;

/// Text stored for a payload value.
///
/// ```
/// # use pagegraph_neo4j::properties::stringify_value;
/// # use serde_json::json;
/// assert_eq!(stringify_value(&json!("hi")).unwrap(), "hi");
/// assert_eq!(stringify_value(&json!(3)).unwrap(), "3");
/// assert_eq!(stringify_value(&json!({"_ref": "/components/a"})).unwrap(), r#"{"_ref":"/components/a"}"#);
/// ```
pub fn stringify_value(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Ok(serde_json::to_string(other)?),
    }
}

/// One `name: '<text>'` map entry.
///
/// Fails for an empty field name or a value over the configured length.
pub fn property_assignment(name: &str, value: &Value, config: &SyncConfig) -> Result<String> {
    let key = property_key(name, config.escaping)?;
    let text = stringify_value(value)?;
    validate_string_length(&text, name, config)?;
    Ok(format!("{}: {}", key, string_literal(&text, config.escaping)))
}

/// All entries of a payload, joined with `, `, in field order.
pub fn property_block(properties: &Map<String, Value>, config: &SyncConfig) -> Result<String> {
    let assignments = properties
        .iter()
        .map(|(name, value)| property_assignment(name, value, config))
        .collect::<Result<Vec<_>>>()?;
    Ok(assignments.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_stringify_scalars() {
        assert_eq!(stringify_value(&json!(true)).unwrap(), "true");
        assert_eq!(stringify_value(&json!(null)).unwrap(), "null");
        assert_eq!(stringify_value(&json!(2.5)).unwrap(), "2.5");
        assert_eq!(stringify_value(&json!([1, "a"])).unwrap(), r#"[1,"a"]"#);
    }

    #[test]
    fn test_assignment_escaped() {
        let config = SyncConfig::default();
        assert_eq!(
            property_assignment("title", &json!("hi"), &config).unwrap(),
            "title: 'hi'"
        );
        assert_eq!(
            property_assignment("child", &json!({"_ref": "/components/y"}), &config).unwrap(),
            r#"child: '{\"_ref\":\"/components/y\"}'"#
        );
        assert_eq!(
            property_assignment("og:title", &json!("it's"), &config).unwrap(),
            r"`og:title`: 'it\'s'"
        );
    }

    #[test]
    fn test_assignment_verbatim() {
        let config = SyncConfig::new().with_verbatim_strings();
        assert_eq!(
            property_assignment("child", &json!({"_ref": "/components/y"}), &config).unwrap(),
            r#"child: '{"_ref":"/components/y"}'"#
        );
        assert_eq!(
            property_assignment("og:title", &json!("it's"), &config).unwrap(),
            "og:title: 'it's'"
        );
    }

    #[test]
    fn test_block_keeps_lookalike_names_apart() {
        let props = map(json!({"title": "a", "ti\u{200B}tle": "b"}));
        let block = property_block(&props, &SyncConfig::default()).unwrap();
        assert_eq!(block, "title: 'a', `ti\u{200B}tle`: 'b'");
    }

    #[test]
    fn test_empty_field_name_is_rejected() {
        let props = map(json!({"": "x"}));
        for config in [SyncConfig::default(), SyncConfig::new().with_verbatim_strings()] {
            assert!(matches!(
                property_block(&props, &config),
                Err(SyncError::InvalidIdentifier(ref name)) if name.is_empty()
            ));
        }
    }

    #[test]
    fn test_block_preserves_order() {
        let props = map(json!({"b": 1, "a": "x", "c": false}));
        let block = property_block(&props, &SyncConfig::default()).unwrap();
        assert_eq!(block, "b: '1', a: 'x', c: 'false'");
    }

    #[test]
    fn test_block_empty() {
        assert_eq!(property_block(&Map::new(), &SyncConfig::default()).unwrap(), "");
    }

    #[test]
    fn test_length_limit_applies_to_encoded_text() {
        let config = SyncConfig::default().with_max_string_length(5);
        let props = map(json!({"ok": "abc", "list": ["abcdef"]}));
        let err = property_block(&props, &config).unwrap_err();
        assert!(matches!(
            err,
            SyncError::StringLengthExceeded { ref property, .. } if property == "list"
        ));
    }
}
