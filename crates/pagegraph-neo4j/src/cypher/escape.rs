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

//! Cypher string escaping and identifier handling.
//!
//! Every string literal and property name that ends up in generated
//! statement text goes through [`string_literal`] or [`property_key`], so the
//! escaping policy is decided in exactly one place.

use crate::config::{StringEscaping, SyncConfig};
use crate::error::{Result, SyncError};
use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;

/// Validate string length against configuration limits.
///
/// # Examples
///
/// ```
/// # use pagegraph_neo4j::cypher::validate_string_length;
/// # use pagegraph_neo4j::SyncConfig;
/// let config = SyncConfig::default().with_max_string_length(8);
/// assert!(validate_string_length("short", "title", &config).is_ok());
/// assert!(validate_string_length("far too long", "title", &config).is_err());
/// ```
pub fn validate_string_length(s: &str, property: &str, config: &SyncConfig) -> Result<()> {
    if let Some(max_length) = config.max_string_length {
        let length = s.len();
        if length > max_length {
            return Err(SyncError::StringLengthExceeded {
                length,
                max_length,
                property: property.to_string(),
            });
        }
    }
    Ok(())
}

#[inline]
fn needs_escaping(s: &str) -> bool {
    s.chars()
        .any(|ch| matches!(ch, '\\' | '\'' | '"' | '\n' | '\r' | '\t' | '\x00'))
}

/// Escape a string value for use inside a quoted Cypher literal.
///
/// Clean strings are returned borrowed.
///
/// ```
/// # use pagegraph_neo4j::cypher::escape_string;
/// assert_eq!(escape_string("/components/a"), "/components/a");
/// assert_eq!(escape_string("it's"), "it\\'s");
/// ```
pub fn escape_string(s: &str) -> Cow<'_, str> {
    if !needs_escaping(s) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 10);
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\x00' => escaped.push_str("\\u0000"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Quote a string value for Cypher with single quotes.
pub fn quote_string(s: &str) -> String {
    format!("'{}'", escape_string(s))
}

/// Render `s` as a single-quoted Cypher string literal under `escaping`.
///
/// ```
/// # use pagegraph_neo4j::cypher::string_literal;
/// # use pagegraph_neo4j::StringEscaping;
/// assert_eq!(string_literal("it's", StringEscaping::Escaped), "'it\\'s'");
/// assert_eq!(string_literal("it's", StringEscaping::Verbatim), "'it's'");
/// ```
pub fn string_literal(s: &str, escaping: StringEscaping) -> String {
    match escaping {
        StringEscaping::Escaped => quote_string(s),
        StringEscaping::Verbatim => format!("'{}'", s),
    }
}

/// Render a payload field name as a map key under `escaping`.
///
/// Under `Escaped` the name is kept exactly as written: plain identifiers
/// are emitted bare, anything else is wrapped in backticks. No
/// normalization happens, so two distinct field names never collapse into
/// one key.
///
/// ```
/// # use pagegraph_neo4j::cypher::property_key;
/// # use pagegraph_neo4j::StringEscaping;
/// assert_eq!(property_key("title", StringEscaping::Escaped).unwrap(), "title");
/// assert_eq!(property_key("og:title", StringEscaping::Escaped).unwrap(), "`og:title`");
/// assert!(property_key("", StringEscaping::Verbatim).is_err());
/// ```
///
/// # Errors
///
/// `SyncError::InvalidIdentifier` for an empty name, which has no Cypher
/// spelling under either policy.
pub fn property_key(name: &str, escaping: StringEscaping) -> Result<Cow<'_, str>> {
    if name.is_empty() {
        return Err(SyncError::InvalidIdentifier(String::new()));
    }

    Ok(match escaping {
        StringEscaping::Escaped if is_valid_identifier(name) && !is_cypher_keyword(name) => {
            Cow::Borrowed(name)
        }
        StringEscaping::Escaped => Cow::Owned(backtick(name)),
        StringEscaping::Verbatim => Cow::Borrowed(name),
    })
}

fn backtick(s: &str) -> String {
    format!("`{}`", s.replace('`', "``"))
}

/// Check if a string is a valid Cypher identifier.
///
/// Valid identifiers start with a letter or underscore, and contain only
/// letters, digits, and underscores.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };

    if !first.is_ascii_alphabetic() && first != '_' {
        return false;
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Normalize a string to NFC (Canonical Composition) form.
///
/// ```
/// # use pagegraph_neo4j::cypher::normalize_unicode;
/// assert_eq!(normalize_unicode("cafe\u{301}"), "caf\u{e9}");
/// ```
pub fn normalize_unicode(s: &str) -> String {
    s.nfc().collect()
}

// Control, zero-width and bidi formatting characters.
fn is_dangerous_unicode(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\u{200B}'
                | '\u{200C}'
                | '\u{200D}'
                | '\u{FEFF}'
                | '\u{202A}'
                | '\u{202B}'
                | '\u{202C}'
                | '\u{202D}'
                | '\u{202E}'
                | '\u{2066}'
                | '\u{2067}'
                | '\u{2068}'
                | '\u{2069}'
                | '\u{00AD}'
                | '\u{061C}'
                | '\u{180E}'
        )
}

fn sanitize(s: &str) -> String {
    normalize_unicode(s)
        .chars()
        .filter(|c| !is_dangerous_unicode(*c))
        .collect()
}

/// Escape an identifier for Cypher using backticks if needed.
///
/// The name is NFC-normalized and stripped of control, zero-width and
/// bidi characters first.
///
/// ```
/// # use pagegraph_neo4j::cypher::escape_identifier;
/// assert_eq!(escape_identifier("title"), "title");
/// assert_eq!(escape_identifier("og:title"), "`og:title`");
/// assert_eq!(escape_identifier("match"), "`match`");
/// ```
pub fn escape_identifier(s: &str) -> String {
    let sanitized = sanitize(s);

    if is_valid_identifier(&sanitized) && !is_cypher_keyword(&sanitized) {
        sanitized
    } else {
        backtick(&sanitized)
    }
}

/// Escape a label name for Cypher, including the leading `:`.
///
/// ```
/// # use pagegraph_neo4j::cypher::escape_label;
/// assert_eq!(escape_label("Component"), ":Component");
/// ```
pub fn escape_label(s: &str) -> String {
    format!(":{}", escape_identifier(s))
}

/// Escape a relationship type for Cypher, including the leading `:`.
///
/// ```
/// # use pagegraph_neo4j::cypher::escape_relationship_type;
/// assert_eq!(escape_relationship_type("COMPONENT"), ":COMPONENT");
/// ```
pub fn escape_relationship_type(s: &str) -> String {
    format!(":{}", escape_identifier(s))
}

/// Check if a string is a Cypher reserved keyword (case-insensitive).
pub fn is_cypher_keyword(s: &str) -> bool {
    matches!(
        s.to_uppercase().as_str(),
        "ALL"
            | "AND"
            | "ANY"
            | "AS"
            | "ASC"
            | "ASCENDING"
            | "BY"
            | "CALL"
            | "CASE"
            | "CONTAINS"
            | "COUNT"
            | "CREATE"
            | "DELETE"
            | "DESC"
            | "DESCENDING"
            | "DETACH"
            | "DISTINCT"
            | "DO"
            | "DROP"
            | "ELSE"
            | "END"
            | "ENDS"
            | "EXISTS"
            | "FALSE"
            | "FILTER"
            | "FOREACH"
            | "IN"
            | "IS"
            | "LIMIT"
            | "MANDATORY"
            | "MATCH"
            | "MERGE"
            | "NODE"
            | "NONE"
            | "NOT"
            | "NULL"
            | "OF"
            | "ON"
            | "OPTIONAL"
            | "OR"
            | "ORDER"
            | "REDUCE"
            | "RELATIONSHIP"
            | "REMOVE"
            | "RETURN"
            | "SET"
            | "SINGLE"
            | "SKIP"
            | "SOME"
            | "STARTS"
            | "THEN"
            | "TRUE"
            | "UNION"
            | "UNIQUE"
            | "UNWIND"
            | "USING"
            | "WHEN"
            | "WHERE"
            | "WITH"
            | "XOR"
            | "YIELD"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_string_clean_is_borrowed() {
        assert!(matches!(escape_string("/pages/home"), Cow::Borrowed(_)));
        assert!(matches!(escape_string(""), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_string_specials() {
        assert_eq!(escape_string("it's").as_ref(), "it\\'s");
        assert_eq!(escape_string(r#"{"_ref":"x"}"#).as_ref(), r#"{\"_ref\":\"x\"}"#);
        assert_eq!(escape_string(r"a\b").as_ref(), r"a\\b");
        assert_eq!(escape_string("a\nb\tc\r").as_ref(), r"a\nb\tc\r");
        assert_eq!(escape_string("a\x00b").as_ref(), r"a\u0000b");
    }

    #[test]
    fn test_string_literal_policies() {
        assert_eq!(string_literal("hi", StringEscaping::Escaped), "'hi'");
        assert_eq!(string_literal("hi", StringEscaping::Verbatim), "'hi'");
        assert_eq!(
            string_literal(r#"say "x""#, StringEscaping::Escaped),
            r#"'say \"x\"'"#
        );
        assert_eq!(
            string_literal(r#"say "x""#, StringEscaping::Verbatim),
            r#"'say "x"'"#
        );
    }

    #[test]
    fn test_property_key_policies() {
        assert_eq!(property_key("title", StringEscaping::Escaped).unwrap(), "title");
        assert_eq!(property_key("data-id", StringEscaping::Escaped).unwrap(), "`data-id`");
        assert_eq!(property_key("data-id", StringEscaping::Verbatim).unwrap(), "data-id");
        assert_eq!(property_key("match", StringEscaping::Escaped).unwrap(), "`match`");
        assert_eq!(property_key("a`b", StringEscaping::Escaped).unwrap(), "`a``b`");
    }

    #[test]
    fn test_property_key_keeps_invisible_characters() {
        assert_eq!(
            property_key("ti\u{200B}tle", StringEscaping::Escaped).unwrap(),
            "`ti\u{200B}tle`"
        );
        assert_eq!(
            property_key("cafe\u{301}", StringEscaping::Escaped).unwrap(),
            "`cafe\u{301}`"
        );
        assert_ne!(
            property_key("ti\u{200B}tle", StringEscaping::Escaped).unwrap(),
            property_key("title", StringEscaping::Escaped).unwrap()
        );
    }

    #[test]
    fn test_property_key_rejects_empty_name() {
        for escaping in [StringEscaping::Escaped, StringEscaping::Verbatim] {
            assert!(matches!(
                property_key("", escaping),
                Err(SyncError::InvalidIdentifier(ref name)) if name.is_empty()
            ));
        }
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("title"));
        assert!(is_valid_identifier("_ref"));
        assert!(is_valid_identifier("c12"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("12c"));
        assert!(!is_valid_identifier("og:title"));
    }

    #[test]
    fn test_escape_identifier_backticks() {
        assert_eq!(escape_identifier("a`b"), "`a``b`");
        assert_eq!(escape_identifier("with"), "`with`");
    }

    #[test]
    fn test_escape_identifier_strips_invisible() {
        assert_eq!(escape_identifier("ti\u{200B}tle"), "title");
        assert_eq!(escape_identifier("ti\u{202E}tle"), "title");
    }

    #[test]
    fn test_escape_label_and_type() {
        assert_eq!(escape_label("Page"), ":Page");
        assert_eq!(escape_label("My Label"), ":`My Label`");
        assert_eq!(escape_relationship_type("COMPONENT"), ":COMPONENT");
    }

    #[test]
    fn test_is_cypher_keyword() {
        assert!(is_cypher_keyword("merge"));
        assert!(is_cypher_keyword("Relationship"));
        assert!(!is_cypher_keyword("Component"));
    }

    #[test]
    fn test_validate_string_length_unlimited() {
        let config = SyncConfig::default().without_string_length_limit();
        assert!(validate_string_length(&"x".repeat(4096), "body", &config).is_ok());
    }

    #[test]
    fn test_validate_string_length_reports_property() {
        let config = SyncConfig::default().with_max_string_length(3);
        match validate_string_length("abcd", "body", &config) {
            Err(SyncError::StringLengthExceeded {
                length,
                max_length,
                property,
            }) => {
                assert_eq!(length, 4);
                assert_eq!(max_length, 3);
                assert_eq!(property, "body");
            }
            other => panic!("expected StringLengthExceeded, got {:?}", other),
        }
    }
}
