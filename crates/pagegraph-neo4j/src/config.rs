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

//! Configuration types for batch assembly.

use serde::{Deserialize, Serialize};

/// Default maximum string length for property values: 100 MB.
///
/// Component payloads routinely carry long-form text (article bodies,
/// embedded HTML), so the default is generous. Use
/// `SyncConfig::for_untrusted_input()` for a 1 MB limit.
pub const DEFAULT_MAX_STRING_LENGTH: usize = 100 * 1024 * 1024; // 100 MB

/// How string values are written into statement text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StringEscaping {
    /// Escape quotes, backslashes and control characters, and backtick-quote
    /// property names that are not plain identifiers.
    #[default]
    Escaped,
    /// Interpolate values and field names as-is, with no escaping.
    ///
    /// Only the text inside literals and keys matches older change-feed
    /// consumers; clause separators and padding are the same as under
    /// `Escaped`, so whole statements are not byte-identical to theirs. A
    /// value containing `'` breaks the statement (and can inject Cypher).
    Verbatim,
}

/// What to do with writes to `/lists/` refs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ListPolicy {
    /// Emit nothing for the op, log a warning and report the ref in
    /// `BatchResult::unsupported`.
    #[default]
    Skip,
    /// Fail the whole batch with `SyncError::UnsupportedList`.
    Reject,
}

/// How relationship-statement variables are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VariableNaming {
    /// Random 12-letter names (e.g. `qXhTbWmZaLcE`).
    #[default]
    Random,
    /// Counter-based names (`rel0`, `rel1`, ...), stable across runs.
    Sequential,
}

/// Configuration for turning change-op batches into Cypher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// String escaping policy (default: `Escaped`).
    pub escaping: StringEscaping,

    /// Handling of list refs (default: `Skip`).
    pub list_policy: ListPolicy,

    /// Relationship variable naming (default: `Random`).
    pub variable_naming: VariableNaming,

    /// Seed for `VariableNaming::Random` (default: None = OS entropy).
    ///
    /// With a seed, two runs over the same batch produce identical output.
    pub variable_seed: Option<u64>,

    /// Maximum string length for property values (default: 100MB, None = unlimited).
    pub max_string_length: Option<usize>,

    /// Maximum number of ops in one batch (default: None = unlimited).
    pub max_ops: Option<usize>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            escaping: StringEscaping::Escaped,
            list_policy: ListPolicy::Skip,
            variable_naming: VariableNaming::Random,
            variable_seed: None,
            max_string_length: Some(DEFAULT_MAX_STRING_LENGTH),
            max_ops: None,
        }
    }
}

/// Builder for SyncConfig.
///
/// # Examples
///
/// ```
/// # use pagegraph_neo4j::{ListPolicy, SyncConfig};
/// let config = SyncConfig::builder()
///     .list_policy(ListPolicy::Reject)
///     .max_ops(500)
///     .build();
/// ```
#[derive(Default)]
pub struct SyncConfigBuilder {
    escaping: Option<StringEscaping>,
    list_policy: Option<ListPolicy>,
    variable_naming: Option<VariableNaming>,
    variable_seed: Option<Option<u64>>,
    max_string_length: Option<Option<usize>>,
    max_ops: Option<Option<usize>>,
}

impl SyncConfigBuilder {
    /// Create a new builder with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the string escaping policy.
    pub fn escaping(mut self, escaping: StringEscaping) -> Self {
        self.escaping = Some(escaping);
        self
    }

    /// Set how list refs are handled.
    pub fn list_policy(mut self, policy: ListPolicy) -> Self {
        self.list_policy = Some(policy);
        self
    }

    /// Set how relationship variables are named.
    pub fn variable_naming(mut self, naming: VariableNaming) -> Self {
        self.variable_naming = Some(naming);
        self
    }

    /// Seed the random variable generator.
    pub fn variable_seed(mut self, seed: u64) -> Self {
        self.variable_seed = Some(Some(seed));
        self
    }

    /// Set maximum string length for property values.
    pub fn max_string_length(mut self, max: usize) -> Self {
        self.max_string_length = Some(Some(max));
        self
    }

    /// Remove string length limit (use with caution).
    pub fn no_string_length_limit(mut self) -> Self {
        self.max_string_length = Some(None);
        self
    }

    /// Set maximum number of ops per batch.
    pub fn max_ops(mut self, max: usize) -> Self {
        self.max_ops = Some(Some(max));
        self
    }

    /// Build the SyncConfig instance.
    ///
    /// All unset fields will use their default values.
    pub fn build(self) -> SyncConfig {
        let defaults = SyncConfig::default();
        SyncConfig {
            escaping: self.escaping.unwrap_or(defaults.escaping),
            list_policy: self.list_policy.unwrap_or(defaults.list_policy),
            variable_naming: self.variable_naming.unwrap_or(defaults.variable_naming),
            variable_seed: self.variable_seed.unwrap_or(defaults.variable_seed),
            max_string_length: self.max_string_length.unwrap_or(defaults.max_string_length),
            max_ops: self.max_ops.unwrap_or(defaults.max_ops),
        }
    }
}

impl SyncConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for SyncConfig.
    pub fn builder() -> SyncConfigBuilder {
        SyncConfigBuilder::default()
    }

    /// Interpolate strings without escaping.
    pub fn with_verbatim_strings(mut self) -> Self {
        self.escaping = StringEscaping::Verbatim;
        self
    }

    /// Fail the batch on list refs instead of skipping them.
    pub fn with_list_rejection(mut self) -> Self {
        self.list_policy = ListPolicy::Reject;
        self
    }

    /// Use counter-based relationship variables.
    pub fn with_sequential_variables(mut self) -> Self {
        self.variable_naming = VariableNaming::Sequential;
        self
    }

    /// Seed the random variable generator.
    pub fn with_variable_seed(mut self, seed: u64) -> Self {
        self.variable_seed = Some(seed);
        self
    }

    /// Set maximum string length for property values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pagegraph_neo4j::SyncConfig;
    /// let config = SyncConfig::new().with_max_string_length(50 * 1024 * 1024);
    /// assert_eq!(config.max_string_length, Some(50 * 1024 * 1024));
    /// ```
    pub fn with_max_string_length(mut self, max: usize) -> Self {
        self.max_string_length = Some(max);
        self
    }

    /// Remove string length limit (use with caution).
    pub fn without_string_length_limit(mut self) -> Self {
        self.max_string_length = None;
        self
    }

    /// Set maximum number of ops per batch.
    pub fn with_max_ops(mut self, max: usize) -> Self {
        self.max_ops = Some(max);
        self
    }

    /// Create a configuration suitable for untrusted input.
    ///
    /// - 1MB max string length (vs 100MB default)
    /// - 10K max ops per batch
    /// - Escaped strings
    /// - List refs rejected rather than skipped
    pub fn for_untrusted_input() -> Self {
        Self {
            escaping: StringEscaping::Escaped,
            list_policy: ListPolicy::Reject,
            max_string_length: Some(1_000_000),
            max_ops: Some(10_000),
            ..Default::default()
        }
    }
}
