/*
 * ==========================================================================
 * QUILL - Small Scripts, Sharp Syntax
 * ==========================================================================
 *
 * File:     config.rs
 * Purpose:  Parser configuration.
 *
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the QUILL scripting language project.
 *
 * QUILL is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Which node `a / b` becomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivisionMode {
    /// `/` builds `BinaryOp::Div`.
    #[default]
    Distinct,

    /// `/` builds `BinaryOp::Sub`, matching the first QUILL grammar where
    /// the division rule carried the subtraction tag. Only useful for
    /// evaluators that still expect those trees.
    LegacySubtraction,
}

/// Knobs for a single parse.
///
/// Deserializable from JSON; missing fields take their defaults:
/// ```json
/// { "division": "legacy_subtraction", "max_depth": 64 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub division: DivisionMode,

    /// Deepest allowed nesting of blocks and expressions.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            division: DivisionMode::Distinct,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn with_division(mut self, division: DivisionMode) -> Self {
        self.division = division;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config = ParserConfig::from_json(r#"{ "max_depth": 8 }"#).unwrap();
        assert_eq!(config.division, DivisionMode::Distinct);
        assert_eq!(config.max_depth, 8);

        let config = ParserConfig::from_json("{}").unwrap();
        assert_eq!(config, ParserConfig::default());
    }

    #[test]
    fn reads_legacy_division() {
        let config = ParserConfig::from_json(r#"{ "division": "legacy_subtraction" }"#).unwrap();
        assert_eq!(config.division, DivisionMode::LegacySubtraction);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn rejects_unknown_division_mode() {
        assert!(ParserConfig::from_json(r#"{ "division": "floor" }"#).is_err());
    }
}
