/*
 * ==========================================================================
 * QUILL - Small Scripts, Sharp Syntax
 * ==========================================================================
 *
 * File:     parser/mod.rs
 * Purpose:  Root module for the QUILL recursive-descent parser.
 *
 * This module wires together all parser sub-modules, including:
 *   - Core parser control logic
 *   - Statement parsing
 *   - Expression parsing
 *   - Shared helper utilities
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

/// Core parser orchestration:
/// - Owns the `Parser` struct
/// - Exposes the `parse(tokens)` entry points
pub mod parser;

/// Block and statement parsing:
/// - global / local / fn / return
/// - if / elif / else, while, print
/// - expression statements
pub mod statements;

/// Expression-level parsing:
/// - comparison → additive → term → factor → primary
/// - calls with adjacent arguments
pub mod expressions;

/// Shared parser helpers:
/// - token matching and consumption
/// - nesting limit
/// - error construction
pub mod helpers;

/// Re-export the public entry points so callers can use
/// `crate::parser::parse(...)`.
pub use parser::{parse, parse_tokens, parse_with_config, Parser};
