/*
 * ==========================================================================
 * QUILL - Small Scripts, Sharp Syntax
 * ==========================================================================
 *
 * File:     lib.rs
 * Purpose:  Crate root of the QUILL front end.
 *
 * QUILL source text goes through two stages:
 *
 * ```text
 * Source → Lexer → Tokens → Parser → Block → Evaluator
 * ```
 *
 * This crate owns everything up to the `Block`. Evaluation lives
 * elsewhere and consumes the tree, either in process or as JSON.
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

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;

pub use ast::{BinaryOp, Block, Branch, Expr, Stmt, UnaryOp};
pub use config::{DivisionMode, ParserConfig};
pub use diagnostics::DiagnosticPrinter;
pub use error::{LexError, LexErrorReason, ParseError, SyntaxError};
pub use span::Span;

/// Lexes and parses `source` with the default configuration.
///
/// ```rust
/// let program = quill::parse_source("{ print 1 + 2 * 3; }").unwrap();
/// assert_eq!(program.len(), 1);
/// ```
pub fn parse_source(source: &str) -> Result<Block, SyntaxError> {
    parse_source_with_config(source, &ParserConfig::default())
}

pub fn parse_source_with_config(source: &str, config: &ParserConfig) -> Result<Block, SyntaxError> {
    parser::parse_with_config(lexer::tokenize(source), config)
}
