/*
 * ==========================================================================
 * QUILL - Small Scripts, Sharp Syntax
 * ==========================================================================
 *
 * File:     lexer/mod.rs
 * Purpose:  Root module for the QUILL lexer.
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

/// The scanning state machine and the `tokenize` entry points.
pub mod lexer;

/// Token, operator and punctuation types.
pub mod token;

/// Reserved word table consulted by the parser.
pub mod keywords;

pub use lexer::{tokenize, tokenize_all, Lexer};
pub use token::{Operator, Punctuation, Token, TokenKind};
