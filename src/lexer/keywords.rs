/*
 * ==========================================================================
 * QUILL - Small Scripts, Sharp Syntax
 * ==========================================================================
 *
 * File:     keywords.rs
 * Purpose:  The QUILL reserved word table.
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

pub const GLOBAL: &str = "global";
pub const LOCAL: &str = "local";
pub const FN: &str = "fn";
pub const RETURN: &str = "return";
pub const IF: &str = "if";
pub const ELIF: &str = "elif";
pub const ELSE: &str = "else";
pub const WHILE: &str = "while";
pub const PRINT: &str = "print";
pub const TRUE: &str = "True";
pub const FALSE: &str = "False";
pub const NONE: &str = "None";

/// Determines whether a word is **reserved** in QUILL.
///
/// The lexer never calls this: every word leaves the lexer as
/// `TokenKind::Word`. The parser consults the table to dispatch keyword
/// statements and to refuse reserved words wherever a name is expected,
/// so `print`, `if` or `True` can never name a variable, function or
/// parameter.
///
/// Matching is case-sensitive: `true` and `none` are ordinary identifiers.
pub fn is_keyword(word: &str) -> bool {
    matches!(
        word,
        GLOBAL
            | LOCAL
            | FN
            | RETURN
            | IF
            | ELIF
            | ELSE
            | WHILE
            | PRINT
            | TRUE
            | FALSE
            | NONE
    )
}
