/*
 * ==========================================================================
 * QUILL - Small Scripts, Sharp Syntax
 * ==========================================================================
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

use crate::span::Span;
use serde::Serialize;
use std::fmt;

/// Why the lexer gave up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum LexErrorReason {
    UnexpectedChar(char),
    UnterminatedString,
    UnterminatedComment,
    InvalidEscape(char),
    InvalidNumber(String),
}

impl fmt::Display for LexErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorReason::UnexpectedChar(ch) => write!(f, "unexpected character {:?}", ch),
            LexErrorReason::UnterminatedString => write!(f, "unterminated string literal"),
            LexErrorReason::UnterminatedComment => write!(f, "unterminated block comment"),
            LexErrorReason::InvalidEscape(ch) => write!(f, "invalid escape sequence `\\{}`", ch),
            LexErrorReason::InvalidNumber(text) => write!(f, "invalid number literal `{}`", text),
        }
    }
}

/// A malformed character sequence.
///
/// `span` points at the start of the offending construct: the bad character,
/// the opening quote of an unterminated string, or the `(#` of an
/// unterminated comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexError {
    pub span: Span,
    pub reason: LexErrorReason,
}

impl LexError {
    pub fn new(span: Span, reason: LexErrorReason) -> Self {
        Self { span, reason }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.reason, self.span)
    }
}

impl std::error::Error for LexError {}

/// A token sequence that matches no grammar alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    /// Position of the offending token.
    pub span: Span,

    /// Every alternative that would have been accepted here, already
    /// formatted for display (`` `;` ``, `identifier`, `expression`, ...).
    pub expected: Vec<String>,

    /// Description of the token actually found.
    pub found: String,
}

impl ParseError {
    pub fn new(span: Span, expected: Vec<String>, found: impl Into<String>) -> Self {
        Self {
            span,
            expected,
            found: found.into(),
        }
    }

    /// `true` when the parser ran out of tokens.
    pub fn at_end_of_input(&self) -> bool {
        self.found == "end of input"
    }

    fn expected_list(&self) -> String {
        match self.expected.as_slice() {
            [] => "something else".to_string(),
            [one] => one.clone(),
            [init @ .., last] => format!("one of {} or {}", init.join(", "), last),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected {}, found {} at {}",
            self.expected_list(),
            self.found,
            self.span
        )
    }
}

impl std::error::Error for ParseError {}

/// Every way converting text to a syntax tree can fail.
///
/// All variants are terminal: no partial tree is ever produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum SyntaxError {
    Lex(LexError),
    Parse(ParseError),
    NestingTooDeep { span: Span, limit: usize },
}

impl SyntaxError {
    /// Stable error code shown in diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            SyntaxError::Lex(_) => "E_LEX",
            SyntaxError::Parse(_) => "E_PARSE",
            SyntaxError::NestingTooDeep { .. } => "E_NESTING",
        }
    }

    pub fn span(&self) -> Span {
        match self {
            SyntaxError::Lex(e) => e.span,
            SyntaxError::Parse(e) => e.span,
            SyntaxError::NestingTooDeep { span, .. } => *span,
        }
    }

    /// Human-readable message without location.
    pub fn message(&self) -> String {
        match self {
            SyntaxError::Lex(e) => e.reason.to_string(),
            SyntaxError::Parse(e) => format!("expected {}, found {}", e.expected_list(), e.found),
            SyntaxError::NestingTooDeep { limit, .. } => {
                format!("nesting exceeds the limit of {} levels", limit)
            }
        }
    }

    /// Optional follow-up hint for the more surprising corners of the grammar.
    pub fn help(&self) -> Option<String> {
        match self {
            SyntaxError::Lex(LexError {
                reason: LexErrorReason::UnterminatedString,
                ..
            }) => Some("string literals must close on the line they open".to_string()),
            SyntaxError::Lex(LexError {
                reason: LexErrorReason::UnterminatedComment,
                ..
            }) => Some("every `(#` needs its own matching `#)`".to_string()),
            SyntaxError::Lex(LexError {
                reason: LexErrorReason::UnexpectedChar(','),
                ..
            }) => Some("call arguments are separated by whitespace: `f(a b)`".to_string()),
            SyntaxError::Lex(LexError {
                reason: LexErrorReason::UnexpectedChar('='),
                ..
            }) => Some("assign with `global name value` or `local name value`".to_string()),
            SyntaxError::Parse(e) if e.at_end_of_input() => {
                Some("the program must be a single `{ ... }` block".to_string())
            }
            SyntaxError::Parse(e) if e.expected.iter().any(|x| x == "`;`") => {
                Some("statements end with `;`, including `if` and `while` blocks".to_string())
            }
            SyntaxError::NestingTooDeep { .. } => {
                Some("raise `max_depth` in the parser configuration".to_string())
            }
            _ => None,
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::Lex(e) => write!(f, "{}", e),
            SyntaxError::Parse(e) => write!(f, "{}", e),
            SyntaxError::NestingTooDeep { span, .. } => write!(f, "{} at {}", self.message(), span),
        }
    }
}

impl std::error::Error for SyntaxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyntaxError::Lex(e) => Some(e),
            SyntaxError::Parse(e) => Some(e),
            SyntaxError::NestingTooDeep { .. } => None,
        }
    }
}

impl From<LexError> for SyntaxError {
    fn from(e: LexError) -> Self {
        SyntaxError::Lex(e)
    }
}

impl From<ParseError> for SyntaxError {
    fn from(e: ParseError) -> Self {
        SyntaxError::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_lists_alternatives() {
        let err = ParseError::new(
            Span::new(10, 2, 3),
            vec!["`;`".into(), "`+`".into(), "`-`".into()],
            "`}`",
        );
        assert_eq!(err.to_string(), "expected one of `;`, `+` or `-`, found `}` at 2:3");
    }

    #[test]
    fn codes_and_spans_follow_the_stage() {
        let lex: SyntaxError =
            LexError::new(Span::new(6, 1, 7), LexErrorReason::UnterminatedString).into();
        assert_eq!(lex.code(), "E_LEX");
        assert_eq!(lex.span(), Span::new(6, 1, 7));
        assert!(lex.help().is_some());

        let parse: SyntaxError =
            ParseError::new(Span::new(9, 1, 10), vec!["`}`".into()], "end of input").into();
        assert_eq!(parse.code(), "E_PARSE");
        assert_eq!(parse.message(), "expected `}`, found end of input");
    }

    #[test]
    fn nesting_error_has_no_source() {
        use std::error::Error;

        let err = SyntaxError::NestingTooDeep {
            span: Span::start(),
            limit: 4,
        };
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "nesting exceeds the limit of 4 levels at 1:1");
    }
}
