/*
 * ==========================================================================
 * QUILL - Small Scripts, Sharp Syntax
 * ==========================================================================
 *
 * File:      token.rs
 * Purpose:   Defines the lexical token types produced by the QUILL lexer
 *            and consumed by the parser.
 *
 * Author:    Sam Wilcox
 *
 * License:
 * This file is part of the QUILL scripting language project.
 *
 * QUILL is dual-licensed under the terms of:
 *   - The MIT License
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

use crate::lexer::keywords::is_keyword;
use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operator symbols recognised by the lexer.
///
/// Two-character operators always win over their one-character prefix,
/// so `<=` never lexes as `<` followed by something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    EqualEqual,
    BangEqual,
    LessEqual,
    GreaterEqual,
    Less,
    Greater,
    Bang,
    Plus,
    Minus,
    Star,
    Slash,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::EqualEqual => "==",
            Operator::BangEqual => "!=",
            Operator::LessEqual => "<=",
            Operator::GreaterEqual => ">=",
            Operator::Less => "<",
            Operator::Greater => ">",
            Operator::Bang => "!",
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Star => "*",
            Operator::Slash => "/",
        }
    }
}

/// Structural punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Punctuation {
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Semicolon,
}

impl Punctuation {
    pub fn as_str(self) -> &'static str {
        match self {
            Punctuation::LeftParen => "(",
            Punctuation::RightParen => ")",
            Punctuation::LeftBrace => "{",
            Punctuation::RightBrace => "}",
            Punctuation::Semicolon => ";",
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '(' => Some(Punctuation::LeftParen),
            ')' => Some(Punctuation::RightParen),
            '{' => Some(Punctuation::LeftBrace),
            '}' => Some(Punctuation::RightBrace),
            ';' => Some(Punctuation::Semicolon),
            _ => None,
        }
    }
}

/// The **category of a lexical token**, together with its decoded payload.
///
/// ```text
/// Source Code → Lexer → TokenKind → Parser → AST
/// ```
///
/// Words are deliberately *not* split into keywords and identifiers here.
/// Whether `print` is a statement keyword or a (rejected) identifier is a
/// decision the parser makes from position; see [`Token::is_keyword`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TokenKind {
    /// A numeric literal: `42`, `3.14`, `.5`, `1e-3`.
    Number(f64),

    /// A double-quoted string literal, escapes already decoded.
    String(String),

    /// A bare word: an identifier or a reserved word.
    Word(String),

    Operator(Operator),

    Punctuation(Punctuation),

    /// End-of-input marker, always the final token.
    End,
}

/// A **single lexical token** produced by the QUILL lexer.
///
/// # Example Tokens
/// ```text
/// print   →  { kind: Word("print"),  lexeme: "print",   span: 1:3 }
/// "a\n"   →  { kind: String("a⏎"),   lexeme: "\"a\\n\"", span: 1:9 }
/// 42      →  { kind: Number(42.0),   lexeme: "42",      span: 1:15 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The classified category (and decoded payload) of the token.
    #[serde(flatten)]
    pub kind: TokenKind,

    /// The exact source text that produced this token.
    ///
    /// Concatenating the lexemes of a token stream (separated by a space)
    /// yields source text that lexes back to the same stream.
    pub lexeme: String,

    /// Position of the token's first character.
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::End
    }

    /// Span one past the last character of this token.
    ///
    /// Lexemes never contain a newline, so the column simply advances by
    /// the lexeme's character count.
    pub fn end_span(&self) -> Span {
        Span::new(
            self.span.offset + self.lexeme.len(),
            self.span.line,
            self.span.column + self.lexeme.chars().count(),
        )
    }

    pub fn is_operator(&self, op: Operator) -> bool {
        self.kind == TokenKind::Operator(op)
    }

    pub fn is_punctuation(&self, p: Punctuation) -> bool {
        self.kind == TokenKind::Punctuation(p)
    }

    /// Returns the word text if this token is a `Word`.
    pub fn word(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Word(w) => Some(w),
            _ => None,
        }
    }

    pub fn is_word(&self, text: &str) -> bool {
        self.word() == Some(text)
    }

    /// `true` when this token is a word from the reserved word table.
    pub fn is_keyword(&self) -> bool {
        self.word().is_some_and(is_keyword)
    }

    /// A short, user-facing description used in "found ..." error text.
    pub fn describe(&self) -> String {
        match &self.kind {
            TokenKind::Number(_) => format!("number `{}`", self.lexeme),
            TokenKind::String(_) => format!("string {}", self.lexeme),
            TokenKind::Word(w) if is_keyword(w) => format!("keyword `{}`", w),
            TokenKind::Word(w) => format!("identifier `{}`", w),
            TokenKind::Operator(op) => format!("`{}`", op.as_str()),
            TokenKind::Punctuation(p) => format!("`{}`", p.as_str()),
            TokenKind::End => "end of input".to_string(),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(_) => write!(f, "NUMBER"),
            TokenKind::String(_) => write!(f, "STRING"),
            TokenKind::Word(_) => write!(f, "WORD"),
            TokenKind::Operator(_) => write!(f, "OPERATOR"),
            TokenKind::Punctuation(_) => write!(f, "PUNCTUATION"),
            TokenKind::End => write!(f, "END"),
        }
    }
}

impl fmt::Display for Token {
    /// Prints only the lexeme, which is what users wrote.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_a_classification_of_words() {
        let kw = Token::new(TokenKind::Word("while".into()), "while", Span::start());
        let ident = Token::new(TokenKind::Word("whilst".into()), "whilst", Span::start());

        assert!(kw.is_keyword());
        assert!(!ident.is_keyword());
        assert_eq!(kw.describe(), "keyword `while`");
        assert_eq!(ident.describe(), "identifier `whilst`");
    }

    #[test]
    fn display_prints_the_lexeme() {
        let tok = Token::new(
            TokenKind::Operator(Operator::LessEqual),
            "<=",
            Span::new(4, 1, 5),
        );
        assert_eq!(tok.to_string(), "<=");
        assert_eq!(tok.kind.to_string(), "OPERATOR");
    }

    #[test]
    fn serializes_with_kind_tag() {
        let tok = Token::new(TokenKind::Number(2.5), "2.5", Span::new(0, 1, 1));
        let json = serde_json::to_value(&tok).unwrap();

        assert_eq!(json["kind"], "number");
        assert_eq!(json["value"], 2.5);
        assert_eq!(json["lexeme"], "2.5");
        assert_eq!(json["span"]["line"], 1);
    }
}
