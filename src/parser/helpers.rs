/*
 * ==========================================================================
 * QUILL - Small Scripts, Sharp Syntax
 * ==========================================================================
 *
 * File:     parser/helpers.rs
 * Purpose:  Token matching, consumption and error helpers shared by the
 *           statement and expression grammars.
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

use std::mem;

use crate::error::{LexError, ParseError, SyntaxError};
use crate::lexer::keywords::{self, is_keyword};
use crate::lexer::token::{Operator, Punctuation, Token, TokenKind};
use crate::parser::parser::Parser;

/// Wraps a token text in backticks for "expected ..." lists.
pub(crate) fn quoted(text: &str) -> String {
    format!("`{}`", text)
}

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    /// Consumes the lookahead token and returns it.
    ///
    /// Once `End` is reached it is returned again on every call; the
    /// underlying iterator is not touched past that point.
    pub(crate) fn advance(&mut self) -> Result<Token, SyntaxError> {
        if self.current.is_end() {
            return Ok(self.current.clone());
        }

        let fallback = self.current.end_span();
        let next = Self::pull(&mut self.tokens, fallback)?;
        Ok(mem::replace(&mut self.current, next))
    }

    /// Checks whether the lookahead token is the given operator.
    ///
    /// # Parameters
    /// - `op`: The operator to test for (e.g. `Operator::Plus`)
    ///
    /// # Returns
    /// - `true` if the lookahead is that operator
    /// - `false` otherwise, including at end of input
    ///
    /// The token is never consumed.
    pub(crate) fn check_operator(&self, op: Operator) -> bool {
        self.current.is_operator(op)
    }

    /// Matches an operator and consumes it if present.
    pub(crate) fn match_operator(&mut self, op: Operator) -> Result<bool, SyntaxError> {
        if self.check_operator(op) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Checks whether the lookahead token is the given punctuation mark.
    ///
    /// # Parameters
    /// - `p`: The punctuation to test for (`{`, `}`, `(`, `)` or `;`)
    ///
    /// # Returns
    /// - `true` if the lookahead is that mark
    /// - `false` otherwise
    pub(crate) fn check_punctuation(&self, p: Punctuation) -> bool {
        self.current.is_punctuation(p)
    }

    /// Consumes a required punctuation token.
    ///
    /// `also` lists further alternatives that were acceptable at this point
    /// and is only used to build the error.
    pub(crate) fn consume_punctuation(
        &mut self,
        p: Punctuation,
        also: &[&str],
    ) -> Result<Token, SyntaxError> {
        if self.check_punctuation(p) {
            return self.advance();
        }

        let mut expected = vec![quoted(p.as_str())];
        expected.extend(also.iter().map(|s| s.to_string()));
        Err(self.error(expected))
    }

    /// Checks for a reserved word without consuming it.
    pub(crate) fn check_keyword(&self, kw: &str) -> bool {
        self.current.is_word(kw)
    }

    /// Matches a reserved word and consumes it if present.
    pub(crate) fn match_keyword(&mut self, kw: &str) -> Result<bool, SyntaxError> {
        if self.check_keyword(kw) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consumes and returns a name. Reserved words are never names.
    ///
    /// `what` describes the name for the error ("variable name", ...).
    pub(crate) fn consume_name(&mut self, what: &str) -> Result<String, SyntaxError> {
        match &self.current.kind {
            TokenKind::Word(w) if !is_keyword(w) => {
                let name = w.clone();
                self.advance()?;
                Ok(name)
            }
            _ => Err(self.error(vec![what.to_string()])),
        }
    }

    /// `true` if the lookahead token can begin an expression.
    pub(crate) fn starts_expression(&self) -> bool {
        match &self.current.kind {
            TokenKind::Number(_) | TokenKind::String(_) => true,
            TokenKind::Word(w) => {
                !is_keyword(w) || matches!(w.as_str(), keywords::TRUE | keywords::FALSE | keywords::NONE)
            }
            TokenKind::Operator(op) => {
                matches!(op, Operator::Plus | Operator::Minus | Operator::Bang)
            }
            TokenKind::Punctuation(p) => *p == Punctuation::LeftParen,
            TokenKind::End => false,
        }
    }

    /// `true` if the lookahead token can begin a statement.
    pub(crate) fn starts_statement(&self) -> bool {
        self.starts_expression()
            || matches!(
                self.current.word(),
                Some(
                    keywords::GLOBAL
                        | keywords::LOCAL
                        | keywords::FN
                        | keywords::RETURN
                        | keywords::IF
                        | keywords::WHILE
                        | keywords::PRINT
                )
            )
    }

    /// Runs `f` one nesting level deeper, failing once the configured
    /// limit is reached.
    pub(crate) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<T, SyntaxError> {
        if self.depth >= self.config.max_depth {
            return Err(SyntaxError::NestingTooDeep {
                span: self.current.span,
                limit: self.config.max_depth,
            });
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Builds a parse error at the lookahead token.
    pub(crate) fn error(&self, expected: Vec<String>) -> SyntaxError {
        SyntaxError::Parse(ParseError::new(
            self.current.span,
            expected,
            self.current.describe(),
        ))
    }
}
