/*
 * ==========================================================================
 * QUILL - Small Scripts, Sharp Syntax
 * ==========================================================================
 *
 * File:     parser/expressions.rs
 *
 * --------------------------------------------------------------------------
 *  MODULE OVERVIEW
 * --------------------------------------------------------------------------
 * This module contains the **entire QUILL expression grammar**:
 *
 *   expr   : term ( "==" | "<" | ">" | "<=" | ">=" | "!=" ) expr
 *          | "!" expr
 *          | expr ( "+" | "-" ) term
 *          | term
 *   term   : term ( "*" | "/" ) factor
 *          | factor
 *   factor : "+" factor | "-" factor
 *          | NUMBER | STRING | "True" | "False" | "None"
 *          | WORD "(" expr* ")" | WORD
 *          | "(" expr ")"
 *
 * The grammar is ambiguous as written. Every conflict resolves toward
 * consuming more input (shift over reduce), which gives:
 *
 *  - comparisons are right-associative: `a == b == c` is `a == (b == c)`
 *  - the left side of a comparison is a single term, so `a + b == c`
 *    does not parse
 *  - `!` negates the whole expression to its right
 *  - a word followed by `(` is always a call
 *  - call arguments extend greedily: `f(1 -2)` has one argument, `1 - 2`
 *
 * --------------------------------------------------------------------------
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

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::config::DivisionMode;
use crate::error::{LexError, SyntaxError};
use crate::lexer::keywords::{self, is_keyword};
use crate::lexer::token::{Operator, Punctuation, Token, TokenKind};
use crate::parser::helpers::quoted;
use crate::parser::parser::Parser;

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    /// expression → comparison
    pub fn expression(&mut self) -> Result<Expr, SyntaxError> {
        self.nested(|p| p.comparison())
    }

    /// comparison → "!" expression
    ///            | term ( compare_op expression | ( ( "+" | "-" ) term )* )
    fn comparison(&mut self) -> Result<Expr, SyntaxError> {
        if self.match_operator(Operator::Bang)? {
            let operand = self.expression()?;
            return Ok(Expr::unary(UnaryOp::Neg, operand));
        }

        let left = self.term()?;

        if let Some(op) = self.comparison_operator() {
            self.advance()?;
            let right = self.expression()?;
            return Ok(Expr::binary(op, left, right));
        }

        self.additive(left)
    }

    fn comparison_operator(&self) -> Option<BinaryOp> {
        match self.current.kind {
            TokenKind::Operator(Operator::EqualEqual) => Some(BinaryOp::Eq),
            TokenKind::Operator(Operator::Less) => Some(BinaryOp::Lt),
            TokenKind::Operator(Operator::Greater) => Some(BinaryOp::Gt),
            TokenKind::Operator(Operator::LessEqual) => Some(BinaryOp::Le),
            TokenKind::Operator(Operator::GreaterEqual) => Some(BinaryOp::Ge),
            TokenKind::Operator(Operator::BangEqual) => Some(BinaryOp::Ne),
            _ => None,
        }
    }

    /// Left-associative chain of `+` / `-` over terms, starting from an
    /// already parsed first term.
    fn additive(&mut self, mut left: Expr) -> Result<Expr, SyntaxError> {
        loop {
            let op = if self.check_operator(Operator::Plus) {
                BinaryOp::Add
            } else if self.check_operator(Operator::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };

            self.advance()?;
            let right = self.term()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    /// term → factor ( ( "*" | "/" ) factor )*
    fn term(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.factor()?;

        loop {
            let op = if self.check_operator(Operator::Star) {
                BinaryOp::Mul
            } else if self.check_operator(Operator::Slash) {
                match self.config.division {
                    DivisionMode::Distinct => BinaryOp::Div,
                    DivisionMode::LegacySubtraction => BinaryOp::Sub,
                }
            } else {
                break;
            };

            self.advance()?;
            let right = self.factor()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    /// factor → ( "+" | "-" ) factor | call | primary
    fn factor(&mut self) -> Result<Expr, SyntaxError> {
        // unary plus is a no-op
        if self.match_operator(Operator::Plus)? {
            return self.nested(|p| p.factor());
        }

        if self.match_operator(Operator::Minus)? {
            let operand = self.nested(|p| p.factor())?;
            return Ok(Expr::unary(UnaryOp::Negate, operand));
        }

        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, SyntaxError> {
        let expr = match &self.current.kind {
            TokenKind::Number(value) => Expr::number(*value),

            TokenKind::String(value) => Expr::string(value.clone()),

            TokenKind::Word(word) => match word.as_str() {
                keywords::TRUE => Expr::boolean(true),
                keywords::FALSE => Expr::boolean(false),
                keywords::NONE => Expr::NoneLiteral,
                w if is_keyword(w) => return Err(self.error(vec!["expression".to_string()])),
                _ => {
                    let name = word.clone();
                    self.advance()?;

                    if self.check_punctuation(Punctuation::LeftParen) {
                        return self.call(name);
                    }

                    return Ok(Expr::var(name));
                }
            },

            TokenKind::Punctuation(Punctuation::LeftParen) => {
                self.advance()?;
                let inner = self.expression()?;
                self.consume_punctuation(Punctuation::RightParen, &[])?;
                return Ok(inner);
            }

            _ => return Err(self.error(vec!["expression".to_string()])),
        };

        self.advance()?;
        Ok(expr)
    }

    /// call → WORD "(" expression* ")"
    ///
    /// Arguments are adjacent expressions; there is no separator token.
    fn call(&mut self, callee: String) -> Result<Expr, SyntaxError> {
        self.advance()?; // (

        let mut args = Vec::new();

        while !self.check_punctuation(Punctuation::RightParen) {
            if !self.starts_expression() {
                return Err(self.error(vec![quoted(")"), "expression".to_string()]));
            }

            args.push(self.expression()?);
        }

        self.advance()?; // )

        Ok(Expr::call(callee, args))
    }
}
