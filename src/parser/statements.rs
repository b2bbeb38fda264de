/*
 * ==========================================================================
 * QUILL - Small Scripts, Sharp Syntax
 * ==========================================================================
 *
 * File:     parser/statements.rs
 * Purpose:  Block and statement grammar.
 *
 *   block : "{" ( stmt ";" )* "}"
 *   stmt  : "global" WORD expr
 *         | "local" WORD expr
 *         | "fn" WORD "(" WORD* ")" block
 *         | "return" expr
 *         | "if" expr block ( "elif" expr block )* ( "else" block )?
 *         | "while" expr block
 *         | "print" expr
 *         | expr
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

use crate::ast::{Block, Branch, Stmt};
use crate::error::{LexError, SyntaxError};
use crate::lexer::keywords;
use crate::lexer::token::{Punctuation, Token, TokenKind};
use crate::parser::helpers::quoted;
use crate::parser::parser::Parser;

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    /// Parses `{ stmt; stmt; ... }`.
    ///
    /// Every statement, including `if` and `while`, is terminated by `;`.
    pub fn block(&mut self) -> Result<Block, SyntaxError> {
        self.nested(|p| {
            p.consume_punctuation(Punctuation::LeftBrace, &[])?;

            let mut statements = Vec::new();

            while !p.check_punctuation(Punctuation::RightBrace) {
                if !p.starts_statement() {
                    return Err(p.error(vec![quoted("}"), "statement".to_string()]));
                }

                statements.push(p.statement()?);
                p.consume_punctuation(Punctuation::Semicolon, &[])?;
            }

            p.advance()?; // }

            Ok(Block::new(statements))
        })
    }

    /// Parses a single statement.
    ///
    /// A leading reserved word selects the keyword form; anything else is
    /// an expression statement.
    pub fn statement(&mut self) -> Result<Stmt, SyntaxError> {
        let keyword = match &self.current.kind {
            TokenKind::Word(w) => w.clone(),
            _ => return self.expression_statement(),
        };

        match keyword.as_str() {
            keywords::GLOBAL => {
                self.advance()?;
                let name = self.consume_name("variable name")?;
                let value = self.expression()?;
                Ok(Stmt::AssignGlobal { name, value })
            }

            keywords::LOCAL => {
                self.advance()?;
                let name = self.consume_name("variable name")?;
                let value = self.expression()?;
                Ok(Stmt::AssignLocal { name, value })
            }

            keywords::FN => self.function_declaration(),

            keywords::RETURN => {
                self.advance()?;
                let value = self.expression()?;
                Ok(Stmt::Return { value })
            }

            keywords::IF => self.conditional(),

            keywords::WHILE => {
                self.advance()?;
                let condition = self.expression()?;
                let body = self.block()?;
                Ok(Stmt::While { condition, body })
            }

            keywords::PRINT => {
                self.advance()?;
                let value = self.expression()?;
                Ok(Stmt::Print { value })
            }

            _ => self.expression_statement(),
        }
    }

    /// `fn name(a b c) { ... }`: parameters are bare words with no
    /// separator.
    fn function_declaration(&mut self) -> Result<Stmt, SyntaxError> {
        self.advance()?; // fn

        let name = self.consume_name("function name")?;
        self.consume_punctuation(Punctuation::LeftParen, &[])?;

        let mut params = Vec::new();

        while !self.check_punctuation(Punctuation::RightParen) {
            match self.current.kind {
                TokenKind::Word(_) if !self.current.is_keyword() => {
                    params.push(self.consume_name("parameter name")?);
                }
                _ => {
                    return Err(self.error(vec!["parameter name".to_string(), quoted(")")]));
                }
            }
        }

        self.advance()?; // )

        let body = self.block()?;

        Ok(Stmt::DeclareFunction { name, params, body })
    }

    /// `if c { } elif c { } else { }` as one statement.
    fn conditional(&mut self) -> Result<Stmt, SyntaxError> {
        self.advance()?; // if

        let mut branches = vec![self.branch()?];

        while self.match_keyword(keywords::ELIF)? {
            branches.push(self.branch()?);
        }

        let otherwise = if self.match_keyword(keywords::ELSE)? {
            Some(self.block()?)
        } else {
            None
        };

        Ok(Stmt::Conditional { branches, otherwise })
    }

    fn branch(&mut self) -> Result<Branch, SyntaxError> {
        let condition = self.expression()?;
        let body = self.block()?;
        Ok(Branch { condition, body })
    }

    fn expression_statement(&mut self) -> Result<Stmt, SyntaxError> {
        let expr = self.expression()?;
        Ok(Stmt::Expression { expr })
    }
}
