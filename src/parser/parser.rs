/*
 * ==========================================================================
 * QUILL - Small Scripts, Sharp Syntax
 * ==========================================================================
 *
 * Core Recursive-Descent Parser Entry Point
 *
 * This file defines the primary `Parser` structure and the public `parse()`
 * driver functions used to transform a token stream into a QUILL syntax
 * tree rooted at a single `Block`.
 *
 * The parsing implementation itself is split across multiple modules:
 * - `statements.rs`   → Block and statement grammar (`global`, `fn`, `if` ...)
 * - `expressions.rs`  → Expression grammar & operator precedence
 * - `helpers.rs`      → Token matching, consumption, and error utilities
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

use crate::ast::Block;
use crate::config::ParserConfig;
use crate::error::{LexError, SyntaxError};
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

/// The core QUILL recursive-descent parser.
///
/// This structure maintains:
/// - The token iterator (usually a lazy `Lexer`)
/// - Exactly one token of lookahead, `current`
/// - The active configuration and nesting depth
///
/// The grammar itself is implemented through extension modules
/// (`statements`, `expressions`, `helpers`) via additional `impl Parser`
/// blocks.
pub struct Parser<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    /// Remaining tokens. Pulled one at a time, never rewound.
    pub(crate) tokens: I,

    /// The lookahead token.
    pub(crate) current: Token,

    pub(crate) config: ParserConfig,

    /// Current nesting of blocks and expressions.
    pub(crate) depth: usize,
}

/// Public entry point for the QUILL parsing phase.
///
/// # Pipeline
/// ```text
/// Source → Lexer → Tokens → Parser → Block → Evaluator
/// ```
///
/// Lexer errors travel through the token stream and are reported the moment
/// the parser pulls the bad token, so whichever error comes first in the
/// source wins.
///
/// # Example
/// ```rust
/// use quill::{lexer::tokenize, parser::parse};
///
/// let program = parse(tokenize("{ print 1; }")).unwrap();
/// assert_eq!(program.len(), 1);
/// ```
pub fn parse<T>(tokens: T) -> Result<Block, SyntaxError>
where
    T: IntoIterator<Item = Result<Token, LexError>>,
{
    parse_with_config(tokens, &ParserConfig::default())
}

/// Like [`parse`], with explicit configuration.
pub fn parse_with_config<T>(tokens: T, config: &ParserConfig) -> Result<Block, SyntaxError>
where
    T: IntoIterator<Item = Result<Token, LexError>>,
{
    let mut parser = Parser::new(tokens.into_iter(), config.clone())?;
    parser.parse()
}

/// Parses tokens that were already lexed successfully.
pub fn parse_tokens(tokens: Vec<Token>) -> Result<Block, SyntaxError> {
    parse(tokens.into_iter().map(Ok::<Token, LexError>))
}

impl<I> Parser<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    /// Creates a parser and pulls the first lookahead token.
    pub fn new(mut tokens: I, config: ParserConfig) -> Result<Self, SyntaxError> {
        let current = Self::pull(&mut tokens, Span::start())?;

        Ok(Self {
            tokens,
            current,
            config,
            depth: 0,
        })
    }

    /// Parses the whole program: exactly one block followed by end of input.
    pub fn parse(&mut self) -> Result<Block, SyntaxError> {
        let program = self.block()?;

        if !self.current.is_end() {
            return Err(self.error(vec!["end of input".to_string()]));
        }

        Ok(program)
    }

    /// Pulls the next token. A stream that runs dry without an explicit
    /// `End` token is treated as ending at `fallback`.
    pub(crate) fn pull(tokens: &mut I, fallback: Span) -> Result<Token, SyntaxError> {
        match tokens.next() {
            Some(Ok(token)) => Ok(token),
            Some(Err(e)) => Err(SyntaxError::Lex(e)),
            None => Ok(Token::new(TokenKind::End, "", fallback)),
        }
    }
}
