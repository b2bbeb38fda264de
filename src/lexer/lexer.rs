/*
 * ==========================================================================
 * QUILL - Small Scripts, Sharp Syntax
 * ==========================================================================
 *
 * File:     lexer.rs
 * Purpose:  Converts raw QUILL source text into a lazy stream of tokens.
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

use std::iter::FusedIterator;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{LexError, LexErrorReason};
use crate::lexer::token::{Operator, Punctuation, Token, TokenKind};
use crate::span::Span;

/// `INT ("." INT?)? | "." INT`, followed by an optional signed exponent.
static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("number literal pattern is valid")
});

/// The QUILL lexer.
///
/// A `Lexer` is an `Iterator` that scans one token per call to `next()`.
/// It borrows the source text and never restarts:
/// - the last item is either the `End` token or the first `LexError`
/// - after that it yields `None` forever
pub struct Lexer<'src> {
    source: &'src str,
    current: usize,
    line: usize,
    column: usize,
    finished: bool,
}

/// Starts lexical analysis of `source`.
///
/// No work happens until the returned iterator is advanced.
///
/// # Example
/// ```rust
/// let kinds: Vec<_> = quill::lexer::tokenize("print 1;")
///     .map(|t| t.unwrap().kind)
///     .collect();
/// assert_eq!(kinds.len(), 4); // print, 1, ;, End
/// ```
pub fn tokenize(source: &str) -> Lexer<'_> {
    Lexer::new(source)
}

/// Eagerly lexes the whole input, stopping at the first error.
pub fn tokenize_all(source: &str) -> Result<Vec<Token>, LexError> {
    tokenize(source).collect()
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            current: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// Scans and returns a single token, skipping any whitespace and
    /// comments in front of it.
    ///
    /// Recognition order at each position:
    /// comment, whitespace, number, string, word, punctuation, operator.
    fn scan_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia()?;

        let start = self.here();
        let Some(ch) = self.peek() else {
            return Ok(Token::new(TokenKind::End, "", start));
        };

        if ch.is_ascii_digit() || (ch == '.' && self.peek_next().is_some_and(|c| c.is_ascii_digit())) {
            return self.number(start);
        }

        if ch == '"' {
            return self.string(start);
        }

        if ch.is_ascii_alphabetic() || ch == '_' {
            return Ok(self.word(start));
        }

        self.advance();

        if let Some(p) = Punctuation::from_char(ch) {
            return Ok(self.token(TokenKind::Punctuation(p), start));
        }

        let op = match ch {
            '=' if self.match_char('=') => Operator::EqualEqual,
            '!' if self.match_char('=') => Operator::BangEqual,
            '<' if self.match_char('=') => Operator::LessEqual,
            '>' if self.match_char('=') => Operator::GreaterEqual,
            '!' => Operator::Bang,
            '<' => Operator::Less,
            '>' => Operator::Greater,
            '+' => Operator::Plus,
            '-' => Operator::Minus,
            '*' => Operator::Star,
            '/' => Operator::Slash,
            _ => return Err(LexError::new(start, LexErrorReason::UnexpectedChar(ch))),
        };

        Ok(self.token(TokenKind::Operator(op), start))
    }

    /// Skips whitespace and `(# ... #)` comments.
    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('(') if self.peek_next() == Some('#') => self.block_comment()?,
                _ => return Ok(()),
            }
        }
    }

    /// Skips a block comment delimited by `(#` and `#)`.
    ///
    /// Comments nest, so `(# a (# b #) c #)` is one comment.
    fn block_comment(&mut self) -> Result<(), LexError> {
        let start = self.here();
        self.advance();
        self.advance();

        let mut depth = 1usize;

        while !self.is_at_end() {
            if self.peek() == Some('(') && self.peek_next() == Some('#') {
                self.advance();
                self.advance();
                depth += 1;
            } else if self.peek() == Some('#') && self.peek_next() == Some(')') {
                self.advance();
                self.advance();
                depth -= 1;

                if depth == 0 {
                    return Ok(());
                }
            } else {
                self.advance();
            }
        }

        Err(LexError::new(start, LexErrorReason::UnterminatedComment))
    }

    /// Parses a numeric literal into a `TokenKind::Number` token.
    ///
    /// # Behavior
    /// - Matches the longest prefix accepted by `NUMBER`
    /// - Converts the text to an `f64`
    /// - Rejects literals whose value is not finite (`1e400`)
    ///
    /// # Examples
    /// - `42`
    /// - `3.` and `.5`
    /// - `6.02e23`
    ///
    /// # Errors
    /// `InvalidNumber` at the first character of the literal.
    fn number(&mut self, start: Span) -> Result<Token, LexError> {
        let text = match NUMBER.find(&self.source[self.current..]) {
            Some(m) => m.as_str(),
            None => {
                let ch = self.peek().unwrap_or('\0');
                return Err(LexError::new(start, LexErrorReason::UnexpectedChar(ch)));
            }
        };

        // The pattern is ASCII only, so bytes and characters line up.
        self.current += text.len();
        self.column += text.len();

        let invalid = || LexError::new(start, LexErrorReason::InvalidNumber(text.to_string()));

        let value: f64 = text.parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }

        Ok(Token::new(TokenKind::Number(value), text, start))
    }

    /// Parses a double-quoted string literal and decodes its escapes.
    ///
    /// A string may not contain a raw newline; hitting one (or the end of
    /// input) reports the error at the opening quote.
    fn string(&mut self, start: Span) -> Result<Token, LexError> {
        self.advance(); // opening quote

        let mut value = String::new();

        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(LexError::new(start, LexErrorReason::UnterminatedString));
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    let escape_at = self.here();
                    self.advance();
                    value.push(self.escape(start, escape_at)?);
                }
                Some(c) => {
                    self.advance();
                    value.push(c);
                }
            }
        }

        Ok(self.token(TokenKind::String(value), start))
    }

    fn escape(&mut self, string_start: Span, escape_at: Span) -> Result<char, LexError> {
        let ch = match self.peek() {
            None | Some('\n') => {
                return Err(LexError::new(string_start, LexErrorReason::UnterminatedString));
            }
            Some(c) => c,
        };
        self.advance();

        let decoded = match ch {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            '\'' => '\'',
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{8}',
            'f' => '\u{c}',
            '0' => '\0',
            'u' => return self.unicode_escape(escape_at),
            other => return Err(LexError::new(escape_at, LexErrorReason::InvalidEscape(other))),
        };

        Ok(decoded)
    }

    /// `\uXXXX`: exactly four hex digits naming a scalar value.
    fn unicode_escape(&mut self, escape_at: Span) -> Result<char, LexError> {
        let invalid = || LexError::new(escape_at, LexErrorReason::InvalidEscape('u'));

        let mut code = 0u32;
        for _ in 0..4 {
            let digit = self.peek().and_then(|c| c.to_digit(16)).ok_or_else(invalid)?;
            self.advance();
            code = code * 16 + digit;
        }

        char::from_u32(code).ok_or_else(invalid)
    }

    /// Parses a word token.
    ///
    /// # Behavior
    /// - Reads ASCII letters, digits and underscores
    /// - The first character has already been checked not to be a digit
    ///
    /// # Language Rules
    /// - Words are never classified here; reserved words are recognised by
    ///   the parser through `keywords::is_keyword`
    /// - Case-sensitive: `True` is reserved, `true` is not
    fn word(&mut self, start: Span) -> Token {
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }

        let text = &self.source[start.offset..self.current];
        Token::new(TokenKind::Word(text.to_string()), text, start)
    }

    /// Builds a token whose lexeme runs from `start` to the cursor.
    fn token(&self, kind: TokenKind, start: Span) -> Token {
        Token::new(kind, &self.source[start.offset..self.current], start)
    }

    /// Span of the cursor. Named apart from `Iterator::position`, which
    /// method lookup would otherwise pick first.
    fn here(&self) -> Span {
        Span::new(self.current, self.line, self.column)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Advances the cursor by one character, tracking line and column.
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.current += ch.len_utf8();

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        self.source[self.current..].chars().nth(1)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.scan_token();

        match &result {
            Ok(token) if token.is_end() => self.finished = true,
            Err(_) => self.finished = true,
            Ok(_) => {}
        }

        Some(result)
    }
}

impl FusedIterator for Lexer<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize_all(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn word(w: &str) -> TokenKind {
        TokenKind::Word(w.to_string())
    }

    #[test]
    fn trivia_only_input_yields_just_end() {
        for source in ["", "   \n\t ", "(# note #)", " (# a (# nested #) b #)\n (#x#) "] {
            assert_eq!(kinds(source), vec![TokenKind::End], "source: {:?}", source);
        }
    }

    #[test]
    fn scans_a_statement() {
        assert_eq!(
            kinds("{ global x 1.5; }"),
            vec![
                TokenKind::Punctuation(Punctuation::LeftBrace),
                word("global"),
                word("x"),
                TokenKind::Number(1.5),
                TokenKind::Punctuation(Punctuation::Semicolon),
                TokenKind::Punctuation(Punctuation::RightBrace),
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn longest_operator_wins() {
        assert_eq!(
            kinds("<= < >= > == != ! + - * /"),
            vec![
                TokenKind::Operator(Operator::LessEqual),
                TokenKind::Operator(Operator::Less),
                TokenKind::Operator(Operator::GreaterEqual),
                TokenKind::Operator(Operator::Greater),
                TokenKind::Operator(Operator::EqualEqual),
                TokenKind::Operator(Operator::BangEqual),
                TokenKind::Operator(Operator::Bang),
                TokenKind::Operator(Operator::Plus),
                TokenKind::Operator(Operator::Minus),
                TokenKind::Operator(Operator::Star),
                TokenKind::Operator(Operator::Slash),
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn number_forms() {
        assert_eq!(
            kinds("42 3.25 .5 7. 1e3 2.5E-1"),
            vec![
                TokenKind::Number(42.0),
                TokenKind::Number(3.25),
                TokenKind::Number(0.5),
                TokenKind::Number(7.0),
                TokenKind::Number(1000.0),
                TokenKind::Number(0.25),
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn exponent_needs_digits() {
        assert_eq!(
            kinds("2e"),
            vec![TokenKind::Number(2.0), word("e"), TokenKind::End]
        );
    }

    #[test]
    fn out_of_range_number_is_rejected() {
        let err = tokenize_all("print 1e400;").unwrap_err();
        assert_eq!(err.reason, LexErrorReason::InvalidNumber("1e400".to_string()));
        assert_eq!(err.span, Span::new(6, 1, 7));

        let huge = format!("{}e999999999999", "9".repeat(40));
        assert!(matches!(
            tokenize_all(&huge).unwrap_err().reason,
            LexErrorReason::InvalidNumber(_)
        ));

        // Underflow is finite and stays a number.
        assert_eq!(kinds("1e-9999"), vec![TokenKind::Number(0.0), TokenKind::End]);
    }

    #[test]
    fn words_are_not_classified() {
        assert_eq!(
            kinds("if _tmp x1 True"),
            vec![word("if"), word("_tmp"), word("x1"), word("True"), TokenKind::End]
        );
    }

    #[test]
    fn string_escapes_are_decoded() {
        let tokens = tokenize_all(r#""a\"b\\c\nA""#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String("a\"b\\c\nA".to_string()));
        assert_eq!(tokens[0].lexeme, r#""a\"b\\c\nA""#);
    }

    #[test]
    fn tracks_line_and_column() {
        let tokens = tokenize_all("{\n  print \"é\" x;\n}").unwrap();
        let print = &tokens[1];
        let x = &tokens[3];

        assert_eq!((print.span.line, print.span.column), (2, 3));
        assert_eq!((x.span.line, x.span.column), (2, 13));
        assert_eq!(x.span.offset, 15);
    }

    #[test]
    fn unterminated_string_points_at_opening_quote() {
        let err = tokenize_all("print \"abc;").unwrap_err();
        assert_eq!(err.reason, LexErrorReason::UnterminatedString);
        assert_eq!(err.span, Span::new(6, 1, 7));
    }

    #[test]
    fn string_cannot_span_lines() {
        let err = tokenize_all("\"abc\ndef\"").unwrap_err();
        assert_eq!(err.reason, LexErrorReason::UnterminatedString);
        assert_eq!(err.span.offset, 0);
    }

    #[test]
    fn unterminated_comment_points_at_opener() {
        let err = tokenize_all("x (# one (# two #) ").unwrap_err();
        assert_eq!(err.reason, LexErrorReason::UnterminatedComment);
        assert_eq!(err.span, Span::new(2, 1, 3));
    }

    #[test]
    fn rejects_unknown_characters() {
        for (source, ch) in [("a = 1", '='), ("f(a, b)", ','), ("x % y", '%')] {
            let err = tokenize_all(source).unwrap_err();
            assert_eq!(err.reason, LexErrorReason::UnexpectedChar(ch));
        }
    }

    #[test]
    fn rejects_bad_escapes() {
        let err = tokenize_all(r#""\q""#).unwrap_err();
        assert_eq!(err.reason, LexErrorReason::InvalidEscape('q'));
        assert_eq!(err.span.offset, 1);

        let err = tokenize_all(r#""\u12""#).unwrap_err();
        assert_eq!(err.reason, LexErrorReason::InvalidEscape('u'));
    }

    #[test]
    fn is_lazy_and_fused() {
        let mut lexer = tokenize("x $ y");

        assert!(matches!(lexer.next(), Some(Ok(ref t)) if t.is_word("x")));
        assert!(matches!(lexer.next(), Some(Err(_))));
        assert!(lexer.next().is_none());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn end_token_is_emitted_once() {
        let mut lexer = tokenize("  ");
        let end = lexer.next().unwrap().unwrap();

        assert!(end.is_end());
        assert_eq!(end.span, Span::new(2, 1, 3));
        assert!(lexer.next().is_none());
    }
}
