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

use std::fmt::Write;

use colored::Colorize;

use crate::error::SyntaxError;
use crate::span::Span;

/// Renders human-friendly, compiler-style diagnostics for QUILL syntax
/// errors.
///
/// This printer:
/// - Formats errors with file/line/column information
/// - Displays the offending source line
/// - Highlights the exact error position using a caret (`^`)
/// - Optionally shows a follow-up hint
///
/// Colour is applied through `colored` and respects its global override,
/// so `colored::control::set_override(false)` yields plain text.
pub struct DiagnosticPrinter {
    /// Full source code of the file being parsed.
    source: String,

    /// Name of the source file, for display only.
    file_name: String,
}

impl DiagnosticPrinter {
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    /// Formats `error` against the source.
    ///
    /// # Output Example
    /// ```text
    /// error[E_PARSE]: expected `;`, found `==`
    ///   --> example.ql:2:15
    ///     |
    ///   2 |   print a + b == c;
    ///     |               ^
    /// help: statements end with `;`, including `if` and `while` blocks
    /// ```
    pub fn render(&self, error: &SyntaxError) -> String {
        let Span { line, column, .. } = error.span();

        // Lines are 1-indexed in diagnostics; an error at end of input may
        // sit on a line past the last one.
        let src_line = self.source.lines().nth(line.saturating_sub(1)).unwrap_or("");

        let mut out = String::new();

        let header = format!("error[{}]", error.code());
        let _ = writeln!(out, "{}: {}", header.red().bold(), error.message().bold());
        let _ = writeln!(
            out,
            "{} {}:{}:{}",
            "  -->".bright_blue(),
            self.file_name,
            line,
            column
        );
        let _ = writeln!(out, "{}", "    |".bright_blue());
        let _ = writeln!(
            out,
            "{} {}",
            format!("{:>3} |", line).bright_blue(),
            src_line
        );
        let _ = writeln!(
            out,
            "{} {}{}",
            "    |".bright_blue(),
            " ".repeat(column.saturating_sub(1)),
            "^".red().bold()
        );

        if let Some(help) = error.help() {
            let _ = writeln!(out, "{} {}", "help:".bright_yellow(), help);
        }

        out
    }

    /// Prints the rendered diagnostic to stderr.
    pub fn print(&self, error: &SyntaxError) {
        eprint!("{}", self.render(error));
    }
}
