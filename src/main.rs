/*
 * ==========================================================================
 * QUILL - Small Scripts, Sharp Syntax
 * ==========================================================================
 *
 * File:     main.rs
 * Purpose:  `quill` command-line front end. Dumps tokens or the syntax
 *           tree of a script, or just checks that it parses. It never
 *           runs a program.
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

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser as ClapParser, Subcommand};
use colored::Colorize;

use quill::lexer::tokenize;
use quill::{parse_source_with_config, DiagnosticPrinter, DivisionMode, ParserConfig, SyntaxError};

const EXIT_SYNTAX: u8 = 1;
const EXIT_USAGE: u8 = 2;

#[derive(ClapParser)]
#[command(
    name = "quill",
    about = "Quill: turn scripts into syntax trees",
    version = env!("CARGO_PKG_VERSION"),
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    options: ParseOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ParseOptions {
    /// JSON file holding a parser configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Build subtraction nodes for `/`, as the first Quill grammar did
    #[arg(long, global = true)]
    legacy_division: bool,

    /// Deepest allowed nesting of blocks and expressions
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    /// Disable coloured diagnostics
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
#[command(arg_required_else_help = true)]
enum Commands {
    /// Print the token stream of a script
    Tokens {
        /// Path to the .ql file
        file: PathBuf,
    },

    /// Print the syntax tree of a script as JSON
    Ast {
        /// Path to the .ql file
        file: PathBuf,

        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Check that a script parses
    Check {
        /// Path to the .ql file
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.options.no_color {
        colored::control::set_override(false);
    }

    let config = match load_config(&cli.options) {
        Ok(config) => config,
        Err(message) => return fail(&message),
    };

    match cli.command {
        Commands::Tokens { file } => dump_tokens(&file),
        Commands::Ast { file, compact } => dump_ast(&file, &config, compact),
        Commands::Check { file } => check(&file, &config),
    }
}

/// Config file first, then command-line flags on top.
fn load_config(options: &ParseOptions) -> Result<ParserConfig, String> {
    let mut config = match &options.config {
        Some(path) => {
            let text = read_source(path)?;
            ParserConfig::from_json(&text)
                .map_err(|e| format!("invalid config {}: {}", path.display(), e))?
        }
        None => ParserConfig::default(),
    };

    if options.legacy_division {
        config = config.with_division(DivisionMode::LegacySubtraction);
    }

    if let Some(depth) = options.max_depth {
        config = config.with_max_depth(depth);
    }

    Ok(config)
}

fn read_source(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path.display(), e))
}

fn dump_tokens(file: &Path) -> ExitCode {
    let source = match read_source(file) {
        Ok(source) => source,
        Err(message) => return fail(&message),
    };

    for item in tokenize(&source) {
        match item {
            Ok(token) => println!(
                "{:>4}:{:<4} {:<12} {}",
                token.span.line,
                token.span.column,
                token.kind.to_string(),
                token.lexeme
            ),
            Err(e) => return report(file, &source, &SyntaxError::Lex(e)),
        }
    }

    ExitCode::SUCCESS
}

fn dump_ast(file: &Path, config: &ParserConfig, compact: bool) -> ExitCode {
    let source = match read_source(file) {
        Ok(source) => source,
        Err(message) => return fail(&message),
    };

    let program = match parse_source_with_config(&source, config) {
        Ok(program) => program,
        Err(e) => return report(file, &source, &e),
    };

    let json = if compact {
        serde_json::to_string(&program)
    } else {
        serde_json::to_string_pretty(&program)
    };

    match json {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => fail(&format!("cannot serialize syntax tree: {}", e)),
    }
}

fn check(file: &Path, config: &ParserConfig) -> ExitCode {
    let source = match read_source(file) {
        Ok(source) => source,
        Err(message) => return fail(&message),
    };

    match parse_source_with_config(&source, config) {
        Ok(program) => {
            println!(
                "{} {} ({} top-level statements)",
                "ok:".green().bold(),
                file.display(),
                program.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => report(file, &source, &e),
    }
}

fn report(file: &Path, source: &str, error: &SyntaxError) -> ExitCode {
    DiagnosticPrinter::new(file.display().to_string(), source).print(error);
    ExitCode::from(EXIT_SYNTAX)
}

fn fail(message: &str) -> ExitCode {
    eprintln!("{} {}", "error:".red().bold(), message);
    ExitCode::from(EXIT_USAGE)
}
