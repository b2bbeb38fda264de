/*
 * ==========================================================================
 * QUILL - Small Scripts, Sharp Syntax
 * ==========================================================================
 *
 * File:     stmt.rs
 * Purpose:  Blocks and statements of the QUILL syntax tree.
 *
 * Author:   Sam Wilcox
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

use crate::ast::Expr;
use serde::{Deserialize, Serialize};

/// An ordered sequence of statements; the program root is a `Block`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

impl Block {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.statements.iter()
    }
}

impl<'a> IntoIterator for &'a Block {
    type Item = &'a Stmt;
    type IntoIter = std::slice::Iter<'a, Stmt>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

/// One `if`/`elif` arm of a conditional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub condition: Expr,
    pub body: Block,
}

/// All QUILL statements.
///
/// Serialized with a `kind` tag named after the grammar rule that builds
/// the node (`assign_global`, `declare_function`, `conditional`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stmt {
    /* ----------------------------- */
    /* VARIABLES                     */
    /* ----------------------------- */

    AssignGlobal {
        name: String,
        value: Expr,
    },

    AssignLocal {
        name: String,
        value: Expr,
    },

    /* ----------------------------- */
    /* FUNCTIONS                     */
    /* ----------------------------- */

    /// Parameter names are kept in order; duplicates are not rejected here.
    DeclareFunction {
        name: String,
        params: Vec<String>,
        body: Block,
    },

    Return {
        value: Expr,
    },

    /* ----------------------------- */
    /* CONTROL FLOW                  */
    /* ----------------------------- */

    /// `if` plus any `elif` arms, in source order. Never empty.
    Conditional {
        branches: Vec<Branch>,
        otherwise: Option<Block>,
    },

    While {
        condition: Expr,
        body: Block,
    },

    /* ----------------------------- */
    /* OUTPUT / EXPRESSIONS          */
    /* ----------------------------- */

    Print {
        value: Expr,
    },

    Expression {
        expr: Expr,
    },
}
