/*
 * ==========================================================================
 * QUILL - Small Scripts, Sharp Syntax
 * ==========================================================================
 *
 * File:     expr.rs
 * Purpose:  Expression nodes of the QUILL syntax tree.
 *
 * These are produced by:
 *  - parser/expressions.rs
 *
 * And consumed by:
 *  - the evaluator, in process or through the JSON form
 *
 * --------------------------------------------------------------------------
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

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operators, grouped by the grammar level that produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    // comparison level, right-associative
    Eq,
    Lt,
    Gt,
    Le,
    Ge,
    Ne,

    // additive level
    Add,
    Sub,

    // multiplicative level
    Mul,
    Div,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Eq => "==",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Ne => "!=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge | BinaryOp::Ne
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    /// Logical negation, `!expr`.
    Neg,
    /// Arithmetic negation, `-factor`.
    Negate,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "!",
            UnaryOp::Negate => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    NumberLiteral {
        value: f64,
    },

    StringLiteral {
        value: String,
    },

    BoolLiteral {
        value: bool,
    },

    NoneLiteral,

    VariableRef {
        name: String,
    },

    /// `name(arg arg ...)`; arguments are adjacent, no separator.
    Call {
        callee: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn number(value: f64) -> Self {
        Expr::NumberLiteral { value }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::StringLiteral { value: value.into() }
    }

    pub fn boolean(value: bool) -> Self {
        Expr::BoolLiteral { value }
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::VariableRef { name: name.into() }
    }

    pub fn call(callee: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: callee.into(),
            args,
        }
    }
}

/// Fully parenthesised rendering, mostly for debugging and test output.
///
/// `1 + 2 * 3` renders as `(1 + (2 * 3))`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Binary { op, left, right } => write!(f, "({} {} {})", left, op.symbol(), right),
            Expr::Unary { op, operand } => write!(f, "{}{}", op.symbol(), operand),
            Expr::NumberLiteral { value } => write!(f, "{}", value),
            Expr::StringLiteral { value } => write!(f, "{:?}", value),
            Expr::BoolLiteral { value: true } => write!(f, "True"),
            Expr::BoolLiteral { value: false } => write!(f, "False"),
            Expr::NoneLiteral => write!(f, "None"),
            Expr::VariableRef { name } => write!(f, "{}", name),
            Expr::Call { callee, args } => {
                write!(f, "{}(", callee)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
