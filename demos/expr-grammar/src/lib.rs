#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Expression Language Example
//!
//! A small statement language wired into the lazyparse [`Tokenizer`]:
//!
//! ```text
//! program   := statement* EOF
//! statement := 'let' IDENT '=' expr ';'
//!            | IDENT '=' expr ';'
//!            | expr ';'
//! expr      := term (('+' | '-') term)*
//! term      := unary (('*' | '/') unary)*
//! unary     := '-' unary | primary
//! primary   := NUMBER | IDENT | '(' expr ')'
//! ```
//!
//! Whitespace and `#` comments are lexed onto the hidden channel.
//! Telling an assignment from an expression statement needs two tokens of
//! lookahead, which fast prediction does not use, so such programs
//! exercise the exact-mode retry.

use lazyparse::{Grammar, RecognitionError, Tokenizer};

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{BinOp, Expr, Program, Statement};
pub use lexer::{ExprLexer, Kind};
pub use parser::ExprParser;

/// Binds [`ExprLexer`] and [`ExprParser`] to the `program` rule.
pub struct ExprGrammar;

impl Grammar for ExprGrammar {
    type Lexer = ExprLexer;
    type Parser = ExprParser;
    type Ast = Program;

    fn root_rule(parser: &mut ExprParser) -> Result<Program, RecognitionError> {
        parser.program()
    }
}

pub type ExprTokenizer = Tokenizer<ExprGrammar>;

/// Tokenizer over `source` with default settings.
pub fn tokenizer(source: impl Into<String>) -> ExprTokenizer {
    Tokenizer::new(source, ExprLexer::new())
}
