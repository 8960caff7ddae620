//! Capabilities the facade expects from a parser runtime.
//!
//! These traits describe the seams between [`Tokenizer`](crate::Tokenizer)
//! and the grammar-specific code plugged into it.
//!
//! # Trait Hierarchy
//!
//! ```text
//! Grammar (one per concrete language)
//!     ├── Lexer   (CharStream -> Token*)
//!     ├── ParserType: Parser (BufferedTokenStream -> rule contexts)
//!     └── root_rule(&mut Parser) -> Ast
//!
//! Token (type code + channel + text)
//!
//! ErrorListener (diagnostic sink, owned by lexers and parsers)
//! ```
//!
//! # Usage Patterns
//!
//! ```ignore
//! use lazyparse::{Grammar, Tokenizer};
//!
//! struct Calc;
//!
//! impl Grammar for Calc {
//!     type Lexer = CalcLexer;
//!     type Parser = CalcParser;
//!     type Ast = Program;
//!
//!     fn root_rule(parser: &mut CalcParser) -> Result<Program, RecognitionError> {
//!         parser.program()
//!     }
//! }
//!
//! let tokenizer = Tokenizer::<Calc>::new("1 + 2;", CalcLexer::new());
//! let ast = tokenizer.read_ast()?;
//! ```

mod grammar;
mod lexer;
mod listener;
mod parser;
mod token;

pub use grammar::{Grammar, GrammarToken};
pub use lexer::Lexer;
pub use listener::ErrorListener;
pub use parser::{Constructor, Parser, ParserType, PredictionMode};
pub use token::Token;
