//! Core of the lazyparse front end.
//!
//! [`Tokenizer`] binds a source text to a grammar's lexer and parser and
//! computes the token list and the syntax tree at most once each, on demand.
//! The remaining modules describe the runtime those pieces plug into.

mod buffered;
mod cache;
mod char_stream;
pub mod config;
mod error;
mod lazy;
mod listeners;
#[cfg(feature = "logos")]
mod logos_lexer;
mod token;
mod tokenizer;
pub mod traits;

pub use buffered::BufferedTokenStream;
pub use cache::ConstructorCache;
pub use char_stream::CharStream;
pub use config::{RecursionGuard, TokenizerConfig};
pub use error::{ConstructError, Error, RecognitionError};
pub use lazy::LazyCell;
pub use listeners::{ConsoleErrorListener, ErrorListeners, ListenerId};
#[cfg(feature = "logos")]
pub use logos_lexer::{LogosLexer, TokenKind};
pub use token::{Channel, CommonToken, Span, TokenType};
pub use tokenizer::{Tokenizer, TokenizerBuilder, TokenizerState};
pub use traits::{
    Constructor, ErrorListener, Grammar, GrammarToken, Lexer, Parser, ParserType, PredictionMode,
    Token,
};
