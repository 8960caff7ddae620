//! Error types for lazyparse.
//!
//! [`Error`] is what the [`Tokenizer`](crate::Tokenizer) accessors return.
//! [`RecognitionError`] is what lexers and parsers produce while reading
//! input; it travels inside [`Error::Lex`] and [`Error::Parse`] untouched.

use thiserror::Error;

use crate::token::Span;

/// Boxed failure raised by a parser constructor.
pub type ConstructError = Box<dyn std::error::Error + Send + Sync>;

/// Core lazyparse error type.
///
/// Every variant is fatal to the accessor call that produced it, but none of
/// them leaves a half-computed value in the tokenizer's caches.
#[derive(Error, Debug)]
pub enum Error {
    /// The builder was finished without source text.
    #[error("tokenizer requires source text")]
    MissingSource,

    /// The builder was finished without a lexer.
    #[error("tokenizer requires a lexer")]
    MissingLexer,

    /// The source text was handed to the lexer by an earlier lex pass that
    /// failed, so there is nothing left to lex.
    #[error("source text was consumed by a failed lex pass")]
    SourceConsumed,

    /// The parser type cannot be built over a token stream.
    #[error("parser `{parser}` has no constructor over a token stream")]
    ConstructorNotFound {
        /// Name of the parser type.
        parser: &'static str,
    },

    /// The parser constructor exists but failed when invoked.
    #[error("failed to construct parser `{parser}`: {source}")]
    Construction {
        /// Name of the parser type.
        parser: &'static str,
        #[source]
        source: ConstructError,
    },

    /// A parse pass needed the parser slot while a guard returned by
    /// [`Tokenizer::parser`](crate::Tokenizer::parser) or
    /// [`Tokenizer::parser_mut`](crate::Tokenizer::parser_mut) was alive.
    #[error("parser is borrowed by a caller; drop the guard before parsing")]
    ParserBorrowed,

    /// The lexer rejected the input.
    #[error(transparent)]
    Lex(RecognitionError),

    /// The parser rejected the token stream in exact prediction mode.
    #[error(transparent)]
    Parse(RecognitionError),

    /// The lexer produced more tokens than the configured maximum.
    #[error("token limit exceeded: consumed {consumed} > limit {limit}")]
    TokenLimitExceeded {
        /// Number of tokens buffered when the limit was hit.
        consumed: usize,
        /// Maximum allowed token count.
        limit: usize,
    },
}

/// A syntax error raised by a lexer or parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{span}: {message}")]
pub struct RecognitionError {
    /// Human readable description.
    pub message: String,
    /// Source range of the offending input.
    pub span: Span,
    /// Text of the offending token, if there was one.
    pub offending: Option<String>,
    /// Set when the error came out of fast (SLL) prediction and may
    /// disappear under exact prediction.
    pub during_prediction: bool,
}

impl RecognitionError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            offending: None,
            during_prediction: false,
        }
    }

    pub fn with_offending(mut self, text: impl Into<String>) -> Self {
        self.offending = Some(text.into());
        self
    }

    /// Marks the error as a fast-prediction bail-out.
    pub fn in_prediction(mut self) -> Self {
        self.during_prediction = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognition_error_display() {
        let err = RecognitionError::new("unexpected `=`", Span::new(4, 5)).with_offending("=");
        assert_eq!(err.to_string(), "4..5: unexpected `=`");
        assert_eq!(err.offending.as_deref(), Some("="));
        assert!(!err.during_prediction);
    }

    #[test]
    fn test_lex_and_parse_are_transparent() {
        let err = RecognitionError::new("bad", Span::new(0, 1));
        assert_eq!(Error::Lex(err.clone()).to_string(), err.to_string());
        assert_eq!(Error::Parse(err.clone()).to_string(), err.to_string());
    }

    #[test]
    fn test_construction_keeps_source() {
        let err = Error::Construction {
            parser: "MyParser",
            source: "out of memory".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to construct parser `MyParser`: out of memory"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
