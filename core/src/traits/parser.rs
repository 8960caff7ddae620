use std::rc::Rc;

use super::listener::ErrorListener;
use super::token::Token;
use crate::buffered::BufferedTokenStream;
use crate::error::{ConstructError, RecognitionError};
use crate::listeners::{ErrorListeners, ListenerId};

/// Parse-decision strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PredictionMode {
    /// Fast, approximate prediction. Cheap and right for most inputs, but
    /// may fail where full context is needed.
    #[default]
    Sll,
    /// Exact, full-context prediction.
    Ll,
}

/// A parser bound to one [`BufferedTokenStream`].
///
/// # Prediction
///
/// Under [`PredictionMode::Sll`] a parser should stop at its first syntax
/// error and return it marked with
/// [`RecognitionError::in_prediction`], without reporting it to listeners:
/// the caller resets the parser and tries again in [`PredictionMode::Ll`],
/// where errors are reported normally.
pub trait Parser {
    /// The token type consumed by this parser.
    type Token: Token + 'static;

    fn token_stream(&self) -> &Rc<BufferedTokenStream<Self::Token>>;

    fn listeners(&self) -> &ErrorListeners;

    fn listeners_mut(&mut self) -> &mut ErrorListeners;

    fn prediction_mode(&self) -> PredictionMode;

    /// Switches the prediction strategy. Parsers may refuse a mode.
    fn set_prediction_mode(&mut self, mode: PredictionMode) -> Result<(), RecognitionError>;

    /// Rewinds the token stream to the start and clears error state.
    fn reset(&mut self);

    /// Number of syntax errors reported to listeners so far.
    fn syntax_errors(&self) -> usize;

    #[inline]
    fn remove_error_listener(&mut self, id: ListenerId) -> bool {
        self.listeners_mut().remove(id)
    }

    #[inline]
    fn add_error_listener(&mut self, listener: Rc<dyn ErrorListener>) -> ListenerId {
        self.listeners_mut().add(listener)
    }
}

/// Builds a parser bound to a token stream.
pub type Constructor<P> =
    fn(Rc<BufferedTokenStream<<P as Parser>::Token>>) -> Result<P, ConstructError>;

/// A concrete parser type that a [`ConstructorCache`](crate::ConstructorCache)
/// can build.
///
/// # Example
///
/// ```ignore
/// impl ParserType for CalcParser {
///     const NAME: &'static str = "CalcParser";
///
///     fn constructor() -> Option<Constructor<Self>> {
///         Some(|input| Ok(CalcParser::new(input)))
///     }
/// }
/// ```
pub trait ParserType: Parser + Sized + 'static {
    /// Name used in diagnostics and logs.
    const NAME: &'static str;

    /// Looks up the constructor over a token stream.
    ///
    /// `None` means the parser cannot be built from a token stream alone.
    /// The cache calls this at most once per parser type.
    fn constructor() -> Option<Constructor<Self>>;
}
