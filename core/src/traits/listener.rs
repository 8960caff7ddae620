use crate::error::RecognitionError;

/// Receives syntax errors reported by a lexer or parser.
///
/// Listeners are shared with the component that reports to them, so
/// implementations that record errors use interior mutability.
pub trait ErrorListener {
    fn syntax_error(&self, error: &RecognitionError);
}
