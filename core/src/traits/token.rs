use crate::token::{Channel, CommonToken, Span, TokenType};

/// A lexed token.
///
/// Implementations other than [`CommonToken`] are allowed; they simply do
/// not support channel reassignment.
pub trait Token: core::fmt::Debug {
    fn token_type(&self) -> TokenType;

    fn channel(&self) -> Channel;

    fn text(&self) -> &str;

    fn span(&self) -> Span;

    /// Returns `Some` when this token is the common implementation, whose
    /// channel can be reassigned in place.
    #[inline]
    fn as_common(&self) -> Option<&CommonToken> {
        None
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.token_type() == TokenType::EOF
    }
}
