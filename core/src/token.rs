//! Token model: type codes, channels, spans and the common token.

use core::cell::Cell;
use core::fmt;
use core::ops::Range;

use crate::traits::Token;

/// Grammar-defined token type code.
///
/// Grammars number their own token types from `1` upward; [`TokenType::EOF`]
/// is reserved for the end-of-file sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenType(pub i32);

impl TokenType {
    /// The end-of-file sentinel.
    pub const EOF: Self = Self(-1);
}

/// Token channel. Default token consumers only look at [`Channel::DEFAULT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Channel(pub u32);

impl Channel {
    pub const DEFAULT: Self = Self(0);
    pub const HIDDEN: Self = Self(1);
}

impl Default for Channel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Byte range into the source text, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `offset`.
    #[inline]
    pub const fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Uses saturating subtraction, so inverted spans have length `0`.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn join(&self, other: &Self) -> Self {
        Self::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// The common token implementation.
///
/// The channel sits in a [`Cell`] so it can be reassigned after the token
/// has been published in a shared [`BufferedTokenStream`](crate::BufferedTokenStream).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonToken {
    token_type: TokenType,
    channel: Cell<Channel>,
    text: String,
    span: Span,
}

impl CommonToken {
    pub fn new(token_type: TokenType, text: impl Into<String>, span: Span) -> Self {
        Self {
            token_type,
            channel: Cell::new(Channel::DEFAULT),
            text: text.into(),
            span,
        }
    }

    /// End-of-file sentinel positioned at `offset`, on the default channel.
    pub fn eof(offset: usize) -> Self {
        Self::new(TokenType::EOF, "<EOF>", Span::empty(offset))
    }

    pub fn with_channel(self, channel: Channel) -> Self {
        self.channel.set(channel);
        self
    }

    pub fn set_channel(&self, channel: Channel) {
        self.channel.set(channel);
    }
}

impl Token for CommonToken {
    #[inline]
    fn token_type(&self) -> TokenType {
        self.token_type
    }

    #[inline]
    fn channel(&self) -> Channel {
        self.channel.get()
    }

    #[inline]
    fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    fn span(&self) -> Span {
        self.span
    }

    #[inline]
    fn as_common(&self) -> Option<&CommonToken> {
        Some(self)
    }
}

impl fmt::Display for CommonToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[@{} '{}' <{}>",
            self.span, self.text, self.token_type.0
        )?;
        if self.channel.get() != Channel::DEFAULT {
            write!(f, ",channel={}", self.channel.get().0)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eof_sentinel() {
        let eof = CommonToken::eof(7);
        assert!(eof.is_eof());
        assert_eq!(eof.span(), Span::empty(7));
        assert_eq!(eof.channel(), Channel::DEFAULT);
    }

    #[test]
    fn test_set_channel_through_shared_ref() {
        let tok = CommonToken::new(TokenType(3), "x", Span::new(0, 1));
        let shared = &tok;
        shared.set_channel(Channel::HIDDEN);
        assert_eq!(tok.channel(), Channel::HIDDEN);
    }

    #[test]
    fn test_display() {
        let tok = CommonToken::new(TokenType(2), "let", Span::new(0, 3));
        assert_eq!(tok.to_string(), "[@0..3 'let' <2>]");
        tok.set_channel(Channel::HIDDEN);
        assert_eq!(tok.to_string(), "[@0..3 'let' <2>,channel=1]");
    }

    #[test_case::test_case(0, 0, 0; "empty")]
    #[test_case::test_case(2, 5, 3; "forward")]
    #[test_case::test_case(5, 2, 0; "inverted")]
    fn test_span_len(start: usize, end: usize, len: usize) {
        assert_eq!(Span::new(start, end).len(), len);
    }

    #[test]
    fn test_span_join() {
        let joined = Span::new(4, 6).join(&Span::new(1, 2));
        assert_eq!(joined, Span::new(1, 6));
    }
}
