//! Token definitions.

use lazyparse::{Channel, LogosLexer, TokenKind, TokenType};
use logos::Logos;

pub type ExprLexer = LogosLexer<Kind>;

pub const WHITESPACE: TokenType = TokenType(1);
pub const COMMENT: TokenType = TokenType(2);
pub const LET: TokenType = TokenType(3);
pub const ASSIGN: TokenType = TokenType(4);
pub const SEMI: TokenType = TokenType(5);
pub const PLUS: TokenType = TokenType(6);
pub const MINUS: TokenType = TokenType(7);
pub const STAR: TokenType = TokenType(8);
pub const SLASH: TokenType = TokenType(9);
pub const LPAREN: TokenType = TokenType(10);
pub const RPAREN: TokenType = TokenType(11);
pub const IDENT: TokenType = TokenType(12);
pub const NUMBER: TokenType = TokenType(13);

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"#[^\n]*", allow_greedy = true)]
    Comment,

    #[token("let")]
    Let,

    #[token("=")]
    Assign,

    #[token(";")]
    Semi,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+")]
    Number,
}

impl TokenKind for Kind {
    fn token_type(&self) -> TokenType {
        match self {
            Kind::Whitespace => WHITESPACE,
            Kind::Comment => COMMENT,
            Kind::Let => LET,
            Kind::Assign => ASSIGN,
            Kind::Semi => SEMI,
            Kind::Plus => PLUS,
            Kind::Minus => MINUS,
            Kind::Star => STAR,
            Kind::Slash => SLASH,
            Kind::LParen => LPAREN,
            Kind::RParen => RPAREN,
            Kind::Ident => IDENT,
            Kind::Number => NUMBER,
        }
    }

    fn channel(&self) -> Channel {
        match self {
            Kind::Whitespace | Kind::Comment => Channel::HIDDEN,
            _ => Channel::DEFAULT,
        }
    }
}

/// Display name of a token type, for diagnostics.
pub fn describe(ty: TokenType) -> &'static str {
    match ty {
        WHITESPACE => "whitespace",
        COMMENT => "comment",
        LET => "`let`",
        ASSIGN => "`=`",
        SEMI => "`;`",
        PLUS => "`+`",
        MINUS => "`-`",
        STAR => "`*`",
        SLASH => "`/`",
        LPAREN => "`(`",
        RPAREN => "`)`",
        IDENT => "identifier",
        NUMBER => "number",
        TokenType::EOF => "end of input",
        _ => "unknown token",
    }
}
