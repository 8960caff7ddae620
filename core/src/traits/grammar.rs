use super::lexer::Lexer;
use super::parser::ParserType;
use crate::error::RecognitionError;

/// Token type shared by a grammar's lexer and parser.
pub type GrammarToken<G> = <<G as Grammar>::Lexer as Lexer>::Token;

/// Everything language-specific a [`Tokenizer`](crate::Tokenizer) needs.
///
/// A grammar names its lexer, its parser, and the rule that produces the
/// root of the tree. It is usually a unit struct.
pub trait Grammar: 'static {
    type Lexer: Lexer;

    /// Parser type; also the key into the constructor cache.
    type Parser: ParserType<Token = <Self::Lexer as Lexer>::Token>;

    /// Root node produced by [`Grammar::root_rule`].
    type Ast;

    /// Invokes the grammar's root rule on a freshly configured parser.
    fn root_rule(parser: &mut Self::Parser) -> Result<Self::Ast, RecognitionError>;
}
