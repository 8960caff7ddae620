//! The lazy tokenize-then-parse facade.
//!
//! A [`Tokenizer`] owns one source text and one lexer. Nothing runs at
//! construction: the first call to [`Tokenizer::read_tokens`] or
//! [`Tokenizer::read_ast`] lexes the whole input into a
//! [`BufferedTokenStream`], and the first `read_ast` parses that same stream.
//! Both results are kept for the tokenizer's lifetime.
//!
//! # Lifecycle
//!
//! ```text
//! Fresh --(read_tokens / read_ast / token_stream)--> Lexed --(read_ast)--> Parsed
//! ```
//!
//! The source text is handed to the lexer on the `Fresh -> Lexed`
//! transition and is not kept afterwards.
//!
//! # Prediction
//!
//! Parsing first runs in [`PredictionMode::Sll`]. If the parser refuses the
//! fast mode, or the root rule fails under it, the parser is reset and the
//! root rule runs once more in [`PredictionMode::Ll`]. An error from the
//! exact run is returned as [`Error::Parse`].
//!
//! # Threading
//!
//! A tokenizer is not `Sync`. Only the [`ConstructorCache`] is shared between
//! tokenizers.

use core::cell::{Ref, RefCell, RefMut};
use core::fmt;
use std::rc::Rc;
use std::sync::Arc;

use log::{debug, trace};

use crate::buffered::BufferedTokenStream;
use crate::cache::ConstructorCache;
use crate::char_stream::CharStream;
use crate::config::TokenizerConfig;
use crate::error::{Error, RecognitionError};
use crate::lazy::LazyCell;
use crate::listeners::ListenerId;
use crate::token::Channel;
use crate::traits::{Grammar, GrammarToken, Lexer, Parser, ParserType, PredictionMode, Token};

type SharedStream<G> = Rc<BufferedTokenStream<GrammarToken<G>>>;

/// How far a [`Tokenizer`] has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenizerState {
    /// Nothing has been read yet; the source text is still held.
    Fresh,
    /// The token stream is buffered.
    Lexed,
    /// The AST is built.
    Parsed,
}

/// Lazy lexer + parser front end for one source text.
///
/// # Example
///
/// ```ignore
/// let tokenizer = Tokenizer::<ExprGrammar>::new("let x = 1;", ExprLexer::new());
///
/// for token in tokenizer.read_tokens()? {
///     println!("{token}");
/// }
/// let program = tokenizer.read_ast()?; // reuses the tokens above
/// ```
pub struct Tokenizer<G: Grammar> {
    source: RefCell<Option<String>>,
    source_name: Option<String>,
    lexer: RefCell<G::Lexer>,
    token_stream: LazyCell<SharedStream<G>>,
    tokens: LazyCell<SharedStream<G>>,
    ast: LazyCell<Rc<G::Ast>>,
    parser: RefCell<Option<G::Parser>>,
    config: TokenizerConfig,
    cache: Arc<ConstructorCache>,
}

impl<G: Grammar> Tokenizer<G> {
    /// Creates a tokenizer with the default configuration and the global
    /// constructor cache.
    pub fn new(source: impl Into<String>, lexer: G::Lexer) -> Self {
        Self::from_parts(
            source.into(),
            None,
            lexer,
            TokenizerConfig::DEFAULT,
            ConstructorCache::global(),
        )
    }

    pub fn builder() -> TokenizerBuilder<G> {
        TokenizerBuilder::new()
    }

    fn from_parts(
        source: String,
        source_name: Option<String>,
        lexer: G::Lexer,
        config: TokenizerConfig,
        cache: Arc<ConstructorCache>,
    ) -> Self {
        Self {
            source: RefCell::new(Some(source)),
            source_name,
            lexer: RefCell::new(lexer),
            token_stream: LazyCell::new(),
            tokens: LazyCell::new(),
            ast: LazyCell::new(),
            parser: RefCell::new(None),
            config,
            cache,
        }
    }

    /// Returns every token including the trailing end-of-file token.
    ///
    /// The first call lexes the source if needed and, unless
    /// [`TokenizerConfig::hide_eof`] is off, moves a trailing
    /// [`CommonToken`](crate::CommonToken) end-of-file token to
    /// [`Channel::HIDDEN`]. Later calls return the same slice.
    pub fn read_tokens(&self) -> Result<&[GrammarToken<G>], Error> {
        let stream = self.tokens.get_or_compute(|| self.compute_tokens())?;
        Ok(stream.tokens())
    }

    /// Returns the root of the syntax tree, parsing on first call.
    ///
    /// Every call returns a handle to the same root.
    pub fn read_ast(&self) -> Result<Rc<G::Ast>, Error> {
        self.ast.get_or_compute(|| self.compute_ast()).map(Rc::clone)
    }

    /// Returns the buffered token stream rewound to position 0.
    pub fn token_stream(&self) -> Result<SharedStream<G>, Error> {
        let stream = self
            .token_stream
            .get_or_compute(|| self.compute_token_stream())?;
        stream.seek(0);
        Ok(Rc::clone(stream))
    }

    /// The parser used by the last parse pass, if one ran.
    ///
    /// Useful to inspect [`Parser::syntax_errors`] or the final
    /// [`Parser::prediction_mode`] after [`read_ast`](Self::read_ast).
    /// Returns `None` while a [`parser_mut`](Self::parser_mut) guard is
    /// alive. A parse pass started while the returned guard is alive fails
    /// with [`Error::ParserBorrowed`].
    pub fn parser(&self) -> Option<Ref<'_, G::Parser>> {
        let slot = self.parser.try_borrow().ok()?;
        Ref::filter_map(slot, Option::as_ref).ok()
    }

    /// Returns `None` while any other parser guard is alive.
    pub fn parser_mut(&self) -> Option<RefMut<'_, G::Parser>> {
        let slot = self.parser.try_borrow_mut().ok()?;
        RefMut::filter_map(slot, Option::as_mut).ok()
    }

    /// The lexer, e.g. to check its listeners after a read.
    pub fn lexer(&mut self) -> &G::Lexer {
        self.lexer.get_mut()
    }

    /// Mutable access to the lexer, e.g. to add error listeners before the
    /// first read.
    pub fn lexer_mut(&mut self) -> &mut G::Lexer {
        self.lexer.get_mut()
    }

    pub fn state(&self) -> TokenizerState {
        if self.ast.is_computed() {
            TokenizerState::Parsed
        } else if self.token_stream.is_computed() {
            TokenizerState::Lexed
        } else {
            TokenizerState::Fresh
        }
    }

    /// Whether the tokenizer still holds its source text.
    pub fn has_source(&self) -> bool {
        self.source.borrow().is_some()
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<ConstructorCache> {
        &self.cache
    }

    fn compute_token_stream(&self) -> Result<SharedStream<G>, Error> {
        let source = self.source.borrow_mut().take().ok_or(Error::SourceConsumed)?;
        let mut input = CharStream::from_string(source);
        if let Some(name) = &self.source_name {
            input = input.with_source_name(name.as_str());
        }

        // the accessors take `&mut self`, so no guard outlives into this call
        let mut lexer = self.lexer.borrow_mut();
        lexer.set_input(input);
        if !self.config.keep_console_listeners {
            lexer.remove_error_listener(ListenerId::CONSOLE);
        }

        let stream = BufferedTokenStream::fill_limited(&mut *lexer, self.config.max_tokens)?;
        debug!(
            "lexed {} tokens from {}",
            stream.len(),
            self.source_name.as_deref().unwrap_or("<string>")
        );
        Ok(Rc::new(stream))
    }

    fn compute_tokens(&self) -> Result<SharedStream<G>, Error> {
        let stream = self.token_stream()?;
        if self.config.hide_eof {
            let last = stream.tokens().last().filter(|token| token.is_eof());
            if let Some(eof) = last.and_then(Token::as_common) {
                eof.set_channel(Channel::HIDDEN);
            }
        }
        Ok(stream)
    }

    fn compute_ast(&self) -> Result<Rc<G::Ast>, Error> {
        let mut slot = self
            .parser
            .try_borrow_mut()
            .map_err(|_| Error::ParserBorrowed)?;
        let stream = self.token_stream()?;
        let mut parser = self.cache.build::<G::Parser>(stream)?;
        if !self.config.keep_console_listeners {
            parser.remove_error_listener(ListenerId::CONSOLE);
        }

        let result = self.parse(&mut parser);
        debug!(
            "parsed with `{}` in {:?} mode: {}",
            <G::Parser as ParserType>::NAME,
            parser.prediction_mode(),
            if result.is_ok() { "ok" } else { "failed" }
        );
        *slot = Some(parser);
        result.map(Rc::new).map_err(Error::Parse)
    }

    fn parse(&self, parser: &mut G::Parser) -> Result<G::Ast, RecognitionError> {
        if self.config.prediction == PredictionMode::Sll {
            let fast = match parser.set_prediction_mode(PredictionMode::Sll) {
                Ok(()) => G::root_rule(parser),
                Err(err) => Err(err),
            };
            match fast {
                Ok(ast) => return Ok(ast),
                Err(err) => trace!("fast prediction failed, retrying in exact mode: {err}"),
            }
            parser.reset();
        }
        parser.set_prediction_mode(PredictionMode::Ll)?;
        G::root_rule(parser)
    }
}

impl<G: Grammar> fmt::Debug for Tokenizer<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("state", &self.state())
            .field("has_source", &self.has_source())
            .field("source_name", &self.source_name)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for a [`Tokenizer`] with non-default settings.
///
/// # Example
///
/// ```ignore
/// let tokenizer = Tokenizer::<ExprGrammar>::builder()
///     .source(text)
///     .source_name("main.expr")
///     .lexer(ExprLexer::new())
///     .config(TokenizerConfig::new().with_max_tokens(100_000))
///     .build()?;
/// ```
pub struct TokenizerBuilder<G: Grammar> {
    source: Option<String>,
    source_name: Option<String>,
    lexer: Option<G::Lexer>,
    config: TokenizerConfig,
    cache: Option<Arc<ConstructorCache>>,
}

impl<G: Grammar> TokenizerBuilder<G> {
    pub fn new() -> Self {
        Self {
            source: None,
            source_name: None,
            lexer: None,
            config: TokenizerConfig::DEFAULT,
            cache: None,
        }
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Name passed to the lexer's [`CharStream`] for diagnostics.
    pub fn source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    pub fn lexer(mut self, lexer: G::Lexer) -> Self {
        self.lexer = Some(lexer);
        self
    }

    pub fn config(mut self, config: TokenizerConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses `cache` instead of [`ConstructorCache::global`].
    pub fn cache(mut self, cache: Arc<ConstructorCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn build(self) -> Result<Tokenizer<G>, Error> {
        let source = self.source.ok_or(Error::MissingSource)?;
        let lexer = self.lexer.ok_or(Error::MissingLexer)?;
        Ok(Tokenizer::from_parts(
            source,
            self.source_name,
            lexer,
            self.config,
            self.cache.unwrap_or_else(ConstructorCache::global),
        ))
    }
}

impl<G: Grammar> Default for TokenizerBuilder<G> {
    fn default() -> Self {
        Self::new()
    }
}
