//! Recording lexer and parser doubles shared by the integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::atomic::AtomicUsize;

use lazyparse::{
    BufferedTokenStream, Channel, CharStream, CommonToken, ConstructError, Constructor,
    ErrorListener, ErrorListeners, Grammar, Lexer, ListenerId, Parser, ParserType,
    PredictionMode, RecognitionError, Span, Token, TokenType,
};

pub const TOK_A: TokenType = TokenType(1);
pub const TOK_B: TokenType = TokenType(2);
pub const WS: TokenType = TokenType(3);
pub const TOK_C: TokenType = TokenType(4);

/// What a [`RecordingLexer`] observed.
#[derive(Debug, Default)]
pub struct LexerLog {
    pub set_input_calls: Cell<usize>,
    pub next_token_calls: Cell<usize>,
    /// Address of the buffer handed over in the last `set_input`.
    pub input_ptr: Cell<Option<usize>>,
}

/// `A`, `B` and `C` lex to tokens, spaces to hidden whitespace, anything
/// else fails.
pub struct RecordingLexer {
    input: Vec<char>,
    pos: usize,
    eof_channel: Channel,
    listeners: ErrorListeners,
    pub log: Rc<LexerLog>,
}

impl RecordingLexer {
    pub fn new() -> Self {
        Self {
            input: Vec::new(),
            pos: 0,
            eof_channel: Channel::DEFAULT,
            listeners: ErrorListeners::new(),
            log: Rc::new(LexerLog::default()),
        }
    }

    /// Emits the end-of-file token on `channel` instead of the default one.
    pub fn with_eof_channel(mut self, channel: Channel) -> Self {
        self.eof_channel = channel;
        self
    }
}

impl Lexer for RecordingLexer {
    type Token = CommonToken;

    fn set_input(&mut self, input: CharStream) {
        self.log.set_input_calls.set(self.log.set_input_calls.get() + 1);
        self.log.input_ptr.set(Some(input.as_str().as_ptr() as usize));
        self.input = input.as_str().chars().collect();
        self.pos = 0;
    }

    fn next_token(&mut self) -> Result<CommonToken, RecognitionError> {
        self.log.next_token_calls.set(self.log.next_token_calls.get() + 1);
        let start = self.pos;
        let Some(&c) = self.input.get(start) else {
            return Ok(CommonToken::eof(start).with_channel(self.eof_channel));
        };
        self.pos += 1;
        let span = Span::new(start, self.pos);
        match c {
            'A' => Ok(CommonToken::new(TOK_A, "A", span)),
            'B' => Ok(CommonToken::new(TOK_B, "B", span)),
            'C' => Ok(CommonToken::new(TOK_C, "C", span)),
            ' ' => Ok(CommonToken::new(WS, " ", span).with_channel(Channel::HIDDEN)),
            other => {
                let err = RecognitionError::new(format!("unexpected `{other}`"), span)
                    .with_offending(other.to_string());
                self.listeners.syntax_error(&err);
                Err(err)
            }
        }
    }

    fn listeners(&self) -> &ErrorListeners {
        &self.listeners
    }

    fn listeners_mut(&mut self) -> &mut ErrorListeners {
        &mut self.listeners
    }
}

/// Calls a scripted parser made, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Construct,
    RemoveListener(ListenerId),
    SetMode { mode: PredictionMode, accepted: bool },
    Reset,
    RootRule(PredictionMode),
}

thread_local! {
    static EVENTS: RefCell<Vec<Event>> = const { RefCell::new(Vec::new()) };
}

fn record(event: Event) {
    EVENTS.with(|events| events.borrow_mut().push(event));
}

/// Drains the events recorded on this thread.
pub fn take_events() -> Vec<Event> {
    EVENTS.with(|events| events.take())
}

/// Per-test parser behavior. Each script is its own parser type, so each
/// one gets its own constructor cache entry.
pub trait Script: 'static {
    const NAME: &'static str;

    /// Counts `ParserType::constructor` lookups, process-wide.
    fn lookups() -> &'static AtomicUsize;

    fn constructible() -> bool {
        true
    }

    fn construct_fails() -> bool {
        false
    }

    /// Refuse `Sll` until the parser has been reset once.
    fn reject_fast_mode() -> bool {
        false
    }
}

macro_rules! script {
    ($name:ident $(, $method:ident => $value:expr)* $(,)?) => {
        pub struct $name;

        impl $crate::support::Script for $name {
            const NAME: &'static str = stringify!($name);

            fn lookups() -> &'static ::std::sync::atomic::AtomicUsize {
                static LOOKUPS: ::std::sync::atomic::AtomicUsize =
                    ::std::sync::atomic::AtomicUsize::new(0);
                &LOOKUPS
            }

            $(fn $method() -> bool { $value })*
        }
    };
}

/// AST node produced by [`ScriptedParser::program`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: String,
    pub children: Vec<Node>,
}

impl Node {
    pub fn leaf(kind: &str) -> Self {
        Self {
            kind: kind.to_owned(),
            children: Vec::new(),
        }
    }

    pub fn program(children: Vec<Node>) -> Self {
        Self {
            kind: "Program".to_owned(),
            children,
        }
    }
}

/// Parses `(A | B)* EOF`; `C` is a syntax error in both modes.
///
/// In `Sll` mode a `B B` pair cannot be decided and bails out, which forces
/// the exact-mode retry.
pub struct ScriptedParser<S> {
    input: Rc<BufferedTokenStream<CommonToken>>,
    listeners: ErrorListeners,
    mode: PredictionMode,
    was_reset: bool,
    errors: usize,
    _script: PhantomData<S>,
}

impl<S: Script> ScriptedParser<S> {
    pub fn program(&mut self) -> Result<Node, RecognitionError> {
        record(Event::RootRule(self.mode));
        let mut children = Vec::new();
        loop {
            let ty = self.input.la(1);
            if ty == TokenType::EOF {
                break;
            } else if ty == TOK_A {
                self.input.consume();
                children.push(Node::leaf("A"));
            } else if ty == TOK_B {
                if self.mode == PredictionMode::Sll && self.input.la(2) == TOK_B {
                    return Err(self.error("cannot decide `B B` with one token"));
                }
                self.input.consume();
                children.push(Node::leaf("B"));
            } else {
                return Err(self.error("unexpected token"));
            }
        }
        Ok(Node::program(children))
    }

    fn error(&mut self, message: &str) -> RecognitionError {
        let span = self.input.lt(1).map_or(Span::default(), Token::span);
        let err = RecognitionError::new(message, span);
        if self.mode == PredictionMode::Sll {
            return err.in_prediction();
        }
        self.errors += 1;
        self.listeners.syntax_error(&err);
        err
    }
}

impl<S: Script> Parser for ScriptedParser<S> {
    type Token = CommonToken;

    fn token_stream(&self) -> &Rc<BufferedTokenStream<CommonToken>> {
        &self.input
    }

    fn listeners(&self) -> &ErrorListeners {
        &self.listeners
    }

    fn listeners_mut(&mut self) -> &mut ErrorListeners {
        &mut self.listeners
    }

    fn prediction_mode(&self) -> PredictionMode {
        self.mode
    }

    fn set_prediction_mode(&mut self, mode: PredictionMode) -> Result<(), RecognitionError> {
        let accepted = !(mode == PredictionMode::Sll && S::reject_fast_mode() && !self.was_reset);
        record(Event::SetMode { mode, accepted });
        if !accepted {
            return Err(RecognitionError::new("fast mode unavailable", Span::default()));
        }
        self.mode = mode;
        Ok(())
    }

    fn reset(&mut self) {
        record(Event::Reset);
        self.input.seek(0);
        self.errors = 0;
        self.was_reset = true;
    }

    fn syntax_errors(&self) -> usize {
        self.errors
    }

    fn remove_error_listener(&mut self, id: ListenerId) -> bool {
        record(Event::RemoveListener(id));
        self.listeners.remove(id)
    }
}

impl<S: Script> ParserType for ScriptedParser<S> {
    const NAME: &'static str = S::NAME;

    fn constructor() -> Option<Constructor<Self>> {
        S::lookups().fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if !S::constructible() {
            return None;
        }
        Some(|input| {
            if S::construct_fails() {
                return Err(ConstructError::from("scripted constructor failure"));
            }
            record(Event::Construct);
            Ok(ScriptedParser {
                input,
                listeners: ErrorListeners::new(),
                mode: PredictionMode::Ll,
                was_reset: false,
                errors: 0,
                _script: PhantomData,
            })
        })
    }
}

/// Grammar binding [`RecordingLexer`] to `ScriptedParser<S>`.
pub struct Using<S>(PhantomData<S>);

impl<S: Script> Grammar for Using<S> {
    type Lexer = RecordingLexer;
    type Parser = ScriptedParser<S>;
    type Ast = Node;

    fn root_rule(parser: &mut ScriptedParser<S>) -> Result<Node, RecognitionError> {
        parser.program()
    }
}

/// Counts syntax errors it receives.
#[derive(Debug, Default)]
pub struct CountingListener(pub Cell<usize>);

impl ErrorListener for CountingListener {
    fn syntax_error(&self, _: &RecognitionError) {
        self.0.set(self.0.get() + 1);
    }
}
