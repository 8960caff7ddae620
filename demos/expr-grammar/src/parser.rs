//! Recursive-descent parser over a buffered token stream.
//!
//! Statement prediction is where the two modes differ. In
//! [`PredictionMode::Sll`] the parser decides with one token of lookahead
//! and treats every statement that starts with an identifier as an
//! expression statement; in [`PredictionMode::Ll`] it also looks at the
//! second token to recognize assignments.
//!
//! Nesting through unary minus and parentheses is capped at
//! [`ExprParser::max_depth`] levels; deeper input is a syntax error.

use std::rc::Rc;

use lazyparse::{
    BufferedTokenStream, CommonToken, Constructor, ErrorListeners, Parser, ParserType,
    PredictionMode, RecognitionError, RecursionGuard, Span, Token, TokenType,
};
use log::trace;

use crate::ast::{BinOp, Expr, Program, Statement};
use crate::lexer::{
    ASSIGN, IDENT, LET, LPAREN, MINUS, NUMBER, PLUS, RPAREN, SEMI, SLASH, STAR, describe,
};

pub struct ExprParser {
    input: Rc<BufferedTokenStream<CommonToken>>,
    listeners: ErrorListeners,
    mode: PredictionMode,
    errors: usize,
    depth: RecursionGuard,
    max_depth: usize,
}

impl ExprParser {
    pub fn new(input: Rc<BufferedTokenStream<CommonToken>>) -> Self {
        Self {
            input,
            listeners: ErrorListeners::new(),
            mode: PredictionMode::Ll,
            errors: 0,
            depth: RecursionGuard::new(),
            max_depth: RecursionGuard::DEFAULT_LIMIT,
        }
    }

    /// Sets the nesting limit. Use `usize::MAX` to disable.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// `program := statement* EOF`
    pub fn program(&mut self) -> Result<Program, RecognitionError> {
        let start = self.current_span();
        let mut statements = Vec::new();
        while self.input.la(1) != TokenType::EOF {
            statements.push(self.statement()?);
        }
        let end = self.current_span();
        Ok(Program {
            statements,
            span: start.join(&end),
        })
    }

    fn statement(&mut self) -> Result<Statement, RecognitionError> {
        let start = self.current_span();
        match self.input.la(1) {
            LET => {
                self.input.consume();
                let name = self.expect(IDENT)?.text().to_owned();
                self.expect(ASSIGN)?;
                let value = self.expr()?;
                let end = self.expect(SEMI)?.span();
                Ok(Statement::Let {
                    name,
                    value,
                    span: start.join(&end),
                })
            }
            IDENT if self.mode == PredictionMode::Ll && self.input.la(2) == ASSIGN => {
                let name = self.expect(IDENT)?.text().to_owned();
                self.expect(ASSIGN)?;
                let value = self.expr()?;
                let end = self.expect(SEMI)?.span();
                Ok(Statement::Assign {
                    name,
                    value,
                    span: start.join(&end),
                })
            }
            _ => {
                let value = self.expr()?;
                let end = self.expect(SEMI)?.span();
                Ok(Statement::Expr {
                    value,
                    span: start.join(&end),
                })
            }
        }
    }

    fn expr(&mut self) -> Result<Expr, RecognitionError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.input.la(1) {
                PLUS => BinOp::Add,
                MINUS => BinOp::Sub,
                _ => return Ok(lhs),
            };
            self.input.consume();
            let rhs = self.term()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn term(&mut self) -> Result<Expr, RecognitionError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.input.la(1) {
                STAR => BinOp::Mul,
                SLASH => BinOp::Div,
                _ => return Ok(lhs),
            };
            self.input.consume();
            let rhs = self.unary()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn unary(&mut self) -> Result<Expr, RecognitionError> {
        let span = self.current_span();
        if let Err(err) = self.depth.enter(self.max_depth, span) {
            return Err(self.report(err));
        }
        let result = self.unary_inner();
        self.depth.exit();
        result
    }

    fn unary_inner(&mut self) -> Result<Expr, RecognitionError> {
        if self.input.la(1) == MINUS {
            self.input.consume();
            return Ok(Expr::Neg(Box::new(self.unary()?)));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, RecognitionError> {
        match self.input.la(1) {
            NUMBER => {
                let token = self.expect(NUMBER)?;
                match token.text().parse::<i64>() {
                    Ok(value) => Ok(Expr::Number(value)),
                    Err(_) => Err(self.report(
                        RecognitionError::new("integer literal out of range", token.span())
                            .with_offending(token.text()),
                    )),
                }
            }
            IDENT => Ok(Expr::Ident(self.expect(IDENT)?.text().to_owned())),
            LPAREN => {
                self.input.consume();
                let inner = self.expr()?;
                self.expect(RPAREN)?;
                Ok(inner)
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    fn expect(&mut self, ty: TokenType) -> Result<CommonToken, RecognitionError> {
        if self.input.la(1) == ty {
            if let Some(token) = self.input.consume() {
                return Ok(token.clone());
            }
        }
        Err(self.unexpected(describe(ty)))
    }

    fn unexpected(&mut self, expected: &str) -> RecognitionError {
        let found = self.input.lt(1);
        let span = found.map_or(Span::default(), Token::span);
        let message = format!(
            "expected {expected}, found {}",
            describe(self.input.la(1))
        );
        let mut err = RecognitionError::new(message, span);
        if let Some(token) = found {
            err = err.with_offending(token.text());
        }
        self.report(err)
    }

    /// Fast mode bails silently; exact mode counts and reports.
    fn report(&mut self, err: RecognitionError) -> RecognitionError {
        if self.mode == PredictionMode::Sll {
            trace!("bailing out of fast prediction: {err}");
            return err.in_prediction();
        }
        self.errors += 1;
        self.listeners.syntax_error(&err);
        err
    }

    fn current_span(&self) -> Span {
        self.input.lt(1).map_or(Span::default(), Token::span)
    }
}

impl Parser for ExprParser {
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
        self.mode = mode;
        Ok(())
    }

    fn reset(&mut self) {
        self.input.seek(0);
        self.errors = 0;
        self.depth.reset();
    }

    fn syntax_errors(&self) -> usize {
        self.errors
    }
}

impl ParserType for ExprParser {
    const NAME: &'static str = "ExprParser";

    fn constructor() -> Option<Constructor<Self>> {
        Some(|input| Ok(ExprParser::new(input)))
    }
}
