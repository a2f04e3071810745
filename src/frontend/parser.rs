//! Pratt-style recursive-descent parser: consumes a `Lexer`, emits an AST,
//! collects human-readable error messages instead of throwing.
//!
//! Rather than literal function-pointer tables (natural in the source's C
//! port), prefix/infix dispatch is expressed as a `match` over `TokenKind` in
//! `parse_prefix`/`infix_precedence`/`parse_infix` — a single tagged sum per
//! AST family needs no vtable, per the design notes this crate follows.

use std::rc::Rc;

use super::ast::{BlockStatement, Expression, Identifier, Program, Statement};
use super::lexer::Lexer;
use super::token::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

fn precedence_of(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
        TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Slash | TokenKind::Asterisk => Precedence::Product,
        TokenKind::Lparen => Precedence::Call,
        TokenKind::Lbracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

pub struct Parser {
    lexer: Lexer,
    current: Token,
    peek: Token,
    errors: Vec<String>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
            errors: Vec::new(),
        }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    fn advance(&mut self) {
        std::mem::swap(&mut self.current, &mut self.peek);
        self.peek = self.lexer.next_token();
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    fn current_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Advance past `kind` if `peek` matches it, else record a peek error.
    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_is(kind) {
            self.advance();
            true
        } else {
            self.peek_error(kind);
            false
        }
    }

    fn peek_error(&mut self, expected: TokenKind) {
        self.errors.push(format!(
            "expected next token to be {:?}, got {:?} instead",
            expected, self.peek.kind
        ));
    }

    fn no_prefix_parse_fn_error(&mut self, kind: TokenKind) {
        self.errors
            .push(format!("no prefix parse function for {kind:?} found"));
    }

    pub fn parse_program(&mut self) -> Program {
        tracing::debug!("parse start");
        let mut statements = Vec::new();
        while !self.current_is(TokenKind::Eof) {
            statements.push(self.parse_statement());
            self.advance();
        }
        tracing::debug!(
            statements = statements.len(),
            errors = self.errors.len(),
            "parse end"
        );
        Program { statements }
    }

    fn parse_statement(&mut self) -> Statement {
        match self.current.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Statement {
        let token = self.current.clone();

        if !self.expect_peek(TokenKind::Ident) {
            return Statement::Expression {
                token,
                expression: Expression::Missing,
            };
        }
        let name = Identifier {
            token: self.current.clone(),
            name: self.current.literal.clone(),
        };

        if !self.expect_peek(TokenKind::Assign) {
            return Statement::Expression {
                token,
                expression: Expression::Missing,
            };
        }
        self.advance();

        let value = self.parse_expression(Precedence::Lowest);

        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }

        Statement::Let { token, name, value }
    }

    fn parse_return_statement(&mut self) -> Statement {
        let token = self.current.clone();
        self.advance();

        let value = self.parse_expression(Precedence::Lowest);

        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }

        Statement::Return { token, value }
    }

    fn parse_expression_statement(&mut self) -> Statement {
        let token = self.current.clone();
        let expression = self.parse_expression(Precedence::Lowest);

        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }

        Statement::Expression { token, expression }
    }

    fn parse_block_statement(&mut self) -> BlockStatement {
        let token = self.current.clone();
        let mut statements = Vec::new();
        self.advance();

        while !self.current_is(TokenKind::Rbrace) && !self.current_is(TokenKind::Eof) {
            statements.push(self.parse_statement());
            self.advance();
        }

        BlockStatement { token, statements }
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Expression {
        let mut left = match self.parse_prefix() {
            Some(expr) => expr,
            None => {
                self.no_prefix_parse_fn_error(self.current.kind);
                return Expression::Missing;
            }
        };

        while !self.peek_is(TokenKind::Semicolon) && precedence < precedence_of(self.peek.kind) {
            self.advance();
            left = self.parse_infix(left);
        }

        left
    }

    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.current.kind {
            TokenKind::Ident => Some(Expression::Identifier(Identifier {
                token: self.current.clone(),
                name: self.current.literal.clone(),
            })),
            TokenKind::Int => Some(self.parse_integer_literal()),
            TokenKind::String => Some(Expression::StringLiteral {
                token: self.current.clone(),
                value: self.current.literal.clone(),
            }),
            TokenKind::Bang | TokenKind::Minus => Some(self.parse_prefix_expression()),
            TokenKind::True | TokenKind::False => Some(Expression::BooleanLiteral {
                token: self.current.clone(),
                value: self.current_is(TokenKind::True),
            }),
            TokenKind::Lparen => Some(self.parse_grouped_expression()),
            TokenKind::If => Some(self.parse_if_expression()),
            TokenKind::Function => Some(self.parse_function_literal()),
            TokenKind::Lbracket => Some(self.parse_array_literal()),
            TokenKind::Lbrace => Some(self.parse_hash_literal()),
            _ => None,
        }
    }

    fn parse_infix(&mut self, left: Expression) -> Expression {
        match self.current.kind {
            TokenKind::Lparen => self.parse_call_expression(left),
            TokenKind::Lbracket => self.parse_index_expression(left),
            _ => self.parse_infix_expression(left),
        }
    }

    fn parse_integer_literal(&mut self) -> Expression {
        let token = self.current.clone();
        match token.literal.parse::<i64>() {
            Ok(value) => Expression::IntegerLiteral { token, value },
            Err(_) => {
                self.errors
                    .push(format!("could not parse \"{}\" as integer", token.literal));
                Expression::Missing
            }
        }
    }

    fn parse_prefix_expression(&mut self) -> Expression {
        let token = self.current.clone();
        let op = token.literal.clone();
        self.advance();
        let right = Box::new(self.parse_expression(Precedence::Prefix));
        Expression::Prefix { token, op, right }
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Expression {
        let token = self.current.clone();
        let op = token.literal.clone();
        let precedence = precedence_of(token.kind);
        self.advance();
        let right = Box::new(self.parse_expression(precedence));
        Expression::Infix {
            token,
            left: Box::new(left),
            op,
            right,
        }
    }

    fn parse_grouped_expression(&mut self) -> Expression {
        self.advance();
        let expr = self.parse_expression(Precedence::Lowest);
        if !self.expect_peek(TokenKind::Rparen) {
            return Expression::Missing;
        }
        expr
    }

    fn parse_if_expression(&mut self) -> Expression {
        let token = self.current.clone();

        if !self.expect_peek(TokenKind::Lparen) {
            return Expression::Missing;
        }
        self.advance();
        let condition = Box::new(self.parse_expression(Precedence::Lowest));

        if !self.expect_peek(TokenKind::Rparen) {
            return Expression::Missing;
        }
        if !self.expect_peek(TokenKind::Lbrace) {
            return Expression::Missing;
        }
        let consequence = Rc::new(self.parse_block_statement());

        let alternative = if self.peek_is(TokenKind::Else) {
            self.advance();
            if !self.expect_peek(TokenKind::Lbrace) {
                return Expression::Missing;
            }
            Some(Rc::new(self.parse_block_statement()))
        } else {
            None
        };

        Expression::If {
            token,
            condition,
            consequence,
            alternative,
        }
    }

    fn parse_function_literal(&mut self) -> Expression {
        let token = self.current.clone();

        if !self.expect_peek(TokenKind::Lparen) {
            return Expression::Missing;
        }
        let parameters = Rc::new(self.parse_function_parameters());

        if !self.expect_peek(TokenKind::Lbrace) {
            return Expression::Missing;
        }
        let body = Rc::new(self.parse_block_statement());

        Expression::FunctionLiteral {
            token,
            parameters,
            body,
        }
    }

    fn parse_function_parameters(&mut self) -> Vec<Identifier> {
        let mut identifiers = Vec::new();

        if self.peek_is(TokenKind::Rparen) {
            self.advance();
            return identifiers;
        }

        self.advance();
        identifiers.push(Identifier {
            token: self.current.clone(),
            name: self.current.literal.clone(),
        });

        while self.peek_is(TokenKind::Comma) {
            self.advance();
            self.advance();
            identifiers.push(Identifier {
                token: self.current.clone(),
                name: self.current.literal.clone(),
            });
        }

        if !self.expect_peek(TokenKind::Rparen) {
            return identifiers;
        }

        identifiers
    }

    fn parse_call_expression(&mut self, function: Expression) -> Expression {
        let token = self.current.clone();
        let arguments = self.parse_expression_list(TokenKind::Rparen);
        Expression::Call {
            token,
            function: Box::new(function),
            arguments,
        }
    }

    fn parse_array_literal(&mut self) -> Expression {
        let token = self.current.clone();
        let elements = self.parse_expression_list(TokenKind::Rbracket);
        Expression::ArrayLiteral { token, elements }
    }

    fn parse_expression_list(&mut self, end: TokenKind) -> Vec<Expression> {
        let mut list = Vec::new();

        if self.peek_is(end) {
            self.advance();
            return list;
        }

        self.advance();
        list.push(self.parse_expression(Precedence::Lowest));

        while self.peek_is(TokenKind::Comma) {
            self.advance();
            self.advance();
            list.push(self.parse_expression(Precedence::Lowest));
        }

        if !self.expect_peek(end) {
            return list;
        }

        list
    }

    fn parse_index_expression(&mut self, left: Expression) -> Expression {
        let token = self.current.clone();
        self.advance();
        let index = Box::new(self.parse_expression(Precedence::Lowest));

        if !self.expect_peek(TokenKind::Rbracket) {
            return Expression::Missing;
        }

        Expression::Index {
            token,
            left: Box::new(left),
            index,
        }
    }

    fn parse_hash_literal(&mut self) -> Expression {
        let token = self.current.clone();
        let mut pairs = Vec::new();

        if self.peek_is(TokenKind::Rbrace) {
            self.advance();
            return Expression::HashLiteral { token, pairs };
        }

        loop {
            self.advance();
            let key = self.parse_expression(Precedence::Lowest);

            if !self.expect_peek(TokenKind::Colon) {
                return Expression::Missing;
            }
            self.advance();
            let value = self.parse_expression(Precedence::Lowest);

            pairs.push((key, value));

            if self.peek_is(TokenKind::Comma) {
                self.advance();
                if self.peek_is(TokenKind::Rbrace) {
                    self.errors
                        .push("trailing comma not allowed in hash literal".to_string());
                    return Expression::Missing;
                }
            } else {
                break;
            }
        }

        if !self.expect_peek(TokenKind::Rbrace) {
            return Expression::Missing;
        }

        Expression::HashLiteral { token, pairs }
    }
}
