mod expr;

use cursor::Line;
use errors::Diagnostics;
use log::debug;
use scanner::{Token, TokenType};

pub use expr::{Expr, LiteralValue};
use TokenType::*;

pub type Result<'a, T> = std::result::Result<T, ParseError<'a>>;

pub type ParseErrors<'a> = Diagnostics<ParseError<'a>>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("[line {}] Error at {}: {kind}", .token.line, location(.token))]
pub struct ParseError<'a> {
    pub kind: ParseErrorKind,
    pub token: Token<'a>,
}

fn location(token: &Token) -> String {
    match token.ty {
        Eof => "end".to_string(),
        _ => format!("'{}'", token.lexeme),
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    #[error("Expect expression.")]
    ExpectedExpression,
    #[error("Unmatched parentheses.")]
    UnmatchedParenthesis,
    #[error("{0}")]
    Expected(&'static str),
    #[error("Expression nested too deeply.")]
    TooDeep,
}

impl ParseErrorKind {
    fn at<'a>(self, token: &Token<'a>) -> ParseError<'a> {
        ParseError { kind: self, token: *token }
    }
}

/// Deepest nesting of operators and groupings accepted in one expression.
///
/// Evaluation and printing recurse along the tree, at most this many levels.
pub const MAX_DEPTH: usize = 255;

/// Recursive descent parser, one method per precedence level.
///
/// ```text
/// expression → equality
/// equality   → comparison ( ( "!=" | "==" ) comparison )*
/// comparison → term ( ( ">" | ">=" | "<" | "<=" ) term )*
/// term       → factor ( ( "-" | "+" ) factor )*
/// factor     → unary ( ( "/" | "*" ) unary )*
/// unary      → ( "!" | "-" ) unary | primary
/// primary    → NUMBER | STRING | "true" | "false" | "nil" | "(" expression ")"
/// ```
#[derive(Debug)]
pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    current: usize,
    /// Unary operators and groupings enclosing the token being parsed.
    depth: usize,
}

/// A subtree and its height, a literal has height 0.
struct Parsed<'a> {
    expr: Expr<'a>,
    height: usize,
}

impl<'a> Parsed<'a> {
    fn leaf(value: LiteralValue<'a>) -> Self {
        Self { expr: Expr::Literal(value), height: 0 }
    }
}

impl<'a> Parser<'a> {
    pub fn new(mut tokens: Vec<Token<'a>>) -> Self {
        // The cursor logic relies on the stream being terminated by EOF
        if tokens.last().map(|t| t.ty) != Some(Eof) {
            let line = tokens.last().map_or(Line(1), |t| t.line);
            tokens.push(Token::eof(line));
        }
        Self { tokens, current: 0, depth: 0 }
    }

    /// Parses top-level expressions until EOF.
    ///
    /// A failed expression is dropped and its diagnostic recorded, then parsing
    /// continues with the next token.
    pub fn parse(mut self) -> (Vec<Expr<'a>>, ParseErrors<'a>) {
        let mut exprs = Vec::new();
        let mut errors = Diagnostics::new();

        while !self.is_at_end() {
            match self.expression() {
                Ok(Parsed { expr, height }) => {
                    debug!("Parsed {} (height {})", expr, height);
                    exprs.push(expr);
                }
                Err(e) => {
                    debug!("{}", e);
                    errors.push(e);
                }
            }
        }

        (exprs, errors)
    }

    /// Parses exactly one expression that has to span the whole token stream.
    pub fn parse_expression(mut self) -> Result<'a, Expr<'a>> {
        let Parsed { expr, .. } = self.expression()?;
        self.consume(Eof, "Expect end of expression.")?;
        Ok(expr)
    }

    fn expression(&mut self) -> Result<'a, Parsed<'a>> {
        self.equality()
    }

    fn equality(&mut self) -> Result<'a, Parsed<'a>> {
        let mut expr = self.comparison()?;

        while let Some(operator) = self.match_any(&[BangEqual, EqualEqual]) {
            let right = self.comparison()?;
            expr = self.binary(expr, operator, right)?;
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> Result<'a, Parsed<'a>> {
        let mut expr = self.term()?;

        while let Some(operator) = self.match_any(&[Greater, GreaterEqual, Less, LessEqual]) {
            let right = self.term()?;
            expr = self.binary(expr, operator, right)?;
        }
        Ok(expr)
    }

    fn term(&mut self) -> Result<'a, Parsed<'a>> {
        let mut expr = self.factor()?;

        while let Some(operator) = self.match_any(&[Minus, Plus]) {
            let right = self.factor()?;
            expr = self.binary(expr, operator, right)?;
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Result<'a, Parsed<'a>> {
        let mut expr = self.unary()?;

        while let Some(operator) = self.match_any(&[Slash, Star]) {
            let right = self.unary()?;
            expr = self.binary(expr, operator, right)?;
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<'a, Parsed<'a>> {
        let Some(operator) = self.match_any(&[Bang, Minus]) else {
            return self.primary();
        };

        let right = self.nested(&operator, Self::unary)?;
        Ok(Parsed {
            height: self.taller(&operator, right.height)?,
            expr: Expr::Unary { operator, right: Box::new(right.expr) },
        })
    }

    fn primary(&mut self) -> Result<'a, Parsed<'a>> {
        // Consumed even on failure, so the top-level loop always makes progress
        let token = self.advance();
        match (token.ty, token.literal) {
            (False, _) => Ok(Parsed::leaf(LiteralValue::Boolean(false))),
            (True, _) => Ok(Parsed::leaf(LiteralValue::Boolean(true))),
            (Nil, _) => Ok(Parsed::leaf(LiteralValue::Nil)),
            (Number | Str, Some(literal)) => Ok(Parsed::leaf(literal.into())),
            (LeftParen, _) => {
                let inner = self.nested(&token, Self::expression)?;

                if !self.check(RightParen) {
                    return Err(ParseErrorKind::UnmatchedParenthesis.at(&self.previous()));
                }
                self.advance();

                Ok(Parsed {
                    height: self.taller(&token, inner.height)?,
                    expr: Expr::Grouping(Box::new(inner.expr)),
                })
            }
            _ => Err(ParseErrorKind::ExpectedExpression.at(&token)),
        }
    }

    fn binary(
        &self,
        left: Parsed<'a>,
        operator: Token<'a>,
        right: Parsed<'a>,
    ) -> Result<'a, Parsed<'a>> {
        Ok(Parsed {
            height: self.taller(&operator, left.height.max(right.height))?,
            expr: Expr::Binary {
                left: Box::new(left.expr),
                operator,
                right: Box::new(right.expr),
            },
        })
    }

    /// Height of a node whose tallest child is `child` high.
    fn taller(&self, token: &Token<'a>, child: usize) -> Result<'a, usize> {
        match child + 1 {
            height if height > MAX_DEPTH => Err(ParseErrorKind::TooDeep.at(token)),
            height => Ok(height),
        }
    }

    /// Runs `parse` one level further down, refusing to go past `MAX_DEPTH`.
    fn nested(
        &mut self,
        token: &Token<'a>,
        parse: fn(&mut Self) -> Result<'a, Parsed<'a>>,
    ) -> Result<'a, Parsed<'a>> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseErrorKind::TooDeep.at(token));
        }

        self.depth += 1;
        let parsed = parse(self);
        self.depth -= 1;
        parsed
    }

    fn consume(&mut self, ty: TokenType, message: &'static str) -> Result<'a, Token<'a>> {
        if self.check(ty) {
            Ok(self.advance())
        } else {
            Err(ParseErrorKind::Expected(message).at(&self.peek()))
        }
    }

    fn match_any(&mut self, types: &[TokenType]) -> Option<Token<'a>> {
        types.iter().any(|ty| self.check(*ty)).then(|| self.advance())
    }

    fn check(&self, ty: TokenType) -> bool {
        self.peek().ty == ty
    }

    fn peek(&self) -> Token<'a> {
        self.tokens[self.current]
    }

    fn previous(&self) -> Token<'a> {
        self.tokens[self.current.saturating_sub(1)]
    }

    fn is_at_end(&self) -> bool {
        self.check(Eof)
    }

    /// Never moves past EOF.
    fn advance(&mut self) -> Token<'a> {
        let token = self.peek();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }
}
