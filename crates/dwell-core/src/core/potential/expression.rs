//! Force-expression syntax shared with the dynamics engine.
//!
//! The engine consumes a force as a scalar expression string over the named
//! coordinates `x`, `y`, `z` (caret powers, `exp`, the four arithmetic
//! operators, unary minus). This module owns that syntax end to end:
//! tokenizing, parsing into an [`Expr`] tree, pointwise evaluation, and
//! symbolic partial differentiation so an integrator can derive forces as
//! the negative gradient without finite differencing.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ExpressionError {
    #[error("Unexpected character '{ch}' at byte {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("Malformed numeric literal starting at byte {position}")]
    MalformedNumber { position: usize },

    #[error("Expected {expected} at byte {position}")]
    UnexpectedToken {
        expected: &'static str,
        position: usize,
    },

    #[error("Expression ended unexpectedly")]
    UnexpectedEnd,

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Unknown coordinate: {0} (expected x, y, or z)")]
    UnknownCoordinate(String),

    #[error("Cannot differentiate a power with a non-constant exponent")]
    NonConstantExponent,
}

/// A named coordinate the engine exposes to force expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coordinate {
    X,
    Y,
    Z,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::X => write!(f, "x"),
            Coordinate::Y => write!(f, "y"),
            Coordinate::Z => write!(f, "z"),
        }
    }
}

/// A parsed scalar expression over the coordinates `x`, `y`, `z`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(f64),
    Coord(Coordinate),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Neg(Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Exp(Box<Expr>),
}

impl Expr {
    /// Parses an expression string in the engine's force syntax.
    ///
    /// # Errors
    ///
    /// Returns an [`ExpressionError`] on lexical errors, malformed syntax,
    /// unknown functions, or coordinates other than `x`, `y`, `z`.
    pub fn parse(input: &str) -> Result<Self, ExpressionError> {
        let tokens = tokenize(input)?;
        let mut parser = Parser { tokens, cursor: 0 };
        let expr = parser.expression()?;
        match parser.peek() {
            None => Ok(expr),
            Some(token) => Err(ExpressionError::UnexpectedToken {
                expected: "end of expression",
                position: token.position,
            }),
        }
    }

    /// Evaluates the expression at the given coordinates.
    pub fn eval(&self, x: f64, y: f64, z: f64) -> f64 {
        match self {
            Expr::Constant(value) => *value,
            Expr::Coord(Coordinate::X) => x,
            Expr::Coord(Coordinate::Y) => y,
            Expr::Coord(Coordinate::Z) => z,
            Expr::Add(a, b) => a.eval(x, y, z) + b.eval(x, y, z),
            Expr::Sub(a, b) => a.eval(x, y, z) - b.eval(x, y, z),
            Expr::Mul(a, b) => a.eval(x, y, z) * b.eval(x, y, z),
            Expr::Div(a, b) => a.eval(x, y, z) / b.eval(x, y, z),
            Expr::Neg(a) => -a.eval(x, y, z),
            Expr::Pow(base, exponent) => base.eval(x, y, z).powf(exponent.eval(x, y, z)),
            Expr::Exp(a) => a.eval(x, y, z).exp(),
        }
    }

    /// Computes the symbolic partial derivative with respect to `coord`.
    ///
    /// Supports the forms the engine syntax can produce: sums, products,
    /// quotients, `exp`, and powers with constant exponents.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::NonConstantExponent`] for powers whose
    /// exponent contains a coordinate.
    pub fn differentiate(&self, coord: Coordinate) -> Result<Expr, ExpressionError> {
        let derivative = match self {
            Expr::Constant(_) => Expr::Constant(0.0),
            Expr::Coord(c) => {
                if *c == coord {
                    Expr::Constant(1.0)
                } else {
                    Expr::Constant(0.0)
                }
            }
            Expr::Add(a, b) => add(a.differentiate(coord)?, b.differentiate(coord)?),
            Expr::Sub(a, b) => sub(a.differentiate(coord)?, b.differentiate(coord)?),
            Expr::Mul(a, b) => add(
                mul(a.differentiate(coord)?, (**b).clone()),
                mul((**a).clone(), b.differentiate(coord)?),
            ),
            Expr::Div(a, b) => div(
                sub(
                    mul(a.differentiate(coord)?, (**b).clone()),
                    mul((**a).clone(), b.differentiate(coord)?),
                ),
                pow((**b).clone(), Expr::Constant(2.0)),
            ),
            Expr::Neg(a) => neg(a.differentiate(coord)?),
            Expr::Pow(base, exponent) => {
                let Expr::Constant(c) = **exponent else {
                    return Err(ExpressionError::NonConstantExponent);
                };
                mul(
                    mul(
                        Expr::Constant(c),
                        pow((**base).clone(), Expr::Constant(c - 1.0)),
                    ),
                    base.differentiate(coord)?,
                )
            }
            Expr::Exp(a) => mul(Expr::Exp(a.clone()), a.differentiate(coord)?),
        };
        Ok(derivative)
    }
}

// Smart constructors fold the 0/1 identities so gradient trees stay small.

fn add(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (Expr::Constant(x), b) if x == 0.0 => b,
        (a, Expr::Constant(x)) if x == 0.0 => a,
        (Expr::Constant(x), Expr::Constant(y)) => Expr::Constant(x + y),
        (a, b) => Expr::Add(Box::new(a), Box::new(b)),
    }
}

fn sub(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (a, Expr::Constant(x)) if x == 0.0 => a,
        (Expr::Constant(x), b) if x == 0.0 => neg(b),
        (Expr::Constant(x), Expr::Constant(y)) => Expr::Constant(x - y),
        (a, b) => Expr::Sub(Box::new(a), Box::new(b)),
    }
}

fn mul(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (Expr::Constant(x), _) | (_, Expr::Constant(x)) if x == 0.0 => Expr::Constant(0.0),
        (Expr::Constant(x), b) if x == 1.0 => b,
        (a, Expr::Constant(x)) if x == 1.0 => a,
        (Expr::Constant(x), Expr::Constant(y)) => Expr::Constant(x * y),
        (a, b) => Expr::Mul(Box::new(a), Box::new(b)),
    }
}

fn div(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (Expr::Constant(x), _) if x == 0.0 => Expr::Constant(0.0),
        (a, Expr::Constant(x)) if x == 1.0 => a,
        (a, b) => Expr::Div(Box::new(a), Box::new(b)),
    }
}

fn neg(a: Expr) -> Expr {
    match a {
        Expr::Constant(x) => Expr::Constant(-x),
        Expr::Neg(inner) => *inner,
        a => Expr::Neg(Box::new(a)),
    }
}

fn pow(base: Expr, exponent: Expr) -> Expr {
    match (&base, &exponent) {
        (_, Expr::Constant(c)) if *c == 1.0 => base,
        (_, Expr::Constant(c)) if *c == 0.0 => Expr::Constant(1.0),
        _ => Expr::Pow(Box::new(base), Box::new(exponent)),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

#[derive(Debug, Clone, PartialEq)]
struct Token {
    kind: TokenKind,
    position: usize,
}

fn tokenize(input: &str) -> Result<Vec<Token>, ExpressionError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let ch = bytes[i] as char;
        match ch {
            ' ' | '\t' | '\n' | '\r' => {
                i += 1;
            }
            '+' | '-' | '*' | '/' | '^' | '(' | ')' => {
                let kind = match ch {
                    '+' => TokenKind::Plus,
                    '-' => TokenKind::Minus,
                    '*' => TokenKind::Star,
                    '/' => TokenKind::Slash,
                    '^' => TokenKind::Caret,
                    '(' => TokenKind::LParen,
                    _ => TokenKind::RParen,
                };
                tokens.push(Token { kind, position: i });
                i += 1;
            }
            '0'..='9' | '.' => {
                let start = i;
                while i < bytes.len() && matches!(bytes[i] as char, '0'..='9' | '.') {
                    i += 1;
                }
                // Scientific notation: 1e-3, 2.5E+7.
                if i < bytes.len() && matches!(bytes[i] as char, 'e' | 'E') {
                    let mut j = i + 1;
                    if j < bytes.len() && matches!(bytes[j] as char, '+' | '-') {
                        j += 1;
                    }
                    if j < bytes.len() && (bytes[j] as char).is_ascii_digit() {
                        i = j;
                        while i < bytes.len() && (bytes[i] as char).is_ascii_digit() {
                            i += 1;
                        }
                    }
                }
                let literal = &input[start..i];
                let value: f64 = literal
                    .parse()
                    .map_err(|_| ExpressionError::MalformedNumber { position: start })?;
                tokens.push(Token {
                    kind: TokenKind::Number(value),
                    position: start,
                });
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                let start = i;
                while i < bytes.len() && matches!(bytes[i] as char, 'a'..='z' | 'A'..='Z' | '0'..='9' | '_') {
                    i += 1;
                }
                tokens.push(Token {
                    kind: TokenKind::Ident(input[start..i].to_string()),
                    position: start,
                });
            }
            other => {
                return Err(ExpressionError::UnexpectedChar {
                    ch: other,
                    position: i,
                });
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.cursor).cloned();
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<(), ExpressionError> {
        match self.advance() {
            Some(token) if token.kind == kind => Ok(()),
            Some(token) => Err(ExpressionError::UnexpectedToken {
                expected,
                position: token.position,
            }),
            None => Err(ExpressionError::UnexpectedEnd),
        }
    }

    // expression := term (('+' | '-') term)*
    fn expression(&mut self) -> Result<Expr, ExpressionError> {
        let mut lhs = self.term()?;
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Plus => {
                    self.advance();
                    lhs = Expr::Add(Box::new(lhs), Box::new(self.term()?));
                }
                TokenKind::Minus => {
                    self.advance();
                    lhs = Expr::Sub(Box::new(lhs), Box::new(self.term()?));
                }
                _ => break,
            }
        }
        Ok(lhs)
    }

    // term := unary (('*' | '/') unary)*
    fn term(&mut self) -> Result<Expr, ExpressionError> {
        let mut lhs = self.unary()?;
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Star => {
                    self.advance();
                    lhs = Expr::Mul(Box::new(lhs), Box::new(self.unary()?));
                }
                TokenKind::Slash => {
                    self.advance();
                    lhs = Expr::Div(Box::new(lhs), Box::new(self.unary()?));
                }
                _ => break,
            }
        }
        Ok(lhs)
    }

    // unary := ('-' | '+') unary | power
    //
    // Unary minus binds looser than '^', so -x^2 parses as -(x^2).
    fn unary(&mut self) -> Result<Expr, ExpressionError> {
        match self.peek().map(|t| t.kind.clone()) {
            Some(TokenKind::Minus) => {
                self.advance();
                Ok(neg(self.unary()?))
            }
            Some(TokenKind::Plus) => {
                self.advance();
                self.unary()
            }
            _ => self.power(),
        }
    }

    // power := atom ('^' unary)?   (right-associative)
    fn power(&mut self) -> Result<Expr, ExpressionError> {
        let base = self.atom()?;
        if let Some(token) = self.peek()
            && token.kind == TokenKind::Caret
        {
            self.advance();
            let exponent = self.unary()?;
            return Ok(Expr::Pow(Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Expr, ExpressionError> {
        let Some(token) = self.advance() else {
            return Err(ExpressionError::UnexpectedEnd);
        };
        match token.kind {
            TokenKind::Number(value) => Ok(Expr::Constant(value)),
            TokenKind::Ident(name) => {
                let is_call = self
                    .peek()
                    .is_some_and(|t| t.kind == TokenKind::LParen);
                if is_call {
                    if name != "exp" {
                        return Err(ExpressionError::UnknownFunction(name));
                    }
                    self.advance();
                    let argument = self.expression()?;
                    self.expect(TokenKind::RParen, "closing parenthesis")?;
                    Ok(Expr::Exp(Box::new(argument)))
                } else {
                    match name.as_str() {
                        "x" => Ok(Expr::Coord(Coordinate::X)),
                        "y" => Ok(Expr::Coord(Coordinate::Y)),
                        "z" => Ok(Expr::Coord(Coordinate::Z)),
                        _ => Err(ExpressionError::UnknownCoordinate(name)),
                    }
                }
            }
            TokenKind::LParen => {
                let inner = self.expression()?;
                self.expect(TokenKind::RParen, "closing parenthesis")?;
                Ok(inner)
            }
            _ => Err(ExpressionError::UnexpectedToken {
                expected: "number, coordinate, or '('",
                position: token.position,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn eval_str(input: &str, x: f64, y: f64, z: f64) -> f64 {
        Expr::parse(input).unwrap().eval(x, y, z)
    }

    #[test]
    fn literals_and_coordinates_evaluate() {
        assert!(f64_approx_equal(eval_str("42", 0.0, 0.0, 0.0), 42.0));
        assert!(f64_approx_equal(eval_str("2.5e-1", 0.0, 0.0, 0.0), 0.25));
        assert!(f64_approx_equal(eval_str("x", 3.0, 0.0, 0.0), 3.0));
        assert!(f64_approx_equal(eval_str("z", 0.0, 0.0, -7.0), -7.0));
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert!(f64_approx_equal(eval_str("2+3*4", 0.0, 0.0, 0.0), 14.0));
        assert!(f64_approx_equal(eval_str("(2+3)*4", 0.0, 0.0, 0.0), 20.0));
    }

    #[test]
    fn caret_binds_tighter_than_multiplication_and_unary_minus() {
        assert!(f64_approx_equal(eval_str("2*3^2", 0.0, 0.0, 0.0), 18.0));
        assert!(f64_approx_equal(eval_str("-3^2", 0.0, 0.0, 0.0), -9.0));
        assert!(f64_approx_equal(eval_str("(-3)^2", 0.0, 0.0, 0.0), 9.0));
    }

    #[test]
    fn caret_is_right_associative() {
        assert!(f64_approx_equal(eval_str("2^3^2", 0.0, 0.0, 0.0), 512.0));
    }

    #[test]
    fn negative_exponents_parse() {
        assert!(f64_approx_equal(eval_str("2^-1", 0.0, 0.0, 0.0), 0.5));
    }

    #[test]
    fn exp_function_matches_std() {
        assert!(f64_approx_equal(
            eval_str("exp(-(x-1)^2)", 2.0, 0.0, 0.0),
            (-1.0f64).exp()
        ));
        assert!(f64_approx_equal(eval_str("exp(0)", 0.0, 0.0, 0.0), 1.0));
    }

    #[test]
    fn whitespace_is_insignificant() {
        assert!(f64_approx_equal(
            eval_str(" 1 + 2 * x ", 4.0, 0.0, 0.0),
            eval_str("1+2*x", 4.0, 0.0, 0.0)
        ));
    }

    #[test]
    fn unknown_function_is_rejected() {
        assert_eq!(
            Expr::parse("sin(x)"),
            Err(ExpressionError::UnknownFunction("sin".to_string()))
        );
    }

    #[test]
    fn unknown_coordinate_is_rejected() {
        assert_eq!(
            Expr::parse("x + w"),
            Err(ExpressionError::UnknownCoordinate("w".to_string()))
        );
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(matches!(
            Expr::parse("1 + 2 )"),
            Err(ExpressionError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn unterminated_parenthesis_is_rejected() {
        assert_eq!(Expr::parse("exp(x"), Err(ExpressionError::UnexpectedEnd));
    }

    #[test]
    fn derivative_of_polynomial_is_exact() {
        // d/dx (x^3 + 2*x) = 3*x^2 + 2
        let derivative = Expr::parse("x^3 + 2*x")
            .unwrap()
            .differentiate(Coordinate::X)
            .unwrap();
        for x in [-2.0, -0.5, 0.0, 1.5, 3.0] {
            assert!(f64_approx_equal(
                derivative.eval(x, 0.0, 0.0),
                3.0 * x * x + 2.0
            ));
        }
    }

    #[test]
    fn derivative_through_exp_applies_chain_rule() {
        // d/dy exp(-y^2) = -2*y*exp(-y^2)
        let derivative = Expr::parse("exp(-y^2)")
            .unwrap()
            .differentiate(Coordinate::Y)
            .unwrap();
        for y in [-1.0f64, 0.3, 2.0] {
            let expected = -2.0 * y * (-y * y).exp();
            assert!(f64_approx_equal(derivative.eval(0.0, y, 0.0), expected));
        }
    }

    #[test]
    fn derivative_with_respect_to_absent_coordinate_is_zero() {
        let derivative = Expr::parse("x^4 + exp(-x)")
            .unwrap()
            .differentiate(Coordinate::Z)
            .unwrap();
        assert_eq!(derivative, Expr::Constant(0.0));
    }

    #[test]
    fn quotient_rule_matches_finite_difference() {
        let expr = Expr::parse("x / (1 + x^2)").unwrap();
        let derivative = expr.differentiate(Coordinate::X).unwrap();
        let h = 1e-6;
        for x in [-1.5, 0.2, 2.0] {
            let numeric = (expr.eval(x + h, 0.0, 0.0) - expr.eval(x - h, 0.0, 0.0)) / (2.0 * h);
            assert!((derivative.eval(x, 0.0, 0.0) - numeric).abs() < 1e-6);
        }
    }

    #[test]
    fn non_constant_exponent_cannot_be_differentiated() {
        assert_eq!(
            Expr::parse("x^y").unwrap().differentiate(Coordinate::X),
            Err(ExpressionError::NonConstantExponent)
        );
    }
}
