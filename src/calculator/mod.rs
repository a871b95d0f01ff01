//! Restricted arithmetic expression evaluator.
//!
//! A hand-rolled tokenizer + recursive-descent parser over an allow-listed
//! grammar: numeric literals, unary `+`/`-`, binary `+ - * / % **`, and
//! parentheses. Everything else — identifiers, calls, comparisons,
//! assignment — is rejected at the token or parse level, so no input can
//! reach anything but pure arithmetic.

use thiserror::Error;

/// Everything that can go wrong while evaluating an expression.
/// Rendered inline for the user as `"Error: <reason>"`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("empty expression")]
    Empty,
    #[error("unsupported character '{0}'")]
    UnsupportedChar(char),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("unexpected '{0}'")]
    UnexpectedToken(String),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("expected ')'")]
    UnclosedParen,
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
}

/// Evaluate `expression` and format the result for display.
///
/// On success returns the numeric result as a plain decimal string
/// (integral values keep a trailing `.0`, e.g. `"14.0"`). On any parse
/// or evaluation failure returns `"Error: <reason>"`. Never panics.
pub fn evaluate(expression: &str) -> String {
    match eval_expression(expression) {
        Ok(value) => format_number(value),
        Err(e) => format!("Error: {}", e),
    }
}

fn eval_expression(expression: &str) -> Result<f64, CalcError> {
    let tokens = tokenize(expression)?;
    if tokens.is_empty() {
        return Err(CalcError::Empty);
    }
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expression()?;
    match parser.peek() {
        Some(tok) => Err(CalcError::UnexpectedToken(tok.describe())),
        None => Ok(value),
    }
}

/// Format an f64 the way the calculator displays it: integral values get
/// a trailing `.0`, everything else uses the shortest round-trip form.
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

// ── Tokenizer ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    Percent,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => format_number(*n),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::DoubleStar => "**".to_string(),
            Token::Slash => "/".to_string(),
            Token::Percent => "%".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' | '\n' | '\r' => {
                chars.next();
            }
            '0'..='9' | '.' => {
                tokens.push(read_number(&mut chars)?);
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                if chars.peek() == Some(&'*') {
                    chars.next();
                    tokens.push(Token::DoubleStar);
                } else {
                    tokens.push(Token::Star);
                }
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '%' => {
                chars.next();
                tokens.push(Token::Percent);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            other => return Err(CalcError::UnsupportedChar(other)),
        }
    }

    Ok(tokens)
}

/// Read one numeric literal: digits and a decimal point, with an optional
/// `e`/`E` exponent. Malformed runs like `1.2.3` fail the final parse.
fn read_number(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> Result<Token, CalcError> {
    let mut raw = String::new();

    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() || c == '.' {
            raw.push(c);
            chars.next();
        } else {
            break;
        }
    }

    // Optional exponent: e / E, optional sign, at least one digit.
    // Committed only when the digits are actually there, so a bare `1e`
    // leaves the `e` behind to be rejected as an unsupported character.
    if matches!(chars.peek(), Some('e') | Some('E')) {
        let mut lookahead = chars.clone();
        let mut exp = String::new();
        if let Some(e) = lookahead.next() {
            exp.push(e);
        }
        if matches!(lookahead.peek(), Some('+') | Some('-')) {
            if let Some(sign) = lookahead.next() {
                exp.push(sign);
            }
        }
        if matches!(lookahead.peek(), Some(c) if c.is_ascii_digit()) {
            while let Some(&c) = lookahead.peek() {
                if c.is_ascii_digit() {
                    exp.push(c);
                    lookahead.next();
                } else {
                    break;
                }
            }
            raw.push_str(&exp);
            *chars = lookahead;
        }
    }

    raw.parse::<f64>()
        .map(Token::Number)
        .map_err(|_| CalcError::InvalidNumber(raw))
}

// ── Parser / evaluator ────────────────────────────────────────────
//
// expression := term (('+' | '-') term)*
// term       := unary (('*' | '/' | '%') unary)*
// unary      := ('+' | '-') unary | power
// power      := primary ('**' unary)?          (right-associative)
// primary    := NUMBER | '(' expression ')'

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expression(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.advance();
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.advance();
                    value *= self.unary()?;
                }
                Some(Token::Slash) => {
                    self.advance();
                    let rhs = self.unary()?;
                    if rhs == 0.0 {
                        return Err(CalcError::DivisionByZero);
                    }
                    value /= rhs;
                }
                Some(Token::Percent) => {
                    self.advance();
                    let rhs = self.unary()?;
                    if rhs == 0.0 {
                        return Err(CalcError::ModuloByZero);
                    }
                    // Floored modulo: the result's sign follows the divisor.
                    value -= rhs * (value / rhs).floor();
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<f64, CalcError> {
        match self.peek() {
            Some(Token::Plus) => {
                self.advance();
                self.unary()
            }
            Some(Token::Minus) => {
                self.advance();
                Ok(-self.unary()?)
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<f64, CalcError> {
        let base = self.primary()?;
        if self.peek() == Some(&Token::DoubleStar) {
            self.advance();
            // Right-associative, and the exponent may itself be signed:
            // 2**3**2 == 512, 2**-1 == 0.5, -2**2 == -4.
            let exponent = self.unary()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<f64, CalcError> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LParen) => {
                let value = self.expression()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    Some(tok) => Err(CalcError::UnexpectedToken(tok.describe())),
                    None => Err(CalcError::UnclosedParen),
                }
            }
            Some(tok) => Err(CalcError::UnexpectedToken(tok.describe())),
            None => Err(CalcError::UnexpectedEnd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Arithmetic ────────────────────────────────────────────────

    #[test]
    fn precedence_mul_before_add() {
        assert_eq!(evaluate("2 + 3 * 4"), "14.0");
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(evaluate("(2 + 3) * 4"), "20.0");
    }

    #[test]
    fn division_produces_fractions() {
        assert_eq!(evaluate("7 / 2"), "3.5");
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(evaluate("2 ** 3 ** 2"), "512.0");
    }

    #[test]
    fn unary_minus_binds_looser_than_power() {
        assert_eq!(evaluate("-2 ** 2"), "-4.0");
    }

    #[test]
    fn negative_exponent() {
        assert_eq!(evaluate("2 ** -1"), "0.5");
    }

    #[test]
    fn unary_plus_and_minus() {
        assert_eq!(evaluate("+5"), "5.0");
        assert_eq!(evaluate("-5"), "-5.0");
        assert_eq!(evaluate("--5"), "5.0");
        assert_eq!(evaluate("2 - -3"), "5.0");
    }

    #[test]
    fn modulo_sign_follows_divisor() {
        assert_eq!(evaluate("7 % 3"), "1.0");
        assert_eq!(evaluate("-7 % 3"), "2.0");
        assert_eq!(evaluate("7 % -3"), "-2.0");
    }

    #[test]
    fn decimal_literals() {
        assert_eq!(evaluate("0.5 * 4"), "2.0");
        assert_eq!(evaluate(".5 + .5"), "1.0");
    }

    #[test]
    fn exponent_notation() {
        assert_eq!(evaluate("1e3"), "1000.0");
        assert_eq!(evaluate("2.5e-1 * 4"), "1.0");
    }

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(evaluate("  1+\t2 "), "3.0");
    }

    #[test]
    fn non_integral_result_keeps_full_precision() {
        assert_eq!(evaluate("1 / 3"), (1.0f64 / 3.0).to_string());
    }

    // ── Errors ────────────────────────────────────────────────────

    #[test]
    fn division_by_zero_is_an_error() {
        assert!(evaluate("10 / 0").starts_with("Error:"));
    }

    #[test]
    fn modulo_by_zero_is_an_error() {
        assert!(evaluate("10 % 0").starts_with("Error:"));
    }

    #[test]
    fn identifiers_are_rejected() {
        assert!(evaluate("x + 1").starts_with("Error:"));
        assert!(evaluate("two + 2").starts_with("Error:"));
    }

    #[test]
    fn calls_are_rejected() {
        assert!(evaluate("abs(-1)").starts_with("Error:"));
        assert!(evaluate("__import__('os')").starts_with("Error:"));
    }

    #[test]
    fn assignment_and_comparison_are_rejected() {
        assert!(evaluate("x = 2").starts_with("Error:"));
        assert!(evaluate("1 < 2").starts_with("Error:"));
        assert!(evaluate("1 == 1").starts_with("Error:"));
    }

    #[test]
    fn multiple_statements_are_rejected() {
        assert!(evaluate("1; 2").starts_with("Error:"));
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(evaluate("").starts_with("Error:"));
        assert!(evaluate("   ").starts_with("Error:"));
    }

    #[test]
    fn dangling_operator() {
        assert!(evaluate("1 +").starts_with("Error:"));
        assert!(evaluate("* 2").starts_with("Error:"));
    }

    #[test]
    fn unclosed_paren() {
        assert!(evaluate("(1 + 2").starts_with("Error:"));
        assert!(evaluate("1 + 2)").starts_with("Error:"));
    }

    #[test]
    fn malformed_number() {
        assert!(evaluate("1.2.3").starts_with("Error:"));
    }

    #[test]
    fn adjacent_numbers_are_rejected() {
        assert!(evaluate("1 2").starts_with("Error:"));
    }

    // ── Error details ─────────────────────────────────────────────

    #[test]
    fn error_variants_render_reasons() {
        assert_eq!(evaluate("10 / 0"), "Error: division by zero");
        assert_eq!(evaluate("10 % 0"), "Error: modulo by zero");
        assert_eq!(evaluate("a"), "Error: unsupported character 'a'");
    }

    #[test]
    fn eval_expression_surfaces_typed_errors() {
        assert_eq!(eval_expression("1 / 0"), Err(CalcError::DivisionByZero));
        assert_eq!(eval_expression(""), Err(CalcError::Empty));
        assert_eq!(
            eval_expression("$1"),
            Err(CalcError::UnsupportedChar('$'))
        );
    }
}
