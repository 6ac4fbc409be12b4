//! Deterministic formula evaluation.
//!
//! Supports formulas like "3", "@prof", "@abilities.int.mod + 1",
//! "max(1, floor(@details.level / 2))".
//! Dice terms ("1d6", "d20") are rejected: results must never depend on random state.

use itemspells_domain::StatContext;

use crate::infrastructure::ports::{FormulaError, FormulaEvaluator};

/// Deepest nesting of parentheses, unary signs and function calls accepted.
pub const MAX_NESTING: usize = 64;

/// Formula evaluator with no random terms.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicEvaluator;

impl DeterministicEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl FormulaEvaluator for DeterministicEvaluator {
    fn evaluate(&self, formula: &str, ctx: &StatContext) -> Result<i64, FormulaError> {
        let tokens = tokenize(formula)?;
        if tokens.is_empty() {
            return Err(FormulaError::Empty);
        }

        let mut parser = Parser {
            formula,
            tokens: &tokens,
            pos: 0,
            depth: 0,
            ctx,
        };
        let value = parser.expr()?;
        if let Some(extra) = parser.peek() {
            return Err(FormulaError::parse(
                formula,
                format!("unexpected {}", extra.describe()),
            ));
        }
        if !value.is_finite() {
            return Err(FormulaError::parse(formula, "result is not a finite number"));
        }

        Ok(value.floor() as i64)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ref(String),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Comma,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Self::Number(n) => format!("number {}", n),
            Self::Ref(r) => format!("reference @{}", r),
            Self::Ident(i) => format!("'{}'", i),
            Self::Plus => "'+'".to_string(),
            Self::Minus => "'-'".to_string(),
            Self::Star => "'*'".to_string(),
            Self::Slash => "'/'".to_string(),
            Self::LParen => "'('".to_string(),
            Self::RParen => "')'".to_string(),
            Self::Comma => "','".to_string(),
        }
    }
}

/// "d20", "d6" - a bare die term
fn is_die_term(word: &str) -> bool {
    let mut chars = word.chars();
    matches!(chars.next(), Some('d') | Some('D'))
        && word.len() > 1
        && chars.all(|c| c.is_ascii_digit())
}

fn tokenize(formula: &str) -> Result<Vec<Token>, FormulaError> {
    let chars: Vec<char> = formula.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();

                // "2d6" - a dice count followed by a die term
                if i < chars.len() && matches!(chars[i], 'd' | 'D') {
                    return Err(FormulaError::NonDeterministic(formula.to_string()));
                }

                let value: f64 = text
                    .parse()
                    .map_err(|_| FormulaError::parse(formula, format!("invalid number '{}'", text)))?;
                tokens.push(Token::Number(value));
            }
            '@' => {
                i += 1;
                let start = i;
                while i < chars.len()
                    && (chars[i].is_ascii_alphanumeric() || chars[i] == '.' || chars[i] == '_')
                {
                    i += 1;
                }
                if start == i {
                    return Err(FormulaError::parse(formula, "empty reference after '@'"));
                }
                let path: String = chars[start..i].iter().collect();
                tokens.push(Token::Ref(path.trim_end_matches('.').to_string()));
            }
            c if c.is_ascii_alphabetic() => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                if is_die_term(&word) {
                    return Err(FormulaError::NonDeterministic(formula.to_string()));
                }
                tokens.push(Token::Ident(word.to_ascii_lowercase()));
            }
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            ',' => {
                tokens.push(Token::Comma);
                i += 1;
            }
            other => {
                return Err(FormulaError::parse(
                    formula,
                    format!("unexpected character '{}'", other),
                ))
            }
        }
    }

    Ok(tokens)
}

/// Recursive descent over: expr = term (('+'|'-') term)*, term = unary (('*'|'/') unary)*
struct Parser<'a> {
    formula: &'a str,
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    ctx: &'a StatContext,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: Token) -> Result<(), FormulaError> {
        match self.next() {
            Some(t) if t == expected => Ok(()),
            Some(t) => Err(FormulaError::parse(
                self.formula,
                format!("expected {}, found {}", expected.describe(), t.describe()),
            )),
            None => Err(FormulaError::parse(
                self.formula,
                format!("expected {}, found end of formula", expected.describe()),
            )),
        }
    }

    fn expr(&mut self) -> Result<f64, FormulaError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, FormulaError> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    value *= self.unary()?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err(FormulaError::DivisionByZero(self.formula.to_string()));
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<f64, FormulaError> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(FormulaError::parse(self.formula, "formula nested too deeply"));
        }
        let value = self.signed();
        self.depth -= 1;
        value
    }

    fn signed(&mut self) -> Result<f64, FormulaError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(-self.unary()?)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64, FormulaError> {
        match self.next() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::Ref(path)) => self
                .ctx
                .get(&path)
                .ok_or(FormulaError::UnknownReference(path)),
            Some(Token::LParen) => {
                let value = self.expr()?;
                self.expect(Token::RParen)?;
                Ok(value)
            }
            Some(Token::Ident(name)) => self.call(&name),
            Some(t) => Err(FormulaError::parse(
                self.formula,
                format!("unexpected {}", t.describe()),
            )),
            None => Err(FormulaError::parse(self.formula, "unexpected end of formula")),
        }
    }

    fn call(&mut self, name: &str) -> Result<f64, FormulaError> {
        self.expect(Token::LParen)?;
        let mut args = vec![self.expr()?];
        while self.peek() == Some(&Token::Comma) {
            self.pos += 1;
            args.push(self.expr()?);
        }
        self.expect(Token::RParen)?;

        let unary = |f: fn(f64) -> f64| -> Result<f64, FormulaError> {
            match args.as_slice() {
                [x] => Ok(f(*x)),
                _ => Err(FormulaError::parse(
                    self.formula,
                    format!("{}() takes exactly one argument", name),
                )),
            }
        };

        match name {
            "floor" => unary(f64::floor),
            "ceil" => unary(f64::ceil),
            "round" => unary(f64::round),
            "abs" => unary(f64::abs),
            "min" => Ok(args.iter().copied().fold(f64::INFINITY, f64::min)),
            "max" => Ok(args.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
            other => Err(FormulaError::parse(
                self.formula,
                format!("unknown function '{}'", other),
            )),
        }
    }
}
