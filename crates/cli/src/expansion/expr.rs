// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Arithmetic for `#ifexpr`.
//!
//! Supports numbers, `+ - * /`, `div`, `mod`, parentheses, the comparisons
//! `= != <> < > <= >=` and `and`, `or`, `not`. Booleans are `1` and `0`.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ExprError {
    #[error("Unexpected {0} operator")]
    UnexpectedOperator(String),

    #[error("Unrecognized word \"{0}\"")]
    UnrecognizedWord(String),

    #[error("Unrecognized punctuation character \"{0}\"")]
    UnrecognizedPunctuation(char),

    #[error("Missing operand")]
    MissingOperand,

    #[error("Unclosed bracket")]
    UnclosedBracket,

    #[error("Division by zero")]
    DivisionByZero,
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Number(f64),
    Op(&'static str),
    Open,
    Close,
}

const WORD_OPS: &[&str] = &["and", "or", "not", "div", "mod"];
const SYMBOL_OPS: &[&str] = &["<=", ">=", "!=", "<>", "=", "<", ">", "+", "-", "*", "/"];

fn tokenize(input: &str) -> Result<Vec<Token>, ExprError> {
    let mut tokens = Vec::new();
    let mut rest = input;
    while let Some(c) = rest.chars().next() {
        if c.is_whitespace() {
            rest = &rest[c.len_utf8()..];
            continue;
        }
        if c.is_ascii_digit() || c == '.' {
            let len = rest
                .find(|ch: char| !(ch.is_ascii_digit() || ch == '.'))
                .unwrap_or(rest.len());
            let number = rest[..len]
                .parse()
                .map_err(|_| ExprError::UnrecognizedWord(rest[..len].to_string()))?;
            tokens.push(Token::Number(number));
            rest = &rest[len..];
            continue;
        }
        if c.is_ascii_alphabetic() {
            let len = rest
                .find(|ch: char| !ch.is_ascii_alphabetic())
                .unwrap_or(rest.len());
            let word = rest[..len].to_ascii_lowercase();
            let op = WORD_OPS
                .iter()
                .find(|op| **op == word)
                .ok_or_else(|| ExprError::UnrecognizedWord(word.clone()))?;
            tokens.push(Token::Op(*op));
            rest = &rest[len..];
            continue;
        }
        match c {
            '(' => tokens.push(Token::Open),
            ')' => tokens.push(Token::Close),
            _ => {
                let op = SYMBOL_OPS
                    .iter()
                    .find(|op| rest.starts_with(**op))
                    .ok_or(ExprError::UnrecognizedPunctuation(c))?;
                tokens.push(Token::Op(*op));
                rest = &rest[op.len()..];
                continue;
            }
        }
        rest = &rest[1..];
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek_op(&self) -> Option<&'static str> {
        match self.tokens.get(self.pos) {
            Some(Token::Op(op)) => Some(*op),
            _ => None,
        }
    }

    fn eat(&mut self, ops: &[&str]) -> Option<&'static str> {
        let op = self.peek_op().filter(|op| ops.contains(op))?;
        self.pos += 1;
        Some(op)
    }

    fn or(&mut self) -> Result<f64, ExprError> {
        let mut lhs = self.and()?;
        while self.eat(&["or"]).is_some() {
            let rhs = self.and()?;
            lhs = truth(lhs != 0.0 || rhs != 0.0);
        }
        Ok(lhs)
    }

    fn and(&mut self) -> Result<f64, ExprError> {
        let mut lhs = self.comparison()?;
        while self.eat(&["and"]).is_some() {
            let rhs = self.comparison()?;
            lhs = truth(lhs != 0.0 && rhs != 0.0);
        }
        Ok(lhs)
    }

    fn comparison(&mut self) -> Result<f64, ExprError> {
        let mut lhs = self.sum()?;
        while let Some(op) = self.eat(&["=", "!=", "<>", "<", ">", "<=", ">="]) {
            let rhs = self.sum()?;
            lhs = truth(match op {
                "=" => lhs == rhs,
                "!=" | "<>" => lhs != rhs,
                "<" => lhs < rhs,
                ">" => lhs > rhs,
                "<=" => lhs <= rhs,
                _ => lhs >= rhs,
            });
        }
        Ok(lhs)
    }

    fn sum(&mut self) -> Result<f64, ExprError> {
        let mut lhs = self.product()?;
        while let Some(op) = self.eat(&["+", "-"]) {
            let rhs = self.product()?;
            lhs = if op == "+" { lhs + rhs } else { lhs - rhs };
        }
        Ok(lhs)
    }

    fn product(&mut self) -> Result<f64, ExprError> {
        let mut lhs = self.unary()?;
        while let Some(op) = self.eat(&["*", "/", "div", "mod"]) {
            let rhs = self.unary()?;
            lhs = match op {
                "*" => lhs * rhs,
                "mod" => {
                    let divisor = rhs.trunc();
                    if divisor == 0.0 {
                        return Err(ExprError::DivisionByZero);
                    }
                    lhs.trunc() % divisor
                }
                _ => {
                    if rhs == 0.0 {
                        return Err(ExprError::DivisionByZero);
                    }
                    lhs / rhs
                }
            };
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<f64, ExprError> {
        if let Some(op) = self.eat(&["-", "+", "not"]) {
            let value = self.unary()?;
            return Ok(match op {
                "-" => -value,
                "not" => truth(value == 0.0),
                _ => value,
            });
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<f64, ExprError> {
        match self.tokens.get(self.pos).cloned() {
            Some(Token::Number(n)) => {
                self.pos += 1;
                Ok(n)
            }
            Some(Token::Open) => {
                self.pos += 1;
                let value = self.or()?;
                match self.tokens.get(self.pos) {
                    Some(Token::Close) => {
                        self.pos += 1;
                        Ok(value)
                    }
                    _ => Err(ExprError::UnclosedBracket),
                }
            }
            Some(Token::Op(op)) => Err(ExprError::UnexpectedOperator(op.to_string())),
            Some(Token::Close) => Err(ExprError::UnexpectedOperator(")".to_string())),
            None => Err(ExprError::MissingOperand),
        }
    }
}

fn truth(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Evaluate an expression. An empty expression evaluates to `None`.
pub fn evaluate(input: &str) -> Result<Option<f64>, ExprError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Ok(None);
    }
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.or()?;
    match parser.tokens.get(parser.pos) {
        None => Ok(Some(value)),
        Some(Token::Close) => Err(ExprError::UnexpectedOperator(")".to_string())),
        Some(Token::Op(op)) => Err(ExprError::UnexpectedOperator(op.to_string())),
        Some(Token::Number(_)) => Err(ExprError::UnexpectedOperator("number".to_string())),
        Some(Token::Open) => Err(ExprError::UnexpectedOperator("(".to_string())),
    }
}

#[cfg(test)]
#[path = "expr_tests.rs"]
mod tests;
