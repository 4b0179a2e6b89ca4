//! Expression evaluator for PythonExpression substitutions
//!
//! Supports arithmetic (+, -, *, /, %, parentheses, integers, floats) and
//! string concatenation ('a' + 'b'). That covers the offset arithmetic used
//! to derive ports and system ids from an agent id.
//!
//! Numbers follow Python's rules: integer literals stay exact integers,
//! `/` always yields a float, and a float result prints with a fractional
//! part (`14543.0`). Integers are `i128`; overflow is an evaluation error
//! rather than a silent loss of precision.

use crate::error::SubstitutionError;
use std::fmt;

/// Evaluate an already-resolved expression string
pub(crate) fn evaluate_expression(expr: &str) -> Result<String, SubstitutionError> {
    let expr = expr.trim();

    // Must check before numeric evaluation since '+' is also arithmetic
    if is_string_concatenation(expr) {
        return Ok(evaluate_string_concat(expr));
    }

    match eval_expr(expr) {
        Ok(value) => Ok(value.to_string()),
        Err(reason) => Err(SubstitutionError::InvalidExpression {
            expression: expr.to_string(),
            reason,
        }),
    }
}

/// Check if an expression is string concatenation (has '+' and quoted string operands)
///
/// Returns true for patterns like: `'str1' + 'str2'`, `"a" + "b" + "c"`
/// Returns false for numeric expressions like: `1 + 2`, `(3 + 4) * 2`
fn is_string_concatenation(expr: &str) -> bool {
    if !expr.contains('+') {
        return false;
    }
    split_concat_operands(expr).iter().any(|p| is_quoted(p.trim()))
}

fn is_quoted(s: &str) -> bool {
    s.len() >= 2
        && ((s.starts_with('\'') && s.ends_with('\'')) || (s.starts_with('"') && s.ends_with('"')))
}

/// Evaluate string concatenation expression: 'str1' + 'str2' + ...
fn evaluate_string_concat(expr: &str) -> String {
    split_concat_operands(expr)
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(strip_quotes)
        .collect()
}

/// Split a concatenation expression by '+' while respecting quoted strings.
/// E.g., `'hello+world' + 'foo'` -> [`'hello+world'`, `'foo'`]
fn split_concat_operands(expr: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_single_quote = false;
    let mut in_double_quote = false;

    for (i, ch) in expr.char_indices() {
        match ch {
            '\'' if !in_double_quote => in_single_quote = !in_single_quote,
            '"' if !in_single_quote => in_double_quote = !in_double_quote,
            '+' if !in_single_quote && !in_double_quote => {
                parts.push(&expr[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&expr[start..]);
    parts
}

fn strip_quotes(s: &str) -> &str {
    if is_quoted(s) {
        &s[1..s.len() - 1]
    } else {
        s
    }
}


/// Result of an arithmetic evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Int(i128),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(value) => f.write_str(&format_float(value)),
        }
    }
}

/// Format a float the way Python's `repr` does
fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let text = format!("{:e}", value);
        if let Some((mantissa, exponent)) = text.split_once('e') {
            if let Ok(exponent) = exponent.parse::<i32>() {
                let sign = if exponent < 0 { '-' } else { '+' };
                return format!("{}e{}{:02}", mantissa, sign, exponent.abs());
            }
        }
        return text;
    }

    let text = format!("{}", value);
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

/// Evaluate arithmetic expression
fn eval_expr(expr: &str) -> Result<Number, String> {
    let tokens = tokenize(expr)?;
    if tokens.is_empty() {
        return Err("Empty expression".to_string());
    }

    let mut pos = 0;
    let result = parse_addition(&tokens, &mut pos)?;

    if pos < tokens.len() {
        return Err(format!("Unexpected token: {:?}", tokens[pos]));
    }

    Ok(result)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(Number),
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    LeftParen,
    RightParen,
}

fn tokenize(expr: &str) -> Result<Vec<Token>, String> {
    let chars: Vec<char> = expr.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let token = match chars[i] {
            ' ' | '\t' => {
                i += 1;
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Multiply,
            '/' => Token::Divide,
            '%' => Token::Modulo,
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            '0'..='9' | '.' => {
                let (number, end) = scan_number(&chars, i)?;
                tokens.push(Token::Number(number));
                i = end;
                continue;
            }
            ch => return Err(format!("Unexpected character: {}", ch)),
        };
        tokens.push(token);
        i += 1;
    }

    Ok(tokens)
}

/// Scan a numeric literal starting at `start`, returning it and the index
/// just past it
fn scan_number(chars: &[char], start: usize) -> Result<(Number, usize), String> {
    let mut end = start;
    while end < chars.len() && (chars[end].is_ascii_digit() || chars[end] == '.') {
        end += 1;
    }

    let mut has_exponent = false;
    if end < chars.len() && matches!(chars[end], 'e' | 'E') {
        let mut digits = end + 1;
        if digits < chars.len() && matches!(chars[digits], '+' | '-') {
            digits += 1;
        }
        if digits < chars.len() && chars[digits].is_ascii_digit() {
            end = digits;
            while end < chars.len() && chars[end].is_ascii_digit() {
                end += 1;
            }
            has_exponent = true;
        }
    }

    let literal: String = chars[start..end].iter().collect();

    if has_exponent || literal.contains('.') {
        let value = literal
            .parse::<f64>()
            .map_err(|_| format!("Invalid number: {}", literal))?;
        return Ok((Number::Float(value), end));
    }

    if literal.len() > 1 && literal.starts_with('0') && literal.chars().any(|c| c != '0') {
        return Err(format!(
            "Leading zeros in decimal integer literals are not permitted: {}",
            literal
        ));
    }
    let value = literal
        .parse::<i128>()
        .map_err(|_| format!("Integer literal out of range: {}", literal))?;
    Ok((Number::Int(value), end))
}

fn overflow() -> String {
    "Integer overflow".to_string()
}

/// Apply a binary operator with Python's int/float promotion
fn apply(op: &Token, left: Number, right: Number) -> Result<Number, String> {
    if let (Number::Int(a), Number::Int(b), false) = (left, right, *op == Token::Divide) {
        let value = match op {
            Token::Plus => a.checked_add(b).ok_or_else(overflow)?,
            Token::Minus => a.checked_sub(b).ok_or_else(overflow)?,
            Token::Multiply => a.checked_mul(b).ok_or_else(overflow)?,
            Token::Modulo => {
                if b == 0 {
                    return Err("Modulo by zero".to_string());
                }
                let rem = a.checked_rem(b).ok_or_else(overflow)?;
                // Python's % takes the sign of the divisor
                if rem != 0 && (rem < 0) != (b < 0) {
                    rem + b
                } else {
                    rem
                }
            }
            other => return Err(format!("Unsupported operator: {:?}", other)),
        };
        return Ok(Number::Int(value));
    }

    let (a, b) = (left.as_f64(), right.as_f64());
    let value = match op {
        Token::Plus => a + b,
        Token::Minus => a - b,
        Token::Multiply => a * b,
        Token::Divide => {
            if b == 0.0 {
                return Err("Division by zero".to_string());
            }
            a / b
        }
        Token::Modulo => {
            if b == 0.0 {
                return Err("Modulo by zero".to_string());
            }
            let rem = a % b;
            if rem != 0.0 && (rem < 0.0) != (b < 0.0) {
                rem + b
            } else {
                rem
            }
        }
        other => return Err(format!("Unsupported operator: {:?}", other)),
    };
    Ok(Number::Float(value))
}

fn parse_addition(tokens: &[Token], pos: &mut usize) -> Result<Number, String> {
    let mut result = parse_multiplication(tokens, pos)?;

    while let Some(op @ (Token::Plus | Token::Minus)) = tokens.get(*pos) {
        *pos += 1;
        let right = parse_multiplication(tokens, pos)?;
        result = apply(op, result, right)?;
    }

    Ok(result)
}

fn parse_multiplication(tokens: &[Token], pos: &mut usize) -> Result<Number, String> {
    let mut result = parse_primary(tokens, pos)?;

    while let Some(op @ (Token::Multiply | Token::Divide | Token::Modulo)) = tokens.get(*pos) {
        *pos += 1;
        let right = parse_primary(tokens, pos)?;
        result = apply(op, result, right)?;
    }

    Ok(result)
}

fn parse_primary(tokens: &[Token], pos: &mut usize) -> Result<Number, String> {
    let Some(token) = tokens.get(*pos) else {
        return Err("Unexpected end of expression".to_string());
    };

    match token {
        Token::Number(n) => {
            *pos += 1;
            Ok(*n)
        }
        Token::Minus => {
            *pos += 1;
            match parse_primary(tokens, pos)? {
                Number::Int(n) => n.checked_neg().map(Number::Int).ok_or_else(overflow),
                Number::Float(f) => Ok(Number::Float(-f)),
            }
        }
        Token::Plus => {
            *pos += 1;
            parse_primary(tokens, pos)
        }
        Token::LeftParen => {
            *pos += 1;
            let result = parse_addition(tokens, pos)?;
            if tokens.get(*pos) != Some(&Token::RightParen) {
                return Err("Missing closing parenthesis".to_string());
            }
            *pos += 1;
            Ok(result)
        }
        _ => Err(format!("Unexpected token at position {}", pos)),
    }
}
