//! Calculator tool: evaluates arithmetic expressions.
//!
//! Supports `+`, `-`, `*`, `/`, parentheses, unary negation, and decimal
//! numbers. Expressions go through a small recursive-descent parser and
//! never reach an interpreter. Evaluation problems (division by zero,
//! syntax errors) are reported in the tool output for the model to
//! observe, not raised as loop errors.

use async_trait::async_trait;
use reagent_core::error::ToolError;
use reagent_core::tool::{Tool, ToolResult};

pub struct CalculatorTool;

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "Perform simple arithmetic calculations. Supports +, -, *, /, parentheses, and decimal numbers."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "expression": {
                    "type": "string",
                    "description": "The arithmetic expression to evaluate (e.g., '2 + 2')"
                }
            },
            "required": ["expression"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let expr = arguments["expression"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'expression' argument".into()))?;

        match evaluate(expr) {
            Ok(value) => Ok(ToolResult::ok(format!("Result: {}", format_number(value)))),
            Err(e) => Ok(ToolResult::failure(format!(
                "Error evaluating expression: {e}"
            ))),
        }
    }
}

/// Render integers without a trailing `.0`.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Evaluate an arithmetic expression string.
pub fn evaluate(expr: &str) -> Result<f64, String> {
    let tokens = lex(expr)?;
    let mut cursor = Cursor { tokens, pos: 0 };
    let value = cursor.expression()?;
    match cursor.peek() {
        None => Ok(value),
        Some(tok) => Err(format!("Unexpected trailing token: {tok:?}")),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tok {
    Num(f64),
    Add,
    Sub,
    Mul,
    Div,
    Open,
    Close,
}

fn lex(input: &str) -> Result<Vec<Tok>, String> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Tok::Add);
            }
            '-' => {
                chars.next();
                tokens.push(Tok::Sub);
            }
            '*' => {
                chars.next();
                tokens.push(Tok::Mul);
            }
            '/' => {
                chars.next();
                tokens.push(Tok::Div);
            }
            '(' => {
                chars.next();
                tokens.push(Tok::Open);
            }
            ')' => {
                chars.next();
                tokens.push(Tok::Close);
            }
            c if c.is_ascii_digit() || c == '.' => {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let num: f64 = literal
                    .parse()
                    .map_err(|_| format!("Invalid number: {literal}"))?;
                tokens.push(Tok::Num(num));
            }
            other => return Err(format!("Unexpected character: '{other}'")),
        }
    }

    Ok(tokens)
}

struct Cursor {
    tokens: Vec<Tok>,
    pos: usize,
}

impl Cursor {
    fn peek(&self) -> Option<Tok> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Tok> {
        let tok = self.peek();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    // expression = term (('+' | '-') term)*
    fn expression(&mut self) -> Result<f64, String> {
        let mut acc = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                Tok::Add => {
                    self.advance();
                    acc += self.term()?;
                }
                Tok::Sub => {
                    self.advance();
                    acc -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(acc)
    }

    // term = factor (('*' | '/') factor)*
    fn term(&mut self) -> Result<f64, String> {
        let mut acc = self.factor()?;
        while let Some(op) = self.peek() {
            match op {
                Tok::Mul => {
                    self.advance();
                    acc *= self.factor()?;
                }
                Tok::Div => {
                    self.advance();
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err("Division by zero".into());
                    }
                    acc /= divisor;
                }
                _ => break,
            }
        }
        Ok(acc)
    }

    // factor = '-' factor | NUMBER | '(' expression ')'
    fn factor(&mut self) -> Result<f64, String> {
        match self.advance() {
            Some(Tok::Sub) => Ok(-self.factor()?),
            Some(Tok::Num(n)) => Ok(n),
            Some(Tok::Open) => {
                let inner = self.expression()?;
                match self.advance() {
                    Some(Tok::Close) => Ok(inner),
                    _ => Err("Expected closing parenthesis".into()),
                }
            }
            Some(tok) => Err(format!("Unexpected token: {tok:?}")),
            None => Err("Unexpected end of expression".into()),
        }
    }
}
