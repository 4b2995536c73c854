//! Converts the predictor's JavaScript payload into JSON.
//!
//! The predictor answers with a script rather than a document:
//!
//! ```text
//! var passesData = {location: {name: 'Sydney NSW, Australia'}, passes: [{begin: '20200101120000', ...}]};
//! ```
//!
//! The assignment preamble and the closing `;\n` have fixed lengths and are cut
//! off by position. What remains is a JavaScript object literal: keys may be
//! bare identifiers or single-quoted, strings may use either quote, and trailing
//! commas are legal. [`to_json`] walks that literal once and re-emits it as
//! strict JSON, keeping track of string state so text inside values is copied
//! verbatim and never mistaken for a key.

use std::{iter::Peekable, str::CharIndices};

use log::*;
use serde::Deserialize;
use serde_json::Value;

use super::{PassEvent, PassReport};
use crate::ParseError;

/// Length of `var passesData = `.
pub const PREAMBLE_LEN: usize = 17;
/// Length of the closing `;\n`.
pub const TRAILER_LEN: usize = 2;
/// Deepest bracket nesting accepted; `serde_json` stops just below this anyway.
pub const MAX_DEPTH: usize = 128;

#[derive(Debug, Deserialize)]
struct PredictorPayload {
    location: PredictorLocation,
    passes: Vec<PassEvent>,
}

#[derive(Debug, Deserialize)]
struct PredictorLocation {
    name: String,
}

/// Cuts the fixed-length preamble and trailer off a predictor body.
pub fn strip_envelope(body: &str) -> Result<&str, ParseError> {
    let end = body
        .len()
        .checked_sub(TRAILER_LEN)
        .filter(|end| *end >= PREAMBLE_LEN)
        .ok_or(ParseError::Envelope)?;
    body.get(PREAMBLE_LEN..end).ok_or(ParseError::Envelope)
}

/// Predictor body to a JSON value.
pub fn normalize(body: &str) -> Result<Value, ParseError> {
    let json = to_json(strip_envelope(body)?)?;
    trace!("Normalized predictor payload into {} bytes of JSON.", json.len());
    Ok(serde_json::from_str(&json)?)
}

/// Predictor body to a [`PassReport`].
pub fn parse_report(body: &str) -> Result<PassReport, ParseError> {
    let payload: PredictorPayload = serde_json::from_value(normalize(body)?)?;
    Ok(PassReport::new(payload.location.name, payload.passes))
}

/// Rewrites a JavaScript object literal as JSON text.
pub fn to_json(literal: &str) -> Result<String, ParseError> {
    let mut writer = LiteralWriter {
        chars: literal.char_indices().peekable(),
        out: String::with_capacity(literal.len() + literal.len() / 4),
        depth: 0,
    };
    writer.value()?;
    writer.skip_insignificant()?;
    if let Some((offset, found)) = writer.chars.next() {
        return Err(ParseError::UnexpectedChar { found, offset });
    }
    Ok(writer.out)
}

struct LiteralWriter<'a> {
    chars: Peekable<CharIndices<'a>>,
    out: String,
    depth: usize,
}

impl<'a> LiteralWriter<'a> {
    fn peek(&mut self) -> Option<(usize, char)> {
        self.chars.peek().copied()
    }

    fn next_or_end(&mut self) -> Result<(usize, char), ParseError> {
        self.chars.next().ok_or(ParseError::UnexpectedEnd)
    }

    fn expect(&mut self, wanted: char) -> Result<(), ParseError> {
        match self.next_or_end()? {
            (_, c) if c == wanted => Ok(()),
            (offset, found) => Err(ParseError::UnexpectedChar { found, offset }),
        }
    }

    /// Skips whitespace and comments.
    fn skip_insignificant(&mut self) -> Result<(), ParseError> {
        while let Some((offset, c)) = self.peek() {
            if c.is_whitespace() {
                self.chars.next();
                continue;
            }
            if c != '/' {
                break;
            }
            self.chars.next();
            match self.next_or_end()? {
                (_, '/') => {
                    while let Some((_, c)) = self.chars.next() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                (_, '*') => {
                    let mut star = false;
                    loop {
                        let (_, c) = self.next_or_end()?;
                        if star && c == '/' {
                            break;
                        }
                        star = c == '*';
                    }
                }
                _ => return Err(ParseError::UnexpectedChar { found: '/', offset }),
            }
        }
        Ok(())
    }

    fn value(&mut self) -> Result<(), ParseError> {
        self.skip_insignificant()?;
        match self.peek() {
            None => Err(ParseError::UnexpectedEnd),
            Some((_, '{')) => self.object(),
            Some((_, '[')) => self.array(),
            Some((_, '"')) | Some((_, '\'')) => self.string(),
            Some((_, c)) if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() => {
                self.number()
            }
            Some((offset, c)) if is_identifier_char(c) => match self.identifier().as_str() {
                word @ ("true" | "false" | "null") => {
                    self.out.push_str(word);
                    Ok(())
                }
                "undefined" => {
                    self.out.push_str("null");
                    Ok(())
                }
                _ => Err(ParseError::UnexpectedChar { found: c, offset }),
            },
            Some((offset, found)) => Err(ParseError::UnexpectedChar { found, offset }),
        }
    }

    fn object(&mut self) -> Result<(), ParseError> {
        self.expect('{')?;
        self.out.push('{');
        self.nested(|writer| {
            writer.members('}', |writer| {
                writer.key()?;
                writer.skip_insignificant()?;
                writer.expect(':')?;
                writer.out.push(':');
                writer.value()
            })
        })
    }

    fn array(&mut self) -> Result<(), ParseError> {
        self.expect('[')?;
        self.out.push('[');
        self.nested(|writer| writer.members(']', Self::value))
    }

    /// Runs `inner` one bracket deeper, refusing to go past [`MAX_DEPTH`].
    fn nested<F>(&mut self, inner: F) -> Result<(), ParseError>
    where
        F: FnOnce(&mut Self) -> Result<(), ParseError>,
    {
        if self.depth == MAX_DEPTH {
            return Err(ParseError::TooDeep);
        }
        self.depth += 1;
        let result = inner(self);
        self.depth -= 1;
        result
    }

    /// Comma-separated entries up to `close`, dropping a trailing comma.
    fn members<F>(&mut self, close: char, mut entry: F) -> Result<(), ParseError>
    where
        F: FnMut(&mut Self) -> Result<(), ParseError>,
    {
        let mut first = true;
        loop {
            self.skip_insignificant()?;
            match self.peek() {
                None => return Err(ParseError::UnexpectedEnd),
                Some((_, c)) if c == close => {
                    self.chars.next();
                    self.out.push(close);
                    return Ok(());
                }
                Some(_) => {
                    if !first {
                        self.out.push(',');
                    }
                    first = false;
                    entry(self)?;
                }
            }

            self.skip_insignificant()?;
            match self.peek() {
                Some((_, ',')) => {
                    self.chars.next();
                }
                Some((_, c)) if c == close => {}
                Some((offset, found)) => return Err(ParseError::UnexpectedChar { found, offset }),
                None => return Err(ParseError::UnexpectedEnd),
            }
        }
    }

    fn key(&mut self) -> Result<(), ParseError> {
        match self.peek() {
            Some((_, '"')) | Some((_, '\'')) => self.string(),
            Some((_, c)) if is_identifier_char(c) => {
                let name = self.identifier();
                self.out.push('"');
                self.out.push_str(&name);
                self.out.push('"');
                Ok(())
            }
            Some((offset, found)) => Err(ParseError::UnexpectedChar { found, offset }),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    fn identifier(&mut self) -> String {
        let mut name = String::new();
        while let Some((_, c)) = self.peek() {
            if !is_identifier_char(c) {
                break;
            }
            name.push(c);
            self.chars.next();
        }
        name
    }

    fn number(&mut self) -> Result<(), ParseError> {
        while let Some((_, c)) = self.peek() {
            if !(c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '.')) {
                break;
            }
            // JSON forbids a leading '+'.
            if !(c == '+' && self.out.ends_with(|p: char| matches!(p, ',' | ':' | '['))) {
                self.out.push(c);
            }
            self.chars.next();
        }
        Ok(())
    }

    /// Copies a single- or double-quoted string as a double-quoted JSON string.
    fn string(&mut self) -> Result<(), ParseError> {
        let (start, quote) = self.next_or_end()?;
        self.out.push('"');
        loop {
            let (_, c) = self
                .chars
                .next()
                .ok_or(ParseError::UnterminatedString(start))?;
            match c {
                c if c == quote => break,
                '\\' => {
                    let (_, escaped) = self
                        .chars
                        .next()
                        .ok_or(ParseError::UnterminatedString(start))?;
                    match escaped {
                        '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' | 'u' => {
                            self.out.push('\\');
                            self.out.push(escaped);
                        }
                        '\n' => {}
                        '0' => self.push_escaped('\0'),
                        'v' => self.push_escaped('\u{b}'),
                        'x' => {
                            let decoded = self.hex_escape()?;
                            self.push_escaped(decoded);
                        }
                        other => self.push_escaped(other),
                    }
                }
                other => self.push_escaped(other),
            }
        }
        self.out.push('"');
        Ok(())
    }

    /// The two hex digits of a `\xHH` escape.
    fn hex_escape(&mut self) -> Result<char, ParseError> {
        let mut code = 0u8;
        for _ in 0..2 {
            let (offset, digit) = self.next_or_end()?;
            let value = digit
                .to_digit(16)
                .ok_or(ParseError::UnexpectedChar { found: digit, offset })?;
            code = code * 16 + value as u8;
        }
        Ok(char::from(code))
    }

    fn push_escaped(&mut self, c: char) {
        match c {
            '"' => self.out.push_str("\\\""),
            '\\' => self.out.push_str("\\\\"),
            '\n' => self.out.push_str("\\n"),
            '\r' => self.out.push_str("\\r"),
            '\t' => self.out.push_str("\\t"),
            c if (c as u32) < 0x20 => self.out.push_str(&format!("\\u{:04x}", c as u32)),
            c => self.out.push(c),
        }
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}
