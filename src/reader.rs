use crate::tokens::{tokenize, Token};
use crate::types::{Float, Int, Value};
use std::fmt;
use std::iter::Peekable;
use std::slice;

type Reader<'a> = Peekable<slice::Iter<'a, Token<'a>>>;

pub type Result<T = Value> = std::result::Result<T, Error>;

#[derive(Debug, PartialEq)]
pub enum Error {
    UnexpectedEof,
    UnexpectedCloseParen,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnexpectedEof => write!(f, "syntax error: unexpected EOF while reading"),
            Error::UnexpectedCloseParen => write!(f, "syntax error: unexpected close-paren"),
        }
    }
}

pub fn read_str(input: &str) -> Result {
    let tokens = tokenize(input);
    let mut reader = tokens.iter().peekable();
    let form = read_form(&mut reader)?;
    let leftover = reader.count();
    if leftover > 0 {
        log::warn!("ignoring {} tokens after the first form", leftover);
    }
    Ok(form)
}

/// Parses one complete form from the front of `reader`, consuming exactly the
/// tokens that make it up.
pub(crate) fn read_form(reader: &mut Reader) -> Result {
    match reader.next() {
        Some(Token::OpenRoundBracket) => read_list(reader),
        Some(Token::CloseRoundBracket) => Err(Error::UnexpectedCloseParen),
        Some(Token::PlainChars(chars)) => Ok(read_atom(chars)),
        None => Err(Error::UnexpectedEof),
    }
}

fn read_list(reader: &mut Reader) -> Result {
    let mut elements = Vec::new();
    loop {
        match reader.peek() {
            Some(Token::CloseRoundBracket) => {
                reader.next();
                break;
            }
            Some(_) => elements.push(read_form(reader)?),
            None => return Err(Error::UnexpectedEof),
        }
    }
    Ok(Value::wrap_list(elements))
}

fn read_atom(chars: &str) -> Value {
    if let Some(x) = read_int(chars) {
        return Value::Integer(x);
    }
    if let Some(x) = read_float(chars) {
        return Value::Float(x);
    }
    Value::new_symbol(chars)
}

fn read_int(chars: &str) -> Option<Int> {
    chars.parse::<Int>().ok()
}

fn read_float(chars: &str) -> Option<Float> {
    // f64's FromStr also takes "inf" and "NaN", and overflows "1e999" to
    // infinity. None of those would print back as a float, so they stay symbols.
    let numeric = chars
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    let has_digit = chars.chars().any(|c| c.is_ascii_digit());
    match numeric && has_digit {
        true => chars.parse::<Float>().ok().filter(|x| x.is_finite()),
        false => None,
    }
}
