//! Tokenises a textual command line into a structured [`Request`].
//!
//! Two lexical forms for arguments: a whitespace-delimited bare word, or a
//! double-quoted string where `\"` escapes a literal quote and any other
//! backslash is kept literally. The parser only ever produces
//! `Arg::String` tokens — numeric coercion happens in the handlers via
//! `Arg::as_uint`/`as_int`/`as_f64`, per the "arg_string_to_uint" coercion
//! contract.

use crate::action::ActionTag;
use crate::request::Request;
use kvengine_core::Arg;

/// Parse a single command line into a [`Request`].
///
/// An empty or all-whitespace line has no action token and resolves to
/// `ActionTag::UNKNOWN_COMMAND` with no arguments, same as any other
/// unrecognised first token.
pub fn parse_command(line: &str) -> Request {
    let mut tokens = tokenize(line).into_iter();
    let action = tokens.next().map(|t| ActionTag::from_name(&t)).unwrap_or(ActionTag::UNKNOWN_COMMAND);
    let args = tokens.map(Arg::String).collect();
    Request::new(action, args)
}

fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
            chars.next();
        }
        match chars.peek() {
            None => break,
            Some('"') => {
                chars.next();
                tokens.push(read_quoted(&mut chars));
            }
            Some(_) => tokens.push(read_bare(&mut chars)),
        }
    }
    tokens
}

fn read_quoted(chars: &mut std::iter::Peekable<std::str::Chars>) -> String {
    let mut token = String::new();
    loop {
        match chars.next() {
            None => break,
            Some('"') => break,
            Some('\\') => match chars.next() {
                Some('"') => token.push('"'),
                Some(other) => {
                    token.push('\\');
                    token.push(other);
                }
                None => token.push('\\'),
            },
            Some(c) => token.push(c),
        }
    }
    token
}

fn read_bare(chars: &mut std::iter::Peekable<std::str::Chars>) -> String {
    let mut token = String::new();
    while matches!(chars.peek(), Some(c) if !c.is_whitespace()) {
        token.push(chars.next().unwrap());
    }
    token
}
