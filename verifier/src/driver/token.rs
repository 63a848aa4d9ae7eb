/*!
A small whitespace-token cursor over one certificate line (§6), mirroring
[crate::task::parse]'s `Tokens` but carrying the line number so parse
failures can name the offending line.
*/

use crate::types::err::ParseError;

pub struct Tokens<'a> {
    line: usize,
    inner: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    pub fn new(line: usize, text: &'a str) -> Self {
        Tokens {
            line,
            inner: text.split_whitespace(),
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn next_token(&mut self) -> Result<&'a str, ParseError> {
        self.inner.next().ok_or(ParseError::Line(self.line))
    }

    pub fn next_u32(&mut self) -> Result<u32, ParseError> {
        self.next_token()?.parse().map_err(|_| ParseError::BadInteger)
    }

    pub fn next_usize(&mut self) -> Result<usize, ParseError> {
        self.next_token()?.parse().map_err(|_| ParseError::BadInteger)
    }

    pub fn next_i8(&mut self) -> Result<i8, ParseError> {
        self.next_token()?.parse().map_err(|_| ParseError::BadInteger)
    }

    /// Consumes the next token, requiring it to equal `literal` exactly
    /// (used for the `;` terminator most expression bodies end with).
    pub fn expect(&mut self, literal: &str) -> Result<(), ParseError> {
        let tok = self.next_token()?;
        if tok == literal {
            Ok(())
        } else {
            Err(ParseError::Line(self.line))
        }
    }

    pub fn rest_is_empty(&mut self) -> bool {
        self.inner.clone().next().is_none()
    }
}
