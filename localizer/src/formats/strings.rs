//! Support for Apple `.strings` catalogs.
//!
//! Every entry is a scalar: `"key" = "value";`. Block and line comments are
//! allowed between entries; the comment directly before an entry is kept.
//! Header lines of the form `//: Name: value` are collected as metadata.
//! Anything else is a malformed file.

use std::collections::HashMap;
use std::io::{BufRead, Read};
use std::iter::Peekable;
use std::str::Chars;

use indoc::indoc;

use crate::{
    error::Error,
    formats::FormatType,
    traits::Parser,
    types::{Catalog, Value},
};

/// Represents an Apple `.strings` file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    /// Language recorded in the `//: Language:` header, if any.
    pub language: String,
    /// All key-value pairs in file order.
    pub pairs: Vec<Pair>,
}

/// A single key-value pair in a `.strings` file, possibly with an associated comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub key: String,
    pub value: String,
    /// Comment immediately preceding the pair, including its markers.
    pub comment: Option<String>,
}

impl std::fmt::Display for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(comment) = &self.comment {
            writeln!(f, "{}", comment)?;
        }
        write!(f, "\"{}\" = \"{}\";", escape(&self.key), escape(&self.value))
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

/// Character cursor that tracks the current line for error messages.
struct Cursor<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Cursor<'a> {
    fn new(content: &'a str) -> Self {
        Cursor {
            chars: content.chars().peekable(),
            line: 1,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn error(&self, message: impl std::fmt::Display) -> Error {
        Error::malformed("strings", format!("line {}: {}", self.line, message))
    }

    /// Skips whitespace and returns how many line breaks were crossed.
    fn skip_whitespace(&mut self) -> usize {
        let mut newlines = 0;
        while self.peek().is_some_and(char::is_whitespace) {
            if self.bump() == Some('\n') {
                newlines += 1;
            }
        }
        newlines
    }

    fn expect(&mut self, expected: char) -> Result<(), Error> {
        self.skip_whitespace();
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("expected `{}`, found `{}`", expected, c))),
            None => Err(self.error(format!("expected `{}`, found end of file", expected))),
        }
    }

    /// Reads a comment; the leading `/` has been peeked but not consumed.
    fn comment(&mut self) -> Result<String, Error> {
        self.bump();
        let mut text = String::from("/");
        match self.bump() {
            Some('/') => {
                text.push('/');
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    text.push(c);
                    self.bump();
                }
            }
            Some('*') => {
                text.push('*');
                loop {
                    match self.bump() {
                        Some('*') if self.peek() == Some('/') => {
                            self.bump();
                            text.push_str("*/");
                            break;
                        }
                        Some(c) => text.push(c),
                        None => return Err(self.error("unterminated block comment")),
                    }
                }
            }
            _ => return Err(self.error("stray `/`")),
        }
        Ok(text.trim_end().to_string())
    }

    fn quoted(&mut self) -> Result<String, Error> {
        self.expect('"')?;
        let mut value = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(value),
                Some('\\') => value.push(self.escape_sequence()?),
                Some(c) => value.push(c),
                None => return Err(self.error("unterminated string literal")),
            }
        }
    }

    fn escape_sequence(&mut self) -> Result<char, Error> {
        match self.bump() {
            Some('n') => Ok('\n'),
            Some('t') => Ok('\t'),
            Some('r') => Ok('\r'),
            Some('0') => Ok('\0'),
            Some(c @ ('"' | '\'' | '\\')) => Ok(c),
            Some('U') | Some('u') => self.unicode_escape(),
            Some(c) => Err(self.error(format!("unknown escape `\\{}`", c))),
            None => Err(self.error("unterminated escape sequence")),
        }
    }

    /// Reads the four hex digits of a `\\Uxxxx` escape.
    fn utf16_unit(&mut self) -> Result<u16, Error> {
        let mut hex = String::with_capacity(4);
        while hex.len() < 4 {
            match self.peek() {
                Some(c) if c.is_ascii_hexdigit() => {
                    hex.push(c);
                    self.bump();
                }
                _ => return Err(self.error(format!("invalid unicode escape `\\U{}`", hex))),
            }
        }
        u16::from_str_radix(&hex, 16)
            .map_err(|_| self.error(format!("invalid unicode escape `\\U{}`", hex)))
    }

    /// Decodes a `\\Uxxxx` escape. Characters outside the BMP are written as
    /// a high surrogate escape followed by a low surrogate escape.
    fn unicode_escape(&mut self) -> Result<char, Error> {
        let high = self.utf16_unit()?;
        let mut units = vec![high];
        if (0xD800..=0xDBFF).contains(&high) {
            if self.bump() != Some('\\') || !matches!(self.bump(), Some('U' | 'u')) {
                return Err(self.error(format!("unpaired surrogate `\\U{:04X}`", high)));
            }
            units.push(self.utf16_unit()?);
        }
        match char::decode_utf16(units).collect::<Vec<_>>().as_slice() {
            [Ok(c)] => Ok(*c),
            _ => Err(self.error(format!("unpaired surrogate `\\U{:04X}`", high))),
        }
    }

    /// Reads a key: quoted, or a bare identifier as Apple's tooling accepts.
    fn key(&mut self) -> Result<String, Error> {
        self.skip_whitespace();
        if self.peek() == Some('"') {
            return self.quoted();
        }
        let mut key = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || matches!(c, '_' | '.' | '-' | '$' | ':') {
                key.push(c);
                self.bump();
            } else {
                break;
            }
        }
        if key.is_empty() {
            let found = self.peek().map_or("end of file".to_string(), |c| format!("`{}`", c));
            return Err(self.error(format!("expected a key, found {}", found)));
        }
        Ok(key)
    }
}

impl Format {
    /// Decodes raw bytes, honouring a UTF-8 or UTF-16 byte order mark.
    fn decode(reader: impl Read) -> Result<String, Error> {
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(reader);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;
        Ok(decoded)
    }

    fn parse(content: &str) -> Result<Self, Error> {
        let mut cursor = Cursor::new(content);
        let mut header = HashMap::<String, String>::new();
        let mut last_comment: Option<String> = None;
        let mut pairs = Vec::new();

        loop {
            // A blank line detaches a comment from the next pair.
            if cursor.skip_whitespace() > 1 {
                last_comment = None;
            }
            match cursor.peek() {
                None => break,
                Some('/') => {
                    let comment = cursor.comment()?;
                    if let Some(meta) = comment.strip_prefix("//:") {
                        // Example: "//: Language: French"
                        if let Some((name, value)) = meta.split_once(':') {
                            header.insert(name.trim().to_string(), value.trim().to_string());
                        }
                    } else {
                        last_comment = Some(comment);
                    }
                }
                Some(_) => {
                    let key = cursor.key()?;
                    cursor.expect('=')?;
                    let value = cursor.quoted()?;
                    cursor.expect(';')?;
                    pairs.push(Pair {
                        key,
                        value,
                        comment: last_comment.take(),
                    });
                }
            }
        }

        Ok(Format {
            language: header.remove("Language").unwrap_or_default(),
            pairs,
        })
    }
}

impl Parser for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        Self::parse(&Self::decode(reader)?)
    }

    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut content = format!(
            indoc! {"
            // This file is generated by localizer.
            //
            //: Language: {}
            //

            "},
            self.language
        );

        for pair in &self.pairs {
            content.push_str(&pair.to_string());
            content.push('\n');
        }

        writer.write_all(content.as_bytes()).map_err(Error::Io)
    }
}

impl TryFrom<Format> for Catalog {
    type Error = Error;

    fn try_from(value: Format) -> Result<Self, Self::Error> {
        Catalog::from_entries(
            FormatType::Strings,
            value
                .pairs
                .into_iter()
                .map(|pair| (pair.key, Value::Scalar(pair.value))),
        )
    }
}

impl TryFrom<&Catalog> for Format {
    type Error = Error;

    /// `.strings` has no arrays; composite values cannot be written.
    fn try_from(catalog: &Catalog) -> Result<Self, Self::Error> {
        let pairs = catalog
            .iter()
            .map(|(key, value)| match value {
                Value::Scalar(value) => Ok(Pair {
                    key: key.clone(),
                    value: value.clone(),
                    comment: None,
                }),
                Value::Composite(_) => Err(Error::InvalidValue {
                    key: key.clone(),
                    message: "composite values are not supported in .strings files".to_string(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Format {
            language: catalog
                .language
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            pairs,
        })
    }
}
