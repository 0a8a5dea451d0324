//! Support for Apple XML property list catalogs.
//!
//! The root element must be a `<dict>`. Supported values are `<string>`,
//! `<integer>`, `<real>`, `<date>`, `<true/>`, `<false/>`, `<array>` of those,
//! and nested `<dict>`s, which are flattened into dotted keys.
//! `<data>` and arrays of arrays or dictionaries are rejected.

use std::io::{BufRead, Write};

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{
    error::Error,
    formats::{FormatType, join_key},
    traits::Parser,
    types::{Catalog, Value},
};

const DOCTYPE: &str = r#"plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd""#;

/// Represents a property list catalog as an ordered list of flattened entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    pub entries: Vec<(String, Value)>,
}

/// Owned view of the XML events the parser cares about.
#[derive(Debug, PartialEq)]
enum Token {
    Start(String),
    Empty(String),
    End(String),
    Text(String),
    Eof,
}

struct TokenReader<R: BufRead> {
    xml: Reader<R>,
    buf: Vec<u8>,
}

impl<R: BufRead> TokenReader<R> {
    fn new(reader: R) -> Self {
        TokenReader {
            xml: Reader::from_reader(reader),
            buf: Vec::new(),
        }
    }

    fn next(&mut self) -> Result<Token, Error> {
        loop {
            self.buf.clear();
            let token = match self.xml.read_event_into(&mut self.buf)? {
                Event::Start(e) => Token::Start(tag_name(e.name().as_ref())),
                Event::Empty(e) => Token::Empty(tag_name(e.name().as_ref())),
                Event::End(e) => Token::End(tag_name(e.name().as_ref())),
                Event::Text(e) => Token::Text(e.unescape()?.into_owned()),
                Event::CData(e) => Token::Text(String::from_utf8_lossy(&e.into_inner()).into_owned()),
                Event::Eof => Token::Eof,
                // Declarations, doctype, comments, processing instructions.
                _ => continue,
            };
            return Ok(token);
        }
    }

    /// Like `next`, but skips the whitespace that indents markup.
    fn next_tag(&mut self) -> Result<Token, Error> {
        loop {
            match self.next()? {
                Token::Text(t) if t.trim().is_empty() => continue,
                token => return Ok(token),
            }
        }
    }

    /// Reads text content up to the closing `tag`, verbatim.
    fn text_until_end(&mut self, tag: &str) -> Result<String, Error> {
        let mut text = String::new();
        loop {
            match self.next()? {
                Token::Text(t) => text.push_str(&t),
                Token::End(name) if name == tag => return Ok(text),
                Token::Eof => return Err(unexpected_eof()),
                other => {
                    return Err(Error::malformed(
                        "plist",
                        format!("unexpected {:?} inside <{}>", other, tag),
                    ));
                }
            }
        }
    }
}

fn tag_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).into_owned()
}

fn unexpected_eof() -> Error {
    Error::malformed("plist", "unexpected end of document")
}

fn is_scalar_tag(name: &str) -> bool {
    matches!(name, "string" | "integer" | "real" | "date")
}

/// Reads one scalar starting at `token`, or `None` if `token` is not a scalar.
fn scalar<R: BufRead>(reader: &mut TokenReader<R>, token: &Token) -> Result<Option<String>, Error> {
    match token {
        Token::Start(name) if is_scalar_tag(name) => reader.text_until_end(name).map(Some),
        Token::Empty(name) if is_scalar_tag(name) => Ok(Some(String::new())),
        Token::Empty(name) if name == "true" || name == "false" => Ok(Some(name.clone())),
        _ => Ok(None),
    }
}

fn parse_array<R: BufRead>(reader: &mut TokenReader<R>, key: &str) -> Result<Value, Error> {
    let mut items = Vec::new();
    loop {
        let token = reader.next_tag()?;
        match token {
            Token::End(ref name) if name == "array" => return Ok(Value::composite(items)),
            Token::Eof => return Err(unexpected_eof()),
            _ => match scalar(reader, &token)? {
                Some(item) => items.push(item),
                None => {
                    return Err(Error::malformed(
                        "plist",
                        format!("array `{}` may only contain scalar values", key),
                    ));
                }
            },
        }
    }
}

fn parse_dict<R: BufRead>(
    reader: &mut TokenReader<R>,
    prefix: &str,
    entries: &mut Vec<(String, Value)>,
) -> Result<(), Error> {
    loop {
        let key = match reader.next_tag()? {
            Token::End(name) if name == "dict" => return Ok(()),
            Token::Start(name) if name == "key" => join_key(prefix, &reader.text_until_end("key")?),
            Token::Eof => return Err(unexpected_eof()),
            other => {
                return Err(Error::malformed(
                    "plist",
                    format!("expected <key>, found {:?}", other),
                ));
            }
        };

        let token = reader.next_tag()?;
        match token {
            Token::Start(ref name) if name == "dict" => parse_dict(reader, &key, entries)?,
            Token::Empty(ref name) if name == "dict" => {}
            Token::Start(ref name) if name == "array" => {
                let value = parse_array(reader, &key)?;
                entries.push((key, value));
            }
            Token::Empty(ref name) if name == "array" => {
                entries.push((key, Value::composite(Vec::<String>::new())));
            }
            Token::Eof => return Err(unexpected_eof()),
            _ => match scalar(reader, &token)? {
                Some(text) => entries.push((key, Value::Scalar(text))),
                None => {
                    return Err(Error::malformed(
                        "plist",
                        format!("unsupported value {:?} for key `{}`", token, key),
                    ));
                }
            },
        }
    }
}

impl Parser for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut reader = TokenReader::new(reader);
        let mut entries = Vec::new();
        let mut in_plist = false;

        loop {
            match reader.next_tag()? {
                Token::Start(name) if name == "plist" && !in_plist => in_plist = true,
                Token::Start(name) if name == "dict" => {
                    parse_dict(&mut reader, "", &mut entries)?;
                    break;
                }
                Token::Empty(name) if name == "dict" => break,
                Token::Eof => return Err(Error::malformed("plist", "missing root <dict>")),
                other => {
                    return Err(Error::malformed(
                        "plist",
                        format!("expected root <dict>, found {:?}", other),
                    ));
                }
            }
        }

        if in_plist {
            match reader.next_tag()? {
                Token::End(name) if name == "plist" => {}
                Token::Eof => return Err(Error::malformed("plist", "missing </plist>")),
                other => {
                    return Err(Error::malformed(
                        "plist",
                        format!("unexpected {:?} after root <dict>", other),
                    ));
                }
            }
        }
        match reader.next_tag()? {
            Token::Eof => Ok(Format { entries }),
            other => Err(Error::malformed(
                "plist",
                format!("unexpected {:?} after end of document", other),
            )),
        }
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new_with_indent(&mut writer, b'\t', 1);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        xml_writer.write_event(Event::DocType(BytesText::from_escaped(DOCTYPE)))?;

        let mut plist = BytesStart::new("plist");
        plist.push_attribute(("version", "1.0"));
        xml_writer.write_event(Event::Start(plist))?;
        xml_writer.write_event(Event::Start(BytesStart::new("dict")))?;

        for (key, value) in &self.entries {
            xml_writer
                .create_element("key")
                .write_text_content(BytesText::new(key))?;
            match value {
                Value::Scalar(text) => {
                    xml_writer
                        .create_element("string")
                        .write_text_content(BytesText::new(text))?;
                }
                Value::Composite(items) => {
                    xml_writer.write_event(Event::Start(BytesStart::new("array")))?;
                    for item in items {
                        xml_writer
                            .create_element("string")
                            .write_text_content(BytesText::new(item))?;
                    }
                    xml_writer.write_event(Event::End(BytesEnd::new("array")))?;
                }
            }
        }

        xml_writer.write_event(Event::End(BytesEnd::new("dict")))?;
        xml_writer.write_event(Event::End(BytesEnd::new("plist")))?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

impl TryFrom<Format> for Catalog {
    type Error = Error;

    fn try_from(value: Format) -> Result<Self, Self::Error> {
        Catalog::from_entries(FormatType::Plist, value.entries)
    }
}

impl From<&Catalog> for Format {
    fn from(catalog: &Catalog) -> Self {
        Format {
            entries: catalog
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        }
    }
}
