//! Support for JSON catalog files.
//!
//! The root must be an object. Strings, numbers and booleans become scalar
//! values, arrays of those become composite values, nested objects are
//! flattened into dotted keys.

use std::fmt;
use std::io::{BufRead, Write};

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number, Value as JsonValue};

use crate::{
    error::Error,
    formats::{FormatType, join_key},
    traits::Parser,
    types::{Catalog, Value},
};

/// Represents a JSON catalog file as an ordered list of flattened entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    pub entries: Vec<(String, Value)>,
}

impl Parser for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let root: Node = serde_json::from_reader(reader)?;
        let Node::Object(members) = root else {
            return Err(Error::malformed("json", "root must be an object"));
        };

        let mut entries = Vec::new();
        flatten_object("", members, &mut entries)?;
        Ok(Format { entries })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let object = self
            .entries
            .iter()
            .map(|(key, value)| {
                let json = match value {
                    Value::Scalar(s) => JsonValue::String(s.clone()),
                    Value::Composite(items) => {
                        JsonValue::Array(items.iter().cloned().map(JsonValue::String).collect())
                    }
                };
                (key.clone(), json)
            })
            .collect::<Map<_, _>>();

        serde_json::to_writer_pretty(&mut writer, &JsonValue::Object(object))?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// A parsed JSON document that keeps every object member in source order.
///
/// `serde_json::Value` collapses repeated keys into the last one, which would
/// hide duplicate catalog entries.
#[derive(Debug, PartialEq)]
enum Node {
    Scalar(String),
    Null,
    Array(Vec<Node>),
    Object(Vec<(String, Node)>),
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NodeVisitor;

        impl<'de> Visitor<'de> for NodeVisitor {
            type Value = Node;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any JSON value")
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<Node, E> {
                Ok(Node::Scalar(value.to_string()))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Node, E> {
                Ok(Node::Scalar(value.to_string()))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Node, E> {
                Ok(Node::Scalar(value.to_string()))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Node, E> {
                Number::from_f64(value)
                    .map(|n| Node::Scalar(n.to_string()))
                    .ok_or_else(|| E::custom(format!("invalid number {}", value)))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Node, E> {
                Ok(Node::Scalar(value.to_string()))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<Node, E> {
                Ok(Node::Scalar(value))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Node, E> {
                Ok(Node::Null)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Node, A::Error> {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Node::Array(items))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Node, A::Error> {
                let mut members = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, Node>()? {
                    members.push((key, value));
                }
                Ok(Node::Object(members))
            }
        }

        deserializer.deserialize_any(NodeVisitor)
    }
}

fn flatten_object(
    prefix: &str,
    members: Vec<(String, Node)>,
    entries: &mut Vec<(String, Value)>,
) -> Result<(), Error> {
    for (key, value) in members {
        let key = join_key(prefix, &key);
        match value {
            Node::Object(nested) => flatten_object(&key, nested, entries)?,
            Node::Array(items) => {
                let items = items
                    .into_iter()
                    .map(|item| match item {
                        Node::Scalar(text) => Ok(text),
                        _ => Err(Error::malformed(
                            "json",
                            format!("array `{}` may only contain scalar values", key),
                        )),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                entries.push((key, Value::composite(items)));
            }
            Node::Scalar(text) => entries.push((key, Value::Scalar(text))),
            Node::Null => {
                return Err(Error::malformed(
                    "json",
                    format!("key `{}` has a null value", key),
                ));
            }
        }
    }
    Ok(())
}

impl TryFrom<Format> for Catalog {
    type Error = Error;

    fn try_from(value: Format) -> Result<Self, Self::Error> {
        Catalog::from_entries(FormatType::Json, value.entries)
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
