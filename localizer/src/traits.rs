//! The seam between catalog file formats and the loader.

use std::io::{BufRead, Cursor, Write};

use crate::error::Error;

/// Reads and writes one catalog file format.
///
/// Providers hand the loader raw bytes, so formats only need a reader and a
/// writer; `from_str` and `from_bytes` are conveniences over `from_reader`.
///
/// ```rust
/// use localizer::{formats::JsonFormat, traits::Parser};
///
/// let format = JsonFormat::from_str(r#"{"title": "Welcome"}"#)?;
/// let mut out = Vec::new();
/// format.to_writer(&mut out)?;
/// assert_eq!(JsonFormat::from_bytes(&out)?, format);
/// # Ok::<(), localizer::Error>(())
/// ```
pub trait Parser {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(bytes))
    }
}
