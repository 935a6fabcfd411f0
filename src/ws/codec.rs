//! Wire encoding for outbound control messages.
//!
//! The client's own tooling emits JSON with a single space after every
//! `:` and `,` and escapes everything outside printable ASCII. Commands
//! produced here are byte-identical to that form, e.g.
//! `{"cmd": "state", "state": "pause", "group": "gpu"}`.

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

use crate::domain::StateCommand;
use crate::error::CtlError;

/// `serde_json` formatter producing `", "` / `": "` separators and
/// `\uXXXX` escapes for non-printable-ASCII characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if fragment.bytes().all(|b| (b' '..=b'~').contains(&b)) {
            return writer.write_all(fragment.as_bytes());
        }
        let mut utf8 = [0u8; 4];
        let mut utf16 = [0u16; 2];
        for ch in fragment.chars() {
            if (' '..='~').contains(&ch) {
                writer.write_all(ch.encode_utf8(&mut utf8).as_bytes())?;
            } else {
                for unit in ch.encode_utf16(&mut utf16).iter() {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}

/// Serializes any value with [`SpacedFormatter`].
///
/// # Errors
///
/// Returns [`CtlError::Encode`] if `value` fails to serialize.
pub fn to_wire_string<T>(value: &T) -> Result<String, CtlError>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::with_capacity(64);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| CtlError::Encode(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| CtlError::Encode(e.to_string()))
}

/// Encodes a state command into the text frame sent to the client.
///
/// # Errors
///
/// Returns [`CtlError::Encode`] if serialization fails.
pub fn encode_command(command: &StateCommand) -> Result<String, CtlError> {
    to_wire_string(command)
}
