//! Streaming record reader: decodes every row of every element in declared
//! order and dispatches each property value to a caller-supplied [`Sink`].
//!
//! The per-row decode loop generalizes the upstream `de::body::elements_fct`/
//! `properties_fct` pair from "accumulate into an in-memory map" to "push
//! into a `Sink`", per the streaming, no-whole-file-representation shape
//! this format requires.

use std::io::Read;

use tracing::debug;

use crate::codec::{self, Endianness};
use crate::error::{Error, ReaderError};
use crate::types::{DataType, FormatType, Header, PropertyKind, Value};

/// The reader's push target. One [`Sink`] implementation, the
/// [`crate::mesh::TriangleMeshAdapter`], specializes this for triangle
/// meshes; callers may implement it directly for any other domain shape.
pub trait Sink {
    /// Called once with the parsed schema. The sink may reject here with a
    /// domain-specific reason by returning `Err`.
    fn start(&mut self, header: &Header) -> Result<(), Error> {
        let _ = header;
        Ok(())
    }

    /// Called once per property per row, in declared order.
    fn handle(
        &mut self,
        element_name: &str,
        property_name: &str,
        property_ordinal: usize,
        value: &Value,
    ) -> Result<(), Error>;
}

/// A [`Sink`] that discards every value; used by the validator wrapper.
pub struct NullSink;

impl Sink for NullSink {
    fn handle(&mut self, _element_name: &str, _property_name: &str, _property_ordinal: usize, _value: &Value) -> Result<(), Error> {
        Ok(())
    }
}

fn endianness_of(format: FormatType) -> Option<Endianness> {
    match format {
        FormatType::BinaryLittleEndian => Some(Endianness::Little),
        FormatType::BinaryBigEndian => Some(Endianness::Big),
        FormatType::Ascii => None,
    }
}

struct AsciiLineSource<'a> {
    buf: &'a [u8],
    line_ending: &'static [u8],
}

impl<'a> AsciiLineSource<'a> {
    fn next_line(&mut self) -> Result<&'a str, Error> {
        let term = self.line_ending;
        let pos = self
            .buf
            .windows(term.len())
            .position(|w| w == term)
            .ok_or(Error::Reader(ReaderError::UnexpectedEof))?;
        let line = &self.buf[..pos];
        self.buf = &self.buf[pos + term.len()..];
        if line.iter().any(|&b| !(b == b' ' || (0x21..=0x7e).contains(&b))) {
            return Err(Error::Reader(ReaderError::InvalidCharacter));
        }
        std::str::from_utf8(line).map_err(|_| Error::Reader(ReaderError::InvalidCharacter))
    }
}

/// Drives the header-to-payload decode loop over a pre-positioned byte stream.
pub struct RecordReader;

impl RecordReader {
    /// Reads the header from the start of `input`, then streams the payload
    /// that follows it to `sink`.
    pub fn read_all<R: Read>(mut input: R, sink: &mut dyn Sink) -> Result<(), Error> {
        let mut buf = Vec::new();
        input.read_to_end(&mut buf)?;
        Self::read_all_from_slice(&buf, sink)
    }

    /// Same as [`Self::read_all`] but over an in-memory byte slice, avoiding
    /// a full buffering copy when the caller already holds the bytes.
    pub fn read_all_from_slice(buf: &[u8], sink: &mut dyn Sink) -> Result<(), Error> {
        let (header, offset) = crate::header::parse_header(buf)?;
        sink.start(&header)?;
        debug!(format = ?header.format, "beginning payload decode");

        let payload = &buf[offset..];
        match endianness_of(header.format) {
            Some(endianness) => Self::read_binary(&header, payload, endianness, sink),
            None => Self::read_ascii(&header, payload, header.line_ending.as_bytes(), sink),
        }
    }

    fn read_ascii(header: &Header, payload: &[u8], line_ending: &'static [u8], sink: &mut dyn Sink) -> Result<(), Error> {
        let mut src = AsciiLineSource { buf: payload, line_ending };
        for element in &header.elements {
            for _row in 0..element.count {
                let line = src.next_line()?;
                if line.starts_with(' ') || line.ends_with(' ') || line.contains("  ") {
                    return Err(Error::Reader(ReaderError::ExtraWhitespace));
                }
                let mut tokens = line.split(' ');
                for (ordinal, property) in element.properties.iter().enumerate() {
                    match property.kind {
                        PropertyKind::Scalar(kind) => {
                            let token = tokens.next().ok_or(Error::Reader(ReaderError::TooFewTokens))?;
                            let value = codec::decode_scalar_ascii(kind, token)?;
                            sink.handle(&element.name, &property.name, ordinal, &value)?;
                        }
                        PropertyKind::List { size_kind, element_kind } => {
                            let count_token = tokens.next().ok_or(Error::Reader(ReaderError::TooFewTokens))?;
                            let len = codec::decode_list_len_ascii(size_kind, count_token)?;
                            let value = decode_ascii_list(element_kind, len, &mut tokens)?;
                            sink.handle(&element.name, &property.name, ordinal, &value)?;
                        }
                    }
                }
                if tokens.next().is_some() {
                    return Err(Error::Reader(ReaderError::ExtraTokens));
                }
            }
        }
        Ok(())
    }

    fn read_binary<'a>(
        header: &Header,
        mut payload: &'a [u8],
        endianness: Endianness,
        sink: &mut dyn Sink,
    ) -> Result<(), Error> {
        for element in &header.elements {
            for _row in 0..element.count {
                for (ordinal, property) in element.properties.iter().enumerate() {
                    match property.kind {
                        PropertyKind::Scalar(kind) => {
                            let (value, rest) = codec::decode_scalar_binary(endianness, kind, payload)?;
                            payload = rest;
                            sink.handle(&element.name, &property.name, ordinal, &value)?;
                        }
                        PropertyKind::List { size_kind, element_kind } => {
                            let (len, rest) = codec::decode_list_len_binary(endianness, size_kind, payload)?;
                            payload = rest;
                            let (value, rest) = decode_binary_list(element_kind, len, payload, endianness)?;
                            payload = rest;
                            sink.handle(&element.name, &property.name, ordinal, &value)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

fn decode_ascii_list<'a>(kind: DataType, len: u64, tokens: &mut impl Iterator<Item = &'a str>) -> Result<Value, Error> {
    macro_rules! collect {
        ($variant:ident, $elem:ident) => {{
            let mut values = Vec::with_capacity(len as usize);
            for _ in 0..len {
                let token = tokens.next().ok_or(Error::Reader(ReaderError::TooFewTokens))?;
                let Value::$elem(v) = codec::decode_scalar_ascii(kind, token)? else {
                    unreachable!()
                };
                values.push(v);
            }
            Value::$variant(values)
        }};
    }
    let value = match kind {
        DataType::I8 => collect!(ListI8, I8),
        DataType::U8 => collect!(ListU8, U8),
        DataType::I16 => collect!(ListI16, I16),
        DataType::U16 => collect!(ListU16, U16),
        DataType::I32 => collect!(ListI32, I32),
        DataType::U32 => collect!(ListU32, U32),
        DataType::F32 => collect!(ListF32, F32),
        DataType::F64 => collect!(ListF64, F64),
    };
    Ok(value)
}

fn decode_binary_list(
    kind: DataType,
    len: u64,
    mut payload: &[u8],
    endianness: Endianness,
) -> Result<(Value, &[u8]), Error> {
    macro_rules! collect {
        ($variant:ident, $elem:ident) => {{
            let mut values = Vec::with_capacity(len as usize);
            for _ in 0..len {
                let (v, rest) = codec::decode_scalar_binary(endianness, kind, payload)?;
                payload = rest;
                let Value::$elem(v) = v else { unreachable!() };
                values.push(v);
            }
            Value::$variant(values)
        }};
    }
    let value = match kind {
        DataType::I8 => collect!(ListI8, I8),
        DataType::U8 => collect!(ListU8, U8),
        DataType::I16 => collect!(ListI16, I16),
        DataType::U16 => collect!(ListU16, U16),
        DataType::I32 => collect!(ListI32, I32),
        DataType::U32 => collect!(ListU32, U32),
        DataType::F32 => collect!(ListF32, F32),
        DataType::F64 => collect!(ListF64, F64),
    };
    Ok((value, payload))
}
