//! Streaming record writer: given a [`Source`], emits a syntactically
//! conformant PLY file in any of the three encodings.
//!
//! Header emission follows the upstream `ser::write_header`'s line-by-line
//! shape; payload emission generalizes `ser::write_values_ascii`/
//! `write_values_le`/`write_values_be` from one fixed primitive width per
//! call to runtime [`Value`] dispatch driven by a per-row [`Source`] pull.

use std::io::Write;

use crate::codec::{self, Endianness};
use crate::error::{Error, WriterError};
use crate::types::{CountType, FormatType, PropertyKind, Value};

/// One property's declared shape within an element, as declared by a
/// [`Source`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceProperty {
    pub name: String,
    pub kind: PropertyKind,
}

/// One element's declared shape, as declared by a [`Source`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceElement {
    pub name: String,
    pub count: u64,
    pub properties: Vec<SourceProperty>,
}

/// The schema a [`Source`] declares up front: its elements, and the
/// comments/obj_infos to carry into the header.
pub struct SourceSchema {
    pub elements: Vec<SourceElement>,
    pub comments: Vec<String>,
    pub obj_info: Vec<String>,
}

/// The writer's pull source. Supplies the schema once, then one value at a
/// time per (element, property, row) in declared order.
pub trait Source {
    /// Declares the schema and row counts.
    fn start(&mut self) -> Result<SourceSchema, Error>;

    /// Chosen size-kind for a list property's length prefix.
    fn list_size_kind(&self, element: &str, property: &str) -> CountType;

    /// Pulls the next value for `(element, property)`. Called exactly once
    /// per row, in row order, after `start`.
    fn next_value(&mut self, element: &str, property: &str) -> Result<Option<Value>, Error>;
}

fn validate_name(name: &str) -> Result<(), Error> {
    if name.is_empty() {
        return Err(Error::Writer(WriterError::EmptyName));
    }
    if !name.bytes().all(|b| (0x21..=0x7e).contains(&b)) {
        return Err(Error::Writer(WriterError::NameInvalidChars));
    }
    Ok(())
}

fn validate_text(text: &str, is_comment: bool) -> Result<(), Error> {
    if text.contains('\n') || text.contains('\r') {
        return Err(if is_comment {
            Error::Writer(WriterError::CommentHasNewline)
        } else {
            Error::Writer(WriterError::ObjInfoHasNewline)
        });
    }
    Ok(())
}

/// Drives the schema-to-bytes encode loop over an output stream.
pub struct RecordWriter;

impl RecordWriter {
    pub fn write_ascii<W: Write>(out: W, source: &mut dyn Source) -> Result<(), Error> {
        Self::write(out, source, FormatType::Ascii)
    }

    pub fn write_binary_le<W: Write>(out: W, source: &mut dyn Source) -> Result<(), Error> {
        Self::write(out, source, FormatType::BinaryLittleEndian)
    }

    pub fn write_binary_be<W: Write>(out: W, source: &mut dyn Source) -> Result<(), Error> {
        Self::write(out, source, FormatType::BinaryBigEndian)
    }

    /// Emits in the host's native byte order.
    pub fn write_native<W: Write>(out: W, source: &mut dyn Source) -> Result<(), Error> {
        match Endianness::native() {
            Endianness::Little => Self::write_binary_le(out, source),
            Endianness::Big => Self::write_binary_be(out, source),
        }
    }

    fn write<W: Write>(mut out: W, source: &mut dyn Source, format: FormatType) -> Result<(), Error> {
        let schema = source.start()?;

        for comment in &schema.comments {
            validate_text(comment, true)?;
        }
        for obj_info in &schema.obj_info {
            validate_text(obj_info, false)?;
        }
        for element in &schema.elements {
            validate_name(&element.name)?;
            if element.properties.is_empty() {
                return Err(Error::Writer(WriterError::ElementHasNoProperties));
            }
            for property in &element.properties {
                validate_name(&property.name)?;
            }
        }

        write!(out, "ply\r")?;
        write!(out, "format {} 1.0\r", format)?;
        for comment in &schema.comments {
            write!(out, "comment {}\r", comment)?;
        }
        for obj_info in &schema.obj_info {
            write!(out, "obj_info {}\r", obj_info)?;
        }
        for element in &schema.elements {
            write!(out, "element {} {}\r", element.name, element.count)?;
            for property in &element.properties {
                match property.kind {
                    PropertyKind::Scalar(data_type) => {
                        write!(out, "property {} {}\r", data_type, property.name)?;
                    }
                    PropertyKind::List { size_kind, element_kind } => {
                        write!(out, "property list {} {} {}\r", size_kind, element_kind, property.name)?;
                    }
                }
            }
        }
        write!(out, "end_header\r")?;

        let endianness = match format {
            FormatType::Ascii => None,
            FormatType::BinaryLittleEndian => Some(Endianness::Little),
            FormatType::BinaryBigEndian => Some(Endianness::Big),
        };

        for element in &schema.elements {
            for _row in 0..element.count {
                let mut ascii_tokens: Vec<String> = Vec::new();
                let mut binary_bytes: Vec<u8> = Vec::new();
                for property in &element.properties {
                    let value = source
                        .next_value(&element.name, &property.name)?
                        .ok_or(Error::Writer(WriterError::MissingData))?;
                    match endianness {
                        Some(endianness) => Self::encode_binary(
                            endianness,
                            source.list_size_kind(&element.name, &property.name),
                            &value,
                            &mut binary_bytes,
                        )?,
                        None => Self::encode_ascii(
                            source.list_size_kind(&element.name, &property.name),
                            &value,
                            &mut ascii_tokens,
                        )?,
                    }
                }
                match endianness {
                    Some(_) => out.write_all(&binary_bytes)?,
                    None => write!(out, "{}\r", ascii_tokens.join(" "))?,
                }
            }
        }

        Ok(())
    }

    fn encode_ascii(size_kind: CountType, value: &Value, tokens: &mut Vec<String>) -> Result<(), Error> {
        if let Some(len) = value.list_len() {
            check_list_overflow(size_kind, len as u64)?;
            let mut count_str = String::new();
            codec::encode_list_len_ascii(size_kind, len as u64, &mut count_str);
            tokens.push(count_str);
            for scalar in list_scalars(value) {
                if !codec::is_finite(&scalar) {
                    return Err(Error::Writer(WriterError::AsciiFloatListNotFinite));
                }
                let mut s = String::new();
                codec::encode_scalar_ascii(&scalar, &mut s);
                tokens.push(s);
            }
        } else {
            if !codec::is_finite(value) {
                return Err(Error::Writer(WriterError::AsciiFloatNotFinite));
            }
            let mut s = String::new();
            codec::encode_scalar_ascii(value, &mut s);
            tokens.push(s);
        }
        Ok(())
    }

    fn encode_binary(endianness: Endianness, size_kind: CountType, value: &Value, out: &mut Vec<u8>) -> Result<(), Error> {
        if let Some(len) = value.list_len() {
            check_list_overflow(size_kind, len as u64)?;
            codec::encode_list_len_binary(endianness, size_kind, len as u64, out);
            for scalar in list_scalars(value) {
                codec::encode_scalar_binary(endianness, &scalar, out);
            }
        } else {
            codec::encode_scalar_binary(endianness, value, out);
        }
        Ok(())
    }
}

fn check_list_overflow(size_kind: CountType, len: u64) -> Result<(), Error> {
    if len > size_kind.max_value() {
        return Err(Error::Writer(match size_kind {
            CountType::U8 => WriterError::OverflowU8List,
            CountType::U16 => WriterError::OverflowU16List,
            CountType::U32 => WriterError::OverflowU32List,
        }));
    }
    Ok(())
}

/// Expands a list [`Value`] into its scalar elements, each re-wrapped as the
/// matching scalar [`Value`] variant so the scalar codec can be reused.
fn list_scalars(value: &Value) -> Vec<Value> {
    match value {
        Value::ListI8(v) => v.iter().map(|&x| Value::I8(x)).collect(),
        Value::ListU8(v) => v.iter().map(|&x| Value::U8(x)).collect(),
        Value::ListI16(v) => v.iter().map(|&x| Value::I16(x)).collect(),
        Value::ListU16(v) => v.iter().map(|&x| Value::U16(x)).collect(),
        Value::ListI32(v) => v.iter().map(|&x| Value::I32(x)).collect(),
        Value::ListU32(v) => v.iter().map(|&x| Value::U32(x)).collect(),
        Value::ListF32(v) => v.iter().map(|&x| Value::F32(x)).collect(),
        Value::ListF64(v) => v.iter().map(|&x| Value::F64(x)).collect(),
        _ => Vec::new(),
    }
}

