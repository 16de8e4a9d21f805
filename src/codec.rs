//! Stateless scalar encode/decode for the eight numeric kinds, in ASCII and
//! in either binary byte order. Binary encode/decode mirrors the upstream
//! `ser::write_values_le`/`write_values_be` and `de::body::le_number_fct`/
//! `be_number_fct` dispatch-per-`DataType` shape, built on `num-traits`'
//! `ToBytes`/`FromBytes` rather than one monomorphized function per Rust
//! numeric type.

use crate::error::ReaderError;
use crate::types::{CountType, DataType, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    pub fn native() -> Endianness {
        if cfg!(target_endian = "little") {
            Endianness::Little
        } else {
            Endianness::Big
        }
    }
}

/// Trims trailing zeros after a decimal point, then the bare trailing `.`
/// itself if the whole fractional part vanished. No-op if `text` has no
/// decimal point (the magnitude already exhausted the digit budget below).
fn trim_fixed(text: String) -> String {
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0');
        trimmed.strip_suffix('.').unwrap_or(trimmed).to_string()
    } else {
        text
    }
}

/// Number of fractional digits to request from `{:.*}` so the *total*
/// significant digits printed is `max_digits10`, mirroring
/// `ply_writer.cc:182-184`'s `num_digits = max(max_digits10 - log, 0)` where
/// `log = static_cast<int>(log10(|value|)) + 1`.
fn fixed_precision(abs_log10: f64, max_digits10: i32) -> usize {
    let log = abs_log10.trunc() as i32 + 1;
    (max_digits10 - log).max(0) as usize
}

/// Formats an `f32` the way `ply_writer.cc`'s `SerializeASCII<float>` does:
/// fixed-point with precision chosen from `max_digits10` (9) and the value's
/// order of magnitude, then trailing zeros (and a bare trailing `.`)
/// trimmed. `+0.0`/`-0.0` are special-cased since `log10(0)` is undefined.
fn format_float_f32(value: f32) -> String {
    if value == 0.0 {
        return if value.is_sign_negative() { "-0".to_string() } else { "0".to_string() };
    }
    let precision = fixed_precision(value.abs().log10() as f64, 9);
    trim_fixed(format!("{:.*}", precision, value))
}

/// Same as [`format_float_f32`] but for `f64`, whose `max_digits10` is 17.
fn format_float_f64(value: f64) -> String {
    if value == 0.0 {
        return if value.is_sign_negative() { "-0".to_string() } else { "0".to_string() };
    }
    let precision = fixed_precision(value.abs().log10(), 17);
    trim_fixed(format!("{:.*}", precision, value))
}

/// Writes `value`'s decimal textual form to `out`. Non-finite floats fail
/// with [`ReaderError`]-shaped textual diagnostics are not applicable here;
/// callers in the writer surface `AsciiFloatNotFinite`/`AsciiFloatListNotFinite`
/// themselves after calling [`is_finite`].
pub fn encode_scalar_ascii(value: &Value, out: &mut String) {
    match value {
        Value::I8(v) => out.push_str(&v.to_string()),
        Value::U8(v) => out.push_str(&v.to_string()),
        Value::I16(v) => out.push_str(&v.to_string()),
        Value::U16(v) => out.push_str(&v.to_string()),
        Value::I32(v) => out.push_str(&v.to_string()),
        Value::U32(v) => out.push_str(&v.to_string()),
        Value::F32(v) => out.push_str(&format_float_f32(*v)),
        Value::F64(v) => out.push_str(&format_float_f64(*v)),
        _ => unreachable!("encode_scalar_ascii called with a list value"),
    }
}

/// Whether this value (assumed a float scalar) is finite.
pub fn is_finite(value: &Value) -> bool {
    match value {
        Value::F32(v) => v.is_finite(),
        Value::F64(v) => v.is_finite(),
        _ => true,
    }
}

/// Writes `value`'s raw bytes in the requested byte order to `out`.
pub fn encode_scalar_binary(endianness: Endianness, value: &Value, out: &mut Vec<u8>) {
    macro_rules! push {
        ($v:expr) => {
            match endianness {
                Endianness::Little => out.extend_from_slice(&$v.to_le_bytes()),
                Endianness::Big => out.extend_from_slice(&$v.to_be_bytes()),
            }
        };
    }
    match value {
        Value::I8(v) => push!(v),
        Value::U8(v) => push!(v),
        Value::I16(v) => push!(v),
        Value::U16(v) => push!(v),
        Value::I32(v) => push!(v),
        Value::U32(v) => push!(v),
        Value::F32(v) => push!(v),
        Value::F64(v) => push!(v),
        _ => unreachable!("encode_scalar_binary called with a list value"),
    }
}

/// Encodes a list length of `len` in the given `size_kind` and byte order.
pub fn encode_list_len_binary(endianness: Endianness, size_kind: CountType, len: u64, out: &mut Vec<u8>) {
    match size_kind {
        CountType::U8 => encode_scalar_binary(endianness, &Value::U8(len as u8), out),
        CountType::U16 => encode_scalar_binary(endianness, &Value::U16(len as u16), out),
        CountType::U32 => encode_scalar_binary(endianness, &Value::U32(len as u32), out),
    }
}

pub fn encode_list_len_ascii(size_kind: CountType, len: u64, out: &mut String) {
    match size_kind {
        CountType::U8 => out.push_str(&(len as u8).to_string()),
        CountType::U16 => out.push_str(&(len as u16).to_string()),
        CountType::U32 => out.push_str(&(len as u32).to_string()),
    }
}

/// Strictly parses `token` as a value of `kind`: no leading whitespace (the
/// caller has already split on single spaces, so `token` never contains
/// any), no trailing characters.
pub fn decode_scalar_ascii(kind: DataType, token: &str) -> Result<Value, ReaderError> {
    match kind {
        DataType::I8 => token.parse::<i8>().map(Value::I8).map_err(range_or_parse_err),
        DataType::U8 => token.parse::<u8>().map(Value::U8).map_err(range_or_parse_err),
        DataType::I16 => token.parse::<i16>().map(Value::I16).map_err(range_or_parse_err),
        DataType::U16 => token.parse::<u16>().map(Value::U16).map_err(range_or_parse_err),
        DataType::I32 => token.parse::<i32>().map(Value::I32).map_err(range_or_parse_err),
        DataType::U32 => token.parse::<u32>().map(Value::U32).map_err(range_or_parse_err),
        DataType::F32 => token.parse::<f32>().map(Value::F32).map_err(|_| ReaderError::PropertyParseFailed),
        DataType::F64 => token.parse::<f64>().map(Value::F64).map_err(|_| ReaderError::PropertyParseFailed),
    }
}

fn range_or_parse_err(e: std::num::ParseIntError) -> ReaderError {
    use std::num::IntErrorKind;
    match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ReaderError::PropertyOutOfRange,
        _ => ReaderError::PropertyParseFailed,
    }
}

/// Parses a list-length token strictly as the integral `size_kind`.
pub fn decode_list_len_ascii(size_kind: CountType, token: &str) -> Result<u64, ReaderError> {
    if token.starts_with('-') {
        return Err(ReaderError::NegativeListSize);
    }
    let value: u64 = token.parse().map_err(|_| ReaderError::ListSizeParseFailed)?;
    if value > size_kind.max_value() {
        return Err(ReaderError::ListSizeOutOfRange);
    }
    Ok(value)
}

/// Reads one scalar of `kind` in `endianness` from the front of `input`,
/// returning the value and the remaining bytes.
pub fn decode_scalar_binary<'a>(
    endianness: Endianness,
    kind: DataType,
    input: &'a [u8],
) -> Result<(Value, &'a [u8]), ReaderError> {
    let width = kind.width();
    if input.len() < width {
        return Err(ReaderError::UnexpectedEof);
    }
    let (bytes, rest) = input.split_at(width);
    macro_rules! read {
        ($ty:ty, $variant:ident) => {{
            let arr: [u8; std::mem::size_of::<$ty>()] = bytes.try_into().expect("width matches size_of");
            let v = match endianness {
                Endianness::Little => <$ty>::from_le_bytes(arr),
                Endianness::Big => <$ty>::from_be_bytes(arr),
            };
            Value::$variant(v)
        }};
    }
    let value = match kind {
        DataType::I8 => read!(i8, I8),
        DataType::U8 => read!(u8, U8),
        DataType::I16 => read!(i16, I16),
        DataType::U16 => read!(u16, U16),
        DataType::I32 => read!(i32, I32),
        DataType::U32 => read!(u32, U32),
        DataType::F32 => read!(f32, F32),
        DataType::F64 => read!(f64, F64),
    };
    Ok((value, rest))
}

pub fn decode_list_len_binary<'a>(
    endianness: Endianness,
    size_kind: CountType,
    input: &'a [u8],
) -> Result<(u64, &'a [u8]), ReaderError> {
    let data_type = match size_kind {
        CountType::U8 => DataType::U8,
        CountType::U16 => DataType::U16,
        CountType::U32 => DataType::U32,
    };
    let (value, rest) = decode_scalar_binary(endianness, data_type, input)?;
    let len = match value {
        Value::U8(v) => v as u64,
        Value::U16(v) => v as u64,
        Value::U32(v) => v as u64,
        _ => unreachable!(),
    };
    Ok((len, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s2_pi_f32_shortest_round_trip() {
        let mut out = String::new();
        encode_scalar_ascii(&Value::F32(std::f32::consts::PI), &mut out);
        assert_eq!(out, "3.14159274");
    }

    #[test]
    fn list_len_boundaries() {
        assert_eq!(decode_list_len_ascii(CountType::U8, "255").unwrap(), 255);
        assert!(decode_list_len_ascii(CountType::U8, "256").is_err());
        assert_eq!(decode_list_len_ascii(CountType::U16, "65535").unwrap(), 65535);
        assert!(decode_list_len_ascii(CountType::U16, "65536").is_err());
        assert_eq!(decode_list_len_ascii(CountType::U32, "4294967295").unwrap(), 4294967295);
        assert!(decode_list_len_ascii(CountType::U32, "4294967296").is_err());
    }

    #[test]
    fn negative_list_size_rejected() {
        assert_eq!(decode_list_len_ascii(CountType::U8, "-1").unwrap_err(), ReaderError::NegativeListSize);
    }

    #[test]
    fn binary_round_trip_each_kind() {
        let values = [
            Value::I8(-12),
            Value::U8(200),
            Value::I16(-3000),
            Value::U16(60000),
            Value::I32(-70000),
            Value::U32(4000000000),
            Value::F32(1.5),
            Value::F64(-2.5),
        ];
        for endianness in [Endianness::Little, Endianness::Big] {
            for value in &values {
                let mut bytes = Vec::new();
                encode_scalar_binary(endianness, value, &mut bytes);
                let kind = match value {
                    Value::I8(_) => DataType::I8,
                    Value::U8(_) => DataType::U8,
                    Value::I16(_) => DataType::I16,
                    Value::U16(_) => DataType::U16,
                    Value::I32(_) => DataType::I32,
                    Value::U32(_) => DataType::U32,
                    Value::F32(_) => DataType::F32,
                    Value::F64(_) => DataType::F64,
                    _ => unreachable!(),
                };
                let (decoded, rest) = decode_scalar_binary(endianness, kind, &bytes).unwrap();
                assert!(rest.is_empty());
                assert_eq!(&decoded, value);
            }
        }
    }

    #[test]
    fn subnormal_and_signed_zero_ascii_round_trip() {
        for value in [f64::MIN_POSITIVE * 0.5, 0.0, -0.0] {
            let mut out = String::new();
            encode_scalar_ascii(&Value::F64(value), &mut out);
            let decoded = decode_scalar_ascii(DataType::F64, &out).unwrap();
            assert_eq!(decoded, Value::F64(value));
        }
    }
}
